// Copyright (c) 2015, Sam Payson
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
// associated documentation files (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge, publish, distribute,
// sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all copies or
// substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
// NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Unsigned LEB128 varints, and the sign-magnitude scheme Colfer layers on top of them for
//! signed integers. This is deliberately *not* the teacher's zig-zag scheme (see
//! `primitive::varint_size` in the rex sources this module descends from): Colfer stores the
//! sign in the field header's modifier bit and the varint payload is the bare magnitude,
//! negated with a wrapping two's-complement flip rather than interleaved zig-zag bits.

use crate::error::DecodeError;

/// Returns the number of octets required to varint-encode `x` as an unsigned 32-bit value.
pub fn uvarint_size32(x: u32) -> usize {
    uvarint_size64(x as u64)
}

/// Returns the number of octets required to varint-encode `x` as an unsigned 64-bit value.
pub fn uvarint_size64(x: u64) -> usize {
    let mut n = 1;
    let mut x = x >> 7;
    while x > 0 {
        n += 1;
        x >>= 7;
    }
    n
}

/// Writes `x` as an unsigned varint at `i`, returning the cursor just past it.
pub fn write_uvarint32(buf: &mut [u8], i: usize, x: u32) -> usize {
    write_uvarint64(buf, i, x as u64)
}

/// Writes `x` as an unsigned varint at `i`, returning the cursor just past it.
pub fn write_uvarint64(buf: &mut [u8], i: usize, mut x: u64) -> usize {
    let mut i = i;
    while x >= 0x80 {
        buf[i] = (x as u8) | 0x80;
        x >>= 7;
        i += 1;
    }
    buf[i] = x as u8;
    i + 1
}

/// Reads an unsigned varint at `i`, width-guarded to 32 bits (at most 5 octets). Fails with
/// `Overflow` if the continuation runs past the width before a terminal octet, and with
/// `EndOfInput` if the buffer is exhausted first.
pub fn read_uvarint32(buf: &[u8], i: usize) -> Result<(u32, usize), DecodeError> {
    let (x, to) = read_uvarint_width(buf, i, 32)?;
    Ok((x as u32, to))
}

/// Reads an unsigned varint at `i`, width-guarded to 64 bits (at most 10 octets).
pub fn read_uvarint64(buf: &[u8], i: usize) -> Result<(u64, usize), DecodeError> {
    read_uvarint_width(buf, i, 64)
}

fn read_uvarint_width(buf: &[u8], i: usize, width: u32) -> Result<(u64, usize), DecodeError> {
    let mut x: u64 = 0;
    let mut shift: u32 = 0;
    let mut i = i;
    loop {
        if shift >= width {
            return Err(DecodeError::Overflow);
        }
        let b = *buf.get(i).ok_or(DecodeError::EndOfInput)?;
        i += 1;
        x |= ((b & 0x7f) as u64) << shift;
        if b < 0x80 {
            return Ok((x, i));
        }
        shift += 7;
    }
}

/// Splits a signed 32-bit value into the header's sign modifier and the varint magnitude to
/// encode, per Colfer's sign-magnitude rule: negative values are negated with a wrapping
/// two's-complement flip of their unsigned bit pattern, not an arithmetic negation (which would
/// overflow on `i32::MIN`).
pub fn int32_to_wire(v: i32) -> (bool, u32) {
    if v < 0 {
        (true, (v as u32).wrapping_neg())
    } else {
        (false, v as u32)
    }
}

/// Recovers a signed 32-bit value from a header's sign modifier and a decoded varint magnitude.
/// The wrapping negation is its own inverse, so this mirrors `int32_to_wire` exactly, including
/// on `i32::MIN`.
pub fn wire_to_int32(negative: bool, magnitude: u32) -> i32 {
    if negative {
        magnitude.wrapping_neg() as i32
    } else {
        magnitude as i32
    }
}

/// Splits a signed 64-bit value into the header's sign modifier and the varint magnitude to
/// encode. See `int32_to_wire`.
pub fn int64_to_wire(v: i64) -> (bool, u64) {
    if v < 0 {
        (true, (v as u64).wrapping_neg())
    } else {
        (false, v as u64)
    }
}

/// Recovers a signed 64-bit value from a header's sign modifier and a decoded varint magnitude.
/// See `wire_to_int32`.
pub fn wire_to_int64(negative: bool, magnitude: u64) -> i64 {
    if negative {
        magnitude.wrapping_neg() as i64
    } else {
        magnitude as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uvarint_round_trips() {
        for &x in &[0u64, 1, 127, 128, 16383, 16384, u32::MAX as u64, u64::MAX] {
            let mut buf = [0u8; 10];
            let n = write_uvarint64(&mut buf, 0, x);
            assert_eq!(n, uvarint_size64(x));
            let (got, to) = read_uvarint64(&buf, 0).unwrap();
            assert_eq!(got, x);
            assert_eq!(to, n);
        }
    }

    #[test]
    fn uvarint32_overflow_guard() {
        // Five continuation octets, all with the high bit set: shift reaches 35 before a
        // terminal octet, which must trip the 32-bit guard at shift == 32.
        let buf = [0xffu8, 0xff, 0xff, 0xff, 0xff, 0x01];
        let err = read_uvarint32(&buf, 0).unwrap_err();
        assert_eq!(err, DecodeError::Overflow);
    }

    #[test]
    fn uvarint64_overflow_guard() {
        let buf = [0xffu8; 11];
        let err = read_uvarint64(&buf, 0).unwrap_err();
        assert_eq!(err, DecodeError::Overflow);
    }

    #[test]
    fn read_uvarint_reports_end_of_input() {
        let buf = [0x80u8];
        let err = read_uvarint32(&buf, 0).unwrap_err();
        assert_eq!(err, DecodeError::EndOfInput);
    }

    #[test]
    fn int32_min_round_trips() {
        let (negative, magnitude) = int32_to_wire(i32::MIN);
        assert!(negative);
        assert_eq!(wire_to_int32(negative, magnitude), i32::MIN);
    }

    #[test]
    fn int64_min_round_trips() {
        let (negative, magnitude) = int64_to_wire(i64::MIN);
        assert!(negative);
        assert_eq!(wire_to_int64(negative, magnitude), i64::MIN);
    }

    #[test]
    fn negative_one_encodes_to_magnitude_one() {
        let (negative, magnitude) = int32_to_wire(-1);
        assert!(negative);
        assert_eq!(magnitude, 1);
    }
}
