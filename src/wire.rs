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

//! Record framing and fixed-width primitives. Unlike the teacher's rex format, every multi-octet
//! fixed-width field here is big-endian; varints (in `crate::varint`) remain little-endian
//! septets regardless.

use crate::error::DecodeError;

/// The magic byte that introduces every serialized record.
pub const MAGIC: u8 = 0x80;

/// Masks a header byte down to its field index.
pub const INDEX_MASK: u8 = 0x7f;

/// The per-type modifier bit of a header byte: sign for signed integers, nanosecond-present for
/// timestamps.
pub const MODIFIER_BIT: u8 = 0x80;

/// Extracts the field index from a header byte.
pub fn header_index(header: u8) -> u8 {
    header & INDEX_MASK
}

/// Extracts the per-type modifier bit from a header byte.
pub fn header_modifier(header: u8) -> bool {
    header & MODIFIER_BIT != 0
}

/// Packs a field index and modifier bit into a header byte. Panics if `index` doesn't fit in 7
/// bits; callers only ever pass indices that `Record::validate` has already checked.
pub fn make_header(index: u8, modifier: bool) -> u8 {
    debug_assert!(index <= INDEX_MASK, "field index {index} does not fit a header byte");
    index | if modifier { MODIFIER_BIT } else { 0 }
}

/// Drives the record-framing state machine common to every record: checks the magic byte, then
/// repeatedly reads a header byte and hands it to `decode_field` until the input is exhausted.
/// `decode_field` receives the header byte and the cursor just past it, and must return the
/// cursor position just past that field's payload (or `UnknownField`/another `DecodeError`).
///
/// Every generated and hand-written `Decode` impl calls this rather than re-deriving the
/// loop-until-exhausted, check-the-magic-byte shape itself.
pub fn decode_frame(
    buf: &[u8],
    mut decode_field: impl FnMut(u8, usize) -> Result<usize, DecodeError>,
) -> Result<usize, DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::EndOfInput);
    }
    if buf[0] != MAGIC {
        return Err(DecodeError::StructHeaderMismatch);
    }

    let mut i = 1;
    while i < buf.len() {
        let header = buf[i];
        i += 1;
        i = decode_field(header, i)?;
    }
    Ok(i)
}

/// Bounds-checks a read of `n` bytes starting at `i`, guarding against both running past
/// `buf.len()` and `usize` overflow of `i + n`. Returns the slice and the cursor just past it.
pub fn take(buf: &[u8], i: usize, n: usize) -> Result<(&[u8], usize), DecodeError> {
    let to = i.checked_add(n).ok_or(DecodeError::EndOfInput)?;
    if to > buf.len() {
        return Err(DecodeError::EndOfInput);
    }
    Ok((&buf[i..to], to))
}

/// Writes `x` as 4 big-endian octets at `i`, returning the cursor just past it.
pub fn write_be_u32(buf: &mut [u8], i: usize, x: u32) -> usize {
    let to = i + 4;
    buf[i..to].copy_from_slice(&x.to_be_bytes());
    to
}

/// Reads 4 big-endian octets at `i` as a `u32`.
pub fn read_be_u32(buf: &[u8], i: usize) -> Result<(u32, usize), DecodeError> {
    let (s, to) = take(buf, i, 4)?;
    Ok((u32::from_be_bytes(s.try_into().unwrap()), to))
}

/// Writes `x` as 8 big-endian octets at `i`, returning the cursor just past it.
pub fn write_be_u64(buf: &mut [u8], i: usize, x: u64) -> usize {
    let to = i + 8;
    buf[i..to].copy_from_slice(&x.to_be_bytes());
    to
}

/// Reads 8 big-endian octets at `i` as a `u64`.
pub fn read_be_u64(buf: &[u8], i: usize) -> Result<(u64, usize), DecodeError> {
    let (s, to) = take(buf, i, 8)?;
    Ok((u64::from_be_bytes(s.try_into().unwrap()), to))
}

/// Writes `x` as 8 big-endian octets at `i`, returning the cursor just past it.
pub fn write_be_i64(buf: &mut [u8], i: usize, x: i64) -> usize {
    write_be_u64(buf, i, x as u64)
}

/// Reads 8 big-endian octets at `i` as an `i64`.
pub fn read_be_i64(buf: &[u8], i: usize) -> Result<(i64, usize), DecodeError> {
    let (x, to) = read_be_u64(buf, i)?;
    Ok((x as i64, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trip() {
        let h = make_header(42, true);
        assert_eq!(header_index(h), 42);
        assert!(header_modifier(h));
    }

    #[test]
    fn decode_frame_rejects_bad_magic() {
        let err = decode_frame(&[0x00], |_, i| Ok(i)).unwrap_err();
        assert_eq!(err, DecodeError::StructHeaderMismatch);
    }

    #[test]
    fn decode_frame_rejects_empty_input() {
        let err = decode_frame(&[], |_, i| Ok(i)).unwrap_err();
        assert_eq!(err, DecodeError::EndOfInput);
    }

    #[test]
    fn decode_frame_accepts_bare_magic() {
        let consumed = decode_frame(&[MAGIC], |_, i| Ok(i)).unwrap();
        assert_eq!(consumed, 1);
    }

    #[test]
    fn take_rejects_overflowing_length() {
        let buf = [0u8; 4];
        let err = take(&buf, 2, usize::MAX).unwrap_err();
        assert_eq!(err, DecodeError::EndOfInput);
    }

    #[test]
    fn be_u32_round_trips() {
        let mut buf = [0u8; 4];
        write_be_u32(&mut buf, 0, 0xdead_beef);
        let (x, to) = read_be_u32(&buf, 0).unwrap();
        assert_eq!(x, 0xdead_beef);
        assert_eq!(to, 4);
    }
}
