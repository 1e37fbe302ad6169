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

//! `Encode` and `Decode` are implemented once per record type — by hand, or by the emitter — and
//! never by a single reflective walker over a `schema::Record` at runtime. The traits exist so
//! the rest of the crate (and a record's own tests) can talk about "a Colfer record" generically
//! without caring whether the impl was generated or written by hand.

use crate::error::DecodeError;

/// Implemented by every Colfer record. Writes and reads are both synchronous and allocate
/// nothing beyond what the record's own `String`/`Vec<u8>` fields require.
pub trait Encode {
    /// Encodes `self` into `buf` starting at offset 0 and returns the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is smaller than `self.encoded_len()`. Sizing the buffer correctly is the
    /// caller's responsibility; this is a programmer error, not a `DecodeError`-shaped failure.
    fn encode_to(&self, buf: &mut [u8]) -> usize;

    /// Returns an upper bound, in bytes, on the serialized size of `self`. Always at least as
    /// large as the exact length `encode_to` will write.
    fn encoded_len(&self) -> usize;

    /// Allocates a buffer of `encoded_len()` bytes, encodes `self` into it, and truncates to the
    /// exact number of bytes written. Never fails.
    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.encoded_len()];
        let n = self.encode_to(&mut buf);
        buf.truncate(n);
        buf
    }
}

/// Implemented by every Colfer record to decode itself from a wire buffer.
pub trait Decode: Sized + Default {
    /// Decodes a record from `buf`, returning the record and the number of bytes consumed.
    /// Requires `buf` to hold exactly one encoded record and nothing past it: the decode loop
    /// runs until `buf` is exhausted, so any trailing bytes after a complete record are read as
    /// further field-entries of that same record rather than ignored, and are rejected as
    /// `DecodeError::UnknownField` (or worse, misparsed) if they don't happen to form one. A
    /// truncated record fails with a `DecodeError` — see `crate::error::DecodeError`.
    fn decode_from(buf: &[u8]) -> Result<(Self, usize), DecodeError>;
}
