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

use std::path::PathBuf;

use thiserror::Error;

/// `DecodeError` enumerates every way a decode can fail. The taxonomy is fixed: a conforming
/// decoder never reports a failure outside of these four variants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The first octet of the input was not the magic byte `0x80`.
    #[error("colfer: struct header mismatch")]
    StructHeaderMismatch,

    /// A header's low 7 bits named a field index not declared on the record being decoded.
    #[error("colfer: unknown field header (index {index})")]
    UnknownField {
        /// The undeclared field index read from the header byte.
        index: u8,
    },

    /// A varint's shift counter reached the target width before a terminal octet appeared.
    #[error("colfer: varint overflow")]
    Overflow,

    /// The decoder needed more octets than the buffer provided.
    #[error("colfer: unexpected end of input")]
    EndOfInput,
}

/// `SchemaError` reports a problem with a record descriptor, caught before it reaches the codec
/// or the emitter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A record was declared with an empty name.
    #[error("record name must not be empty")]
    EmptyRecordName,

    /// A field within a record was declared with an empty name.
    #[error("record `{record}` has a field with an empty name")]
    EmptyFieldName {
        /// The owning record's name.
        record: String,
    },

    /// A field's index exceeds the 7 bits available in a header byte.
    #[error("record `{record}` field `{field}` has index {index}, which exceeds the maximum of 127")]
    IndexOutOfRange {
        /// The owning record's name.
        record: String,
        /// The offending field's name.
        field: String,
        /// The out-of-range index, widened so 128+ prints without wrapping.
        index: u16,
    },

    /// Two fields in the same record declared the same index.
    #[error("record `{record}` has duplicate field index {index}")]
    DuplicateFieldIndex {
        /// The owning record's name.
        record: String,
        /// The index that appears more than once.
        index: u8,
    },
}

/// `EmitError` reports a failure of the code generator: either the input schema didn't validate,
/// or a filesystem operation failed while writing generated source.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A record descriptor failed validation; no output was written for it.
    #[error("colfer: invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// Creating a package directory or output file failed.
    #[error("colfer: i/o error writing {}: {source}", path.display())]
    Io {
        /// The path the emitter was trying to write.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}
