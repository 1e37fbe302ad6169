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

#![deny(missing_docs)]

//! `colfer` is a schema-driven binary serialization format: a compact, tag-prefixed wire layout
//! plus a code generator that emits per-record marshal/unmarshal routines from a resolved list of
//! record descriptors.
//!
//! The crate is organized around the data flow described by the format: a [`schema::Record`]
//! describes a record's fields; [`codec::Encode`]/[`codec::Decode`] are implemented once per
//! record (by hand, or via [`emit::generate`]) to move instances to and from the wire; [`wire`]
//! and [`varint`] hold the primitives every such impl calls into; and [`value::Value`] gives a
//! dynamically typed escape hatch for tooling that doesn't want a Rust type per record.

/// The `schema` module defines the structures used to describe record encodings: packages,
/// records, and fields. These descriptors drive both the emitter and, indirectly, any
/// hand-written codec that chooses to validate itself against one.
pub mod schema;

/// The `value` module provides `Timestamp` and `Value`, dynamic representations of Colfer's
/// primitive type set.
pub mod value;

/// The `varint` module implements unsigned LEB128 varints and the sign-magnitude scheme layered
/// on top of them for signed integers.
pub mod varint;

/// The `wire` module implements record framing and big-endian fixed-width primitives.
pub mod wire;

/// The `codec` module defines the `Encode`/`Decode` traits implemented by every Colfer record.
pub mod codec;

/// The `emit` module is the code generator: a deterministic projection of record descriptors
/// into generated Rust source implementing the wire contract.
pub mod emit;

/// The `error` module defines the error taxonomies used throughout the crate: decode-time,
/// schema-validation, and emitter failures.
pub mod error;

pub use codec::{Decode, Encode};
pub use error::{DecodeError, EmitError, SchemaError};
pub use schema::{Field, FieldType, Package, Record, RecordBuilder};
pub use value::{Timestamp, Value};
