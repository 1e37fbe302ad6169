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

//! `Timestamp` and `Value` give dynamic, non-generated representations of Colfer primitives.
//! `Value` plays the role the teacher's `Primitive` enum played for rex: a common currency type
//! that property tests and generic tooling can use without a per-record Rust type.

use crate::schema::FieldType;

/// A Colfer timestamp: a signed seconds-since-epoch component and an unsigned nanosecond
/// remainder. Kept as a plain pair rather than pulled from a date-time crate, since the wire
/// format only ever needs the two components and round-tripping them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Seconds since the Unix epoch. May be negative.
    pub sec: i64,
    /// Nanoseconds past `sec`, in `0..=999_999_999`.
    pub nsec: u32,
}

impl Timestamp {
    /// The zero value: epoch, no nanoseconds. Never emitted to the wire.
    pub const EPOCH: Timestamp = Timestamp { sec: 0, nsec: 0 };

    /// Builds a timestamp from its wire components.
    pub fn new(sec: i64, nsec: u32) -> Timestamp {
        Timestamp { sec, nsec }
    }

    /// True iff both components are zero, the sole condition under which the field is omitted
    /// from the wire.
    pub fn is_zero(&self) -> bool {
        self.sec == 0 && self.nsec == 0
    }
}

/// `Value` is a dynamically typed Colfer primitive, one variant per `FieldType`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// See [`FieldType::Bool`].
    Bool(bool),
    /// See [`FieldType::Uint32`].
    Uint32(u32),
    /// See [`FieldType::Uint64`].
    Uint64(u64),
    /// See [`FieldType::Int32`].
    Int32(i32),
    /// See [`FieldType::Int64`].
    Int64(i64),
    /// See [`FieldType::Float32`].
    Float32(f32),
    /// See [`FieldType::Float64`].
    Float64(f64),
    /// See [`FieldType::Timestamp`].
    Timestamp(Timestamp),
    /// See [`FieldType::Text`].
    Text(String),
    /// See [`FieldType::Binary`].
    Binary(Vec<u8>),
}

impl Value {
    /// Reports whether `self`'s variant matches the wire type `t`.
    pub fn has_type(&self, t: FieldType) -> bool {
        matches!(
            (self, t),
            (Value::Bool(..), FieldType::Bool)
                | (Value::Uint32(..), FieldType::Uint32)
                | (Value::Uint64(..), FieldType::Uint64)
                | (Value::Int32(..), FieldType::Int32)
                | (Value::Int64(..), FieldType::Int64)
                | (Value::Float32(..), FieldType::Float32)
                | (Value::Float64(..), FieldType::Float64)
                | (Value::Timestamp(..), FieldType::Timestamp)
                | (Value::Text(..), FieldType::Text)
                | (Value::Binary(..), FieldType::Binary)
        )
    }

    /// Reports whether `self` equals its type's default value — the condition under which a
    /// field carrying this value is omitted from the wire.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Bool(b) => !*b,
            Value::Uint32(x) => *x == 0,
            Value::Uint64(x) => *x == 0,
            Value::Int32(x) => *x == 0,
            Value::Int64(x) => *x == 0,
            Value::Float32(x) => *x == 0.0,
            Value::Float64(x) => *x == 0.0,
            Value::Timestamp(t) => t.is_zero(),
            Value::Text(s) => s.is_empty(),
            Value::Binary(b) => b.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_type_matches_variant() {
        assert!(Value::Uint32(1).has_type(FieldType::Uint32));
        assert!(!Value::Uint32(1).has_type(FieldType::Uint64));
    }

    #[test]
    fn is_default_zero_timestamp() {
        assert!(Value::Timestamp(Timestamp::EPOCH).is_default());
        assert!(!Value::Timestamp(Timestamp::new(0, 1)).is_default());
    }
}
