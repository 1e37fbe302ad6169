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

//! The `schema` module defines the structures which describe record encodings. The data
//! structures described here drive both the runtime codec (`crate::codec`) and the emitter
//! (`crate::emit`); neither reads schema *text* — that's left to an external parser. Callers
//! build a `Record` directly, or through `RecordBuilder`, and call `validate` before handing it
//! to the emitter.

use std::path::PathBuf;

use crate::error::SchemaError;
use crate::value::{Timestamp, Value};

/// The highest field index that fits in the low 7 bits of a header byte.
pub const MAX_FIELD_INDEX: u8 = 0x7f;

/// `FieldType` enumerates Colfer's closed set of primitive wire types. There is no open
/// extension point: a conforming implementation supports exactly these ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Presence-implies-true, no payload.
    Bool,
    /// Unsigned, varint payload, up to 5 octets.
    Uint32,
    /// Unsigned, varint payload, up to 10 octets.
    Uint64,
    /// Signed, sign-bit header + varint magnitude.
    Int32,
    /// Signed, sign-bit header + varint magnitude.
    Int64,
    /// 4 big-endian octets, IEEE-754 single precision.
    Float32,
    /// 8 big-endian octets, IEEE-754 double precision.
    Float64,
    /// 8 big-endian seconds + optional 4 big-endian nanoseconds.
    Timestamp,
    /// Varint length + UTF-8 octets.
    Text,
    /// Varint length + raw octets.
    Binary,
}

impl FieldType {
    /// Returns this type's default value — the value a declared field implicitly holds before
    /// anything is assigned to it, and the value whose presence suppresses the field on the
    /// wire (§4.2). Lets schema-level tooling (and tests) reason about a field's shape without
    /// a per-record Rust type standing in for it.
    pub fn default_value(&self) -> Value {
        match self {
            FieldType::Bool => Value::Bool(false),
            FieldType::Uint32 => Value::Uint32(0),
            FieldType::Uint64 => Value::Uint64(0),
            FieldType::Int32 => Value::Int32(0),
            FieldType::Int64 => Value::Int64(0),
            FieldType::Float32 => Value::Float32(0.0),
            FieldType::Float64 => Value::Float64(0.0),
            FieldType::Timestamp => Value::Timestamp(Timestamp::EPOCH),
            FieldType::Text => Value::Text(String::new()),
            FieldType::Binary => Value::Binary(Vec::new()),
        }
    }
}

/// A `Package` names a grouping of records. `name` is a slash-separated path identifier; it maps
/// to a filesystem subdirectory (via `path`) and, conceptually, to a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// The slash-separated package path, e.g. `"test/db"`.
    pub name: String,
}

impl Package {
    /// Creates a package with the given slash-separated name.
    pub fn new(name: impl Into<String>) -> Package {
        Package { name: name.into() }
    }

    /// Splits `name` on `/` and rejoins the components with the host platform's path separator.
    pub fn path(&self) -> PathBuf {
        self.name.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// A `Field` describes a single member of a `Record`: its name, its zero-based wire index, and
/// its primitive type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The field's identifier, used as a struct member name in generated code.
    pub name: String,
    /// The zero-based index occupying the low 7 bits of the field's header byte.
    pub index: u8,
    /// The field's wire type.
    pub typ: FieldType,
}

impl Field {
    /// Creates a new field. Does not itself validate `index`; call `Record::validate` on the
    /// owning record once all fields are assembled.
    pub fn new(name: impl Into<String>, index: u8, typ: FieldType) -> Field {
        Field {
            name: name.into(),
            index,
            typ,
        }
    }

    /// Returns `name` with its first letter uppercased, for languages whose convention requires
    /// an exported identifier. Purely cosmetic; not a wire concept.
    pub fn name_title(&self) -> String {
        title_case(&self.name)
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A `Record` is a named, ordered collection of fields. Field order equals declaration order,
/// which is also marshal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The record's identifier, used as a type name in generated code.
    pub name: String,
    /// The package this record belongs to.
    pub pkg: Package,
    /// The record's fields, in declaration (and marshal) order.
    pub fields: Vec<Field>,
}

impl Record {
    /// Creates a record with no fields. Use `RecordBuilder` to assemble one with fields inline,
    /// or push onto `fields` directly.
    pub fn new(name: impl Into<String>, pkg: Package) -> Record {
        Record {
            name: name.into(),
            pkg,
            fields: Vec::new(),
        }
    }

    /// Returns `name` with its first letter uppercased.
    pub fn name_title(&self) -> String {
        title_case(&self.name)
    }

    /// Checks that the record's name and every field's name are non-empty, and that field
    /// indices are each in `0..=127` and pairwise distinct. Does not require indices to be
    /// dense — only unique and within range. Should be called before a record is handed to the
    /// emitter or relied on by a hand-written codec.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyRecordName);
        }

        let mut seen = [false; (MAX_FIELD_INDEX as usize) + 1];
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    record: self.name.clone(),
                });
            }
            if field.index > MAX_FIELD_INDEX {
                return Err(SchemaError::IndexOutOfRange {
                    record: self.name.clone(),
                    field: field.name.clone(),
                    index: field.index as u16,
                });
            }
            if seen[field.index as usize] {
                return Err(SchemaError::DuplicateFieldIndex {
                    record: self.name.clone(),
                    index: field.index,
                });
            }
            seen[field.index as usize] = true;
        }

        Ok(())
    }
}

/// `RecordBuilder` assembles a `Record` field by field, validating on `build`. Meant for tests
/// and other call sites that construct descriptors by hand rather than from a parsed schema.
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Starts building a record with the given name and package.
    pub fn new(name: impl Into<String>, pkg: Package) -> RecordBuilder {
        RecordBuilder {
            record: Record::new(name, pkg),
        }
    }

    /// Appends a field and returns `self` for chaining.
    pub fn field(mut self, name: impl Into<String>, index: u8, typ: FieldType) -> RecordBuilder {
        self.record.fields.push(Field::new(name, index, typ));
        self
    }

    /// Validates and returns the assembled record.
    pub fn build(self) -> Result<Record, SchemaError> {
        self.record.validate()?;
        Ok(self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_title_uppercases_first_letter_only() {
        let f = Field::new("host", 0, FieldType::Text);
        assert_eq!(f.name_title(), "Host");
    }

    #[test]
    fn package_path_splits_on_slash() {
        let pkg = Package::new("test/db");
        assert_eq!(pkg.path(), PathBuf::from("test").join("db"));
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let rec = RecordBuilder::new("demo", Package::new("p"))
            .field("x", 128, FieldType::Bool)
            .build();
        assert_eq!(
            rec.unwrap_err(),
            SchemaError::IndexOutOfRange {
                record: "demo".into(),
                field: "x".into(),
                index: 128,
            }
        );
    }

    #[test]
    fn validate_rejects_duplicate_index() {
        let rec = RecordBuilder::new("demo", Package::new("p"))
            .field("x", 0, FieldType::Bool)
            .field("y", 0, FieldType::Bool)
            .build();
        assert_eq!(
            rec.unwrap_err(),
            SchemaError::DuplicateFieldIndex {
                record: "demo".into(),
                index: 0,
            }
        );
    }

    #[test]
    fn default_value_matches_its_field_type_and_is_default() {
        for typ in [
            FieldType::Bool,
            FieldType::Uint32,
            FieldType::Uint64,
            FieldType::Int32,
            FieldType::Int64,
            FieldType::Float32,
            FieldType::Float64,
            FieldType::Timestamp,
            FieldType::Text,
            FieldType::Binary,
        ] {
            let v = typ.default_value();
            assert!(v.has_type(typ));
            assert!(v.is_default());
        }
    }

    #[test]
    fn validate_allows_non_dense_indices() {
        let rec = RecordBuilder::new("demo", Package::new("p"))
            .field("x", 0, FieldType::Bool)
            .field("y", 5, FieldType::Bool)
            .build();
        assert!(rec.is_ok());
    }
}
