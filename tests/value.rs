//! Exercises `value::Value` as schema-level tooling: checking a record descriptor's implicit
//! defaults without any per-record Rust type, the role `Value` actually plays in this crate (see
//! `SPEC_FULL.md` §2 and `DESIGN.md`).

use colfer::{FieldType, Package, RecordBuilder, Value};

#[test]
fn every_field_of_a_freshly_built_record_defaults_to_its_type_and_its_zero_value() {
    let record = RecordBuilder::new("demo", Package::new("test/db"))
        .field("key", 0, FieldType::Uint64)
        .field("host", 1, FieldType::Text)
        .field("port", 2, FieldType::Uint32)
        .field("route", 3, FieldType::Bool)
        .build()
        .unwrap();

    for field in &record.fields {
        let default = field.typ.default_value();
        assert!(default.has_type(field.typ));
        assert!(default.is_default());
    }
}

#[test]
fn non_default_values_are_reported_as_such() {
    assert!(!Value::Uint32(1).is_default());
    assert!(!Value::Text("x".to_string()).is_default());
    assert!(Value::Binary(Vec::new()).is_default());
}
