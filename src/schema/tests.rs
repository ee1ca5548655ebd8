//! Schema and validation tests

use super::*;
use crate::error::{Error, ValidationError};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn table(id: u64, name: &str) -> Table {
    serde_json::from_value(json!({"id": id, "name": name, "order": 1, "database_id": 41426}))
        .unwrap()
}

fn field(value: serde_json::Value) -> Field {
    serde_json::from_value(value).unwrap()
}

fn sample_schema() -> SchemaCache {
    SchemaCache::from_tables(vec![
        (
            table(100_948, "person"),
            vec![
                field(json!({"id": 1, "name": "Name", "type": "text", "primary": true})),
                field(json!({
                    "id": 2, "name": "born_in", "type": "link_row",
                    "primary": false, "link_row_table_id": 100_947
                })),
                field(json!({
                    "id": 3, "name": "ghost", "type": "link_row",
                    "primary": false, "link_row_table_id": 1
                })),
            ],
        ),
        (
            table(100_947, "place"),
            vec![field(json!({"id": 10, "name": "Name", "type": "text", "primary": true}))],
        ),
    ])
}

// ============================================================================
// Descriptor Tests
// ============================================================================

#[test]
fn test_field_type_round_trip_names() {
    for field_type in FieldType::ALL {
        assert_eq!(field_type.as_str().parse::<FieldType>().unwrap(), field_type);
    }
    assert!("rating".parse::<FieldType>().is_err());
}

#[test]
fn test_field_deserialize_keeps_extra() {
    let f = field(json!({
        "id": 7, "name": "Summary", "type": "formula", "primary": false,
        "formula": "concat(field('a'), field('b'))", "table_id": 3, "order": 4
    }));

    assert_eq!(f.kind(), Some(FieldType::Formula));
    assert_eq!(f.formula.as_deref(), Some("concat(field('a'), field('b'))"));
    assert_eq!(f.extra.get("table_id"), Some(&json!(3)));
}

#[test]
fn test_field_unknown_type() {
    let f = field(json!({"id": 7, "name": "Stars", "type": "rating"}));
    assert_eq!(f.kind(), None);
    assert!(!f.primary);
}

// ============================================================================
// Schema Cache Tests
// ============================================================================

#[test]
fn test_schema_cache_lookup() {
    let schema = sample_schema();

    assert_eq!(schema.len(), 2);
    assert_eq!(schema.table_names(), vec!["person", "place"]);
    assert_eq!(schema.table_id("person").unwrap(), 100_948);
    assert_eq!(schema.field_id("person", "Name").unwrap(), 1);
    assert_eq!(schema.field("person", "Name").unwrap().name, "Name");
    assert_eq!(schema.table("person").unwrap().primary_field().unwrap().id, 1);
    assert_eq!(schema.table_by_id(100_947).unwrap().name(), "place");
}

#[test]
fn test_schema_cache_missing_entries() {
    let schema = sample_schema();

    assert!(matches!(
        schema.table_id("asdf"),
        Err(Error::SchemaLookup { .. })
    ));
    assert!(matches!(
        schema.field_id("person", "nope"),
        Err(Error::SchemaLookup { .. })
    ));
}

#[test]
fn test_related_table_info() {
    let schema = sample_schema();
    let (id, name) = related_table_info(&schema, "person", "born_in").unwrap();
    assert_eq!(id, 100_947);
    assert_eq!(name, "place");
}

#[test]
fn test_related_table_not_a_link() {
    let schema = sample_schema();
    let err = schema.related_table("person", "Name").unwrap_err();
    assert!(err.to_string().contains("not a link_row field"));
}

#[test]
fn test_related_table_outside_database() {
    let schema = sample_schema();
    let err = schema.related_table("person", "ghost").unwrap_err();
    assert!(err.to_string().contains("not in this database"));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validate_accepts_all_types() {
    let fields = vec![
        json!({"name": "test_field", "type": "text"}),
        json!({"name": "test_field2", "type": "long_text"}),
        json!({"name": "test_field3", "type": "formula", "formula": "concat(field('test_field'), field('test_field2'))"}),
        json!({"name": "test_field4", "type": "link_row", "link_row_table_id": 100_947, "has_related_field": false}),
        json!({"name": "test_field6", "type": "boolean"}),
        json!({"name": "test_field7", "type": "number"}),
        json!({"name": "test_field8", "type": "date"}),
    ];
    assert_eq!(validate_fields(&fields), Ok(()));
}

#[test]
fn test_validate_empty_batch() {
    assert_eq!(validate_fields(&[]), Ok(()));
}

#[test_case(json!({"name": "test_field"}), "type" ; "missing type")]
#[test_case(json!({"type": "long_text"}), "name" ; "missing name")]
#[test_case(json!({"name": "f", "type": "formula"}), "formula" ; "formula without formula")]
#[test_case(json!({"name": "f", "type": "link_row"}), "link_row_table_id" ; "link row without table")]
fn test_validate_missing_key(descriptor: serde_json::Value, missing: &str) {
    let err = validate_fields(&[descriptor]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingKey {
            index: 0,
            key: missing.to_string()
        }
    );
}

#[test_case(json!({"name": "f", "type": "formula", "formula": ["concat(field('a'))"]}), "formula" ; "formula list")]
#[test_case(json!({"name": "f", "type": "link_row", "link_row_table_id": "1"}), "link_row_table_id" ; "link row id as string")]
#[test_case(json!({"name": "f", "type": "link_row", "link_row_table_id": 1.5}), "link_row_table_id" ; "link row id as float")]
fn test_validate_wrong_value_type(descriptor: serde_json::Value, key: &str) {
    let err = validate_fields(&[descriptor]).unwrap_err();
    assert!(matches!(err, ValidationError::WrongValueType { index: 0, key: k, .. } if k == key));
}

#[test_case(json!({"name": "f", "type": "rating"}), "rating" ; "unknown type")]
#[test_case(json!({"name": "f", "type": 3}), "3" ; "non string type")]
fn test_validate_invalid_type(descriptor: serde_json::Value, shown: &str) {
    let err = validate_fields(&[descriptor]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidFieldType {
            index: 0,
            field_type: shown.to_string()
        }
    );
}

#[test]
fn test_validate_reports_first_bad_index() {
    let fields = vec![
        json!({"name": "ok", "type": "text"}),
        json!({"name": "bad", "type": "rating"}),
        json!({"name": "worse"}),
    ];
    let err = validate_fields(&fields).unwrap_err();
    assert_eq!(err.index(), 1);
}

#[test]
fn test_validate_not_an_object() {
    let err = validate_fields(&[json!("text")]).unwrap_err();
    assert_eq!(err, ValidationError::NotAnObject { index: 0 });
}
