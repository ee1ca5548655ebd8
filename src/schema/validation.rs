//! Field descriptor validation
//!
//! Runs before any field is created, so a bad batch never reaches the
//! server. Stops at the first problem.

use super::types::FieldType;
use crate::error::ValidationError;
use crate::types::{JsonObject, JsonValue};

/// Keys every descriptor needs
pub const REQUIRED_KEYS: [&str; 2] = ["name", "type"];

/// Check proposed field descriptors
///
/// - every descriptor is an object with `name` and `type`
/// - `type` is one of [`FieldType::ALL`]
/// - `formula` fields carry a string `formula`
/// - `link_row` fields carry an integer `link_row_table_id`
pub fn validate_fields(fields: &[JsonValue]) -> Result<(), ValidationError> {
    for (index, field) in fields.iter().enumerate() {
        validate_field(index, field)?;
    }
    Ok(())
}

fn validate_field(index: usize, field: &JsonValue) -> Result<(), ValidationError> {
    let object = field
        .as_object()
        .ok_or(ValidationError::NotAnObject { index })?;

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(ValidationError::MissingKey {
                index,
                key: key.to_string(),
            });
        }
    }

    let raw_type = &object["type"];
    let field_type = raw_type
        .as_str()
        .and_then(|s| s.parse::<FieldType>().ok())
        .ok_or_else(|| ValidationError::InvalidFieldType {
            index,
            field_type: raw_type.as_str().map_or_else(|| raw_type.to_string(), str::to_string),
        })?;

    match field_type {
        FieldType::Formula => require(object, index, "formula", "a string", JsonValue::is_string),
        FieldType::LinkRow => {
            require(object, index, "link_row_table_id", "an integer", is_integer)
        }
        _ => Ok(()),
    }
}

/// `key` must be present and pass `check`
fn require(
    object: &JsonObject,
    index: usize,
    key: &str,
    expected: &str,
    check: impl Fn(&JsonValue) -> bool,
) -> Result<(), ValidationError> {
    match object.get(key) {
        None => Err(ValidationError::MissingKey {
            index,
            key: key.to_string(),
        }),
        Some(value) if !check(value) => Err(ValidationError::WrongValueType {
            index,
            key: key.to_string(),
            expected: expected.to_string(),
        }),
        Some(_) => Ok(()),
    }
}

fn is_integer(value: &JsonValue) -> bool {
    value.is_i64() || value.is_u64()
}
