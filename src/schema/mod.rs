//! Schema module
//!
//! Table and field descriptors, the per-database [`SchemaCache`] and the
//! validation applied to proposed fields before they are created.

mod types;
mod validation;

pub use types::{Field, FieldType, SchemaCache, Table, TableSchema};
pub use validation::{validate_fields, REQUIRED_KEYS};

/// Id and name of the table a link-row field points to
pub fn related_table_info(
    schema: &SchemaCache,
    table: &str,
    field: &str,
) -> crate::Result<(u64, String)> {
    schema.related_table(table, field)
}

#[cfg(test)]
mod tests;
