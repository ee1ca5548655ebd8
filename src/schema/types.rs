//! Table and field descriptors and the schema cache

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// Field Types
// ============================================================================

/// Field types this client can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    LongText,
    Number,
    Date,
    Boolean,
    LinkRow,
    Formula,
}

impl FieldType {
    /// Every creatable field type
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::LongText,
        FieldType::Number,
        FieldType::Date,
        FieldType::Boolean,
        FieldType::LinkRow,
        FieldType::Formula,
    ];

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::LongText => "long_text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::LinkRow => "link_row",
            FieldType::Formula => "formula",
        }
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Metadata of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<u64>,
    /// Attributes this client does not interpret
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Metadata of one field (column)
///
/// The server knows many more types than [`FieldType`]; the raw name is kept
/// in `field_type` and [`Field::kind`] maps the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Set on the table's display field
    #[serde(default)]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_row_table_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Attributes this client does not interpret
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Field {
    /// Known type of this field, if any
    pub fn kind(&self) -> Option<FieldType> {
        self.field_type.parse().ok()
    }
}

// ============================================================================
// Schema Cache
// ============================================================================

/// A table with its fields keyed by name
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub table: Table,
    pub fields: HashMap<String, Field>,
}

impl TableSchema {
    /// Build from a table and its field listing
    pub fn new(table: Table, fields: Vec<Field>) -> Self {
        let fields = fields.into_iter().map(|f| (f.name.clone(), f)).collect();
        Self { table, fields }
    }

    /// Table id
    pub fn id(&self) -> u64 {
        self.table.id
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// The display field
    pub fn primary_field(&self) -> Option<&Field> {
        self.fields.values().find(|f| f.primary)
    }
}

/// Table name → table → field name → field, for one database
///
/// Built once by [`crate::BaserowClient::fetch_schema`] and only read
/// afterwards. A fresh schema requires a fresh fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaCache {
    tables: HashMap<String, TableSchema>,
}

impl SchemaCache {
    /// Assemble a cache from tables and their fields
    pub fn from_tables(tables: impl IntoIterator<Item = (Table, Vec<Field>)>) -> Self {
        let tables = tables
            .into_iter()
            .map(|(table, fields)| (table.name.clone(), TableSchema::new(table, fields)))
            .collect();
        Self { tables }
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the database has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names, sorted
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// Look up a table by id
    pub fn table_by_id(&self, id: u64) -> Option<&TableSchema> {
        self.tables.values().find(|t| t.id() == id)
    }

    /// Look up a field by table and field name
    pub fn field(&self, table: &str, field: &str) -> Option<&Field> {
        self.table(table)?.field(field)
    }

    /// Id of a table, or a lookup error
    pub fn table_id(&self, table: &str) -> Result<u64> {
        self.table(table)
            .map(TableSchema::id)
            .ok_or_else(|| Error::schema_lookup(format!("unknown table '{table}'")))
    }

    /// Field descriptor, or a lookup error naming what is missing
    pub fn require_field(&self, table: &str, field: &str) -> Result<&Field> {
        self.table(table)
            .ok_or_else(|| Error::schema_lookup(format!("unknown table '{table}'")))?
            .field(field)
            .ok_or_else(|| Error::schema_lookup(format!("table '{table}' has no field '{field}'")))
    }

    /// Id of a field, or a lookup error
    pub fn field_id(&self, table: &str, field: &str) -> Result<u64> {
        self.require_field(table, field).map(|f| f.id)
    }

    /// Id and name of the table a link-row field points to
    pub fn related_table(&self, table: &str, field: &str) -> Result<(u64, String)> {
        let descriptor = self.require_field(table, field)?;

        let related_id = descriptor.link_row_table_id.ok_or_else(|| {
            Error::schema_lookup(format!(
                "'{table}.{field}' is a {} field, not a link_row field",
                descriptor.field_type
            ))
        })?;

        let related = self.table_by_id(related_id).ok_or_else(|| {
            Error::schema_lookup(format!(
                "'{table}.{field}' links to table {related_id}, which is not in this database"
            ))
        })?;

        Ok((related_id, related.name().to_string()))
    }
}
