//! JSON dump writer
//!
//! One file per table, named `<table-name>.json`, holding an object that maps
//! row id to row.

use crate::error::{Error, Result};
use crate::types::{row_id, JsonObject, JsonValue, Row};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};

/// Where and how dump files are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpOptions {
    folder: Option<PathBuf>,
    indent: usize,
}

impl DumpOptions {
    /// Write compact JSON to the working directory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write into this folder (created if missing)
    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Pretty-print with this many spaces; 0 writes compact JSON
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Target folder
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Indent width
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Path of the dump file for a table
    pub fn file_path(&self, table_name: &str) -> PathBuf {
        let file_name = format!("{table_name}.json");
        match &self.folder {
            Some(folder) => folder.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Key rows by their id; a later row with the same id replaces the earlier one
pub fn rows_by_id(rows: impl IntoIterator<Item = Row>) -> Result<JsonObject> {
    let mut keyed = JsonObject::new();
    for row in rows {
        let id = row_id(&row).ok_or_else(|| Error::protocol("row without numeric 'id'"))?;
        keyed.insert(id.to_string(), JsonValue::Object(row));
    }
    Ok(keyed)
}

/// Serialize a value, pretty-printed when `indent > 0`
pub fn encode_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<Vec<u8>> {
    if indent == 0 {
        return Ok(serde_json::to_vec(value)?);
    }

    let spaces = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(spaces.as_bytes()));
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write a value to `path`, creating the parent folder if needed
pub async fn write_json_file<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    indent: usize,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = encode_json(value, indent)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
