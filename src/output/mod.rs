//! Output module
//!
//! Serializes fetched rows to JSON files for bulk export.

mod writer;

pub use writer::{encode_json, rows_by_id, write_json_file, DumpOptions};
