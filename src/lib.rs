// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Baserow client
//!
//! An async client for the [Baserow](https://baserow.io) REST API.
//!
//! ## Features
//!
//! - **Two credentials**: database token for rows, login JWT for tables and fields
//! - **Lazy pagination**: rows stream page by page, following the server's `next` link
//! - **Schema cache**: table and field ids resolved by name
//! - **Result objects**: table and field mutations report rejections instead of failing
//! - **Bulk export**: every table of a database dumped to `<table>.json`
//! - **Enrichment**: resolve GND/GeoNames identifiers through Wikidata
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use baserow_client::{BaserowClient, ClientConfig, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .base_url("https://baserow.example.org/api")
//!         .credentials("hansi@example.org", "secret")
//!         .database_id(42)
//!         .build()?; // token from BASEROW_TOKEN
//!     let client = BaserowClient::new(config).await?;
//!
//!     let schema = client.schema().expect("database id was set");
//!     let person = schema.table_id("person")?;
//!
//!     let mut rows = client.rows(person);
//!     while let Some(row) = rows.try_next().await? {
//!         println!("{}", row["Name"]);
//!     }
//!
//!     let result = client.get_or_create(schema, "person", "Name", "Hansi4ever").await?;
//!     println!("created: {}", result.created());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         BaserowClient                           │
//! │  tables / fields (JWT)    rows (Token)    get_or_create  dump   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Schema   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Token    │ GET/POST  │ next URL      │ Cache     │ JSON files  │
//! │ JWT      │ Outcome   │ Row stream    │ Validate  │             │
//! │ Login    │ Rate Limit│               │           │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration and token resolution
pub mod config;

/// Token and JWT authorization
pub mod auth;

/// HTTP client with optional retry and rate limiting
pub mod http;

/// Next-URL pagination over row listings
pub mod pagination;

/// Table and field descriptors, schema cache, field validation
pub mod schema;

/// The Baserow API client
pub mod client;

/// JSON dump files
pub mod output;

/// Identifier enrichment through reconciliation services
pub mod enrich;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ValidationError};
pub use types::*;

// Re-export commonly used types
pub use client::{BaserowClient, GetOrCreate};
pub use config::ClientConfig;
pub use output::DumpOptions;
pub use pagination::{Page, RowStream};
pub use schema::{related_table_info, Field, FieldType, SchemaCache, Table};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
