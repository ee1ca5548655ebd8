//! Baserow API client
//!
//! [`BaserowClient`] is built once from a [`ClientConfig`]. Construction logs
//! in (when credentials are configured) and, when a database id is set,
//! fetches that database's schema. Afterwards the client is immutable: every
//! operation is an independent request, or a sequential run of them.
//!
//! Endpoints are split by credential:
//! - tables and fields use the login token (`JWT`)
//! - rows use the database token (`Token`)

mod fields;
mod rows;
mod tables;
mod types;

pub use types::GetOrCreate;

use crate::auth::{AuthScheme, Authenticator};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::schema::SchemaCache;

/// Client for one Baserow instance
#[derive(Debug)]
pub struct BaserowClient {
    http: HttpClient,
    auth: Authenticator,
    config: ClientConfig,
    schema: Option<SchemaCache>,
}

impl BaserowClient {
    /// Connect: log in, then fetch the configured database's schema
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::with_config(config.http_config())?;
        let auth =
            Authenticator::connect(&http, config.token.clone(), config.credentials.as_ref())
                .await?;

        let mut client = Self {
            http,
            auth,
            config,
            schema: None,
        };

        if let Some(database_id) = client.config.database_id {
            client.schema = Some(client.fetch_schema(database_id).await?);
        }

        Ok(client)
    }

    /// Connect using `BASEROW_*` environment variables
    pub async fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?).await
    }

    /// API base URL, ending with `/`
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Schema of the configured database, if one was set
    pub fn schema(&self) -> Option<&SchemaCache> {
        self.schema.as_ref()
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Whether structural endpoints are usable
    pub fn has_jwt(&self) -> bool {
        self.auth.has_jwt()
    }

    /// Request config carrying the JWT, for table and field endpoints
    fn structural_request(&self) -> Result<RequestConfig> {
        self.auth.apply(RequestConfig::new(), AuthScheme::Jwt)
    }

    /// Request config carrying the database token, for row endpoints
    fn row_request(&self) -> RequestConfig {
        RequestConfig::new().header("Authorization", self.auth.token_authorization())
    }
}

// ============================================================================
// Endpoint paths, relative to the base URL
// ============================================================================

fn database_tables_path(database_id: u64) -> String {
    format!("database/tables/database/{database_id}/")
}

fn table_path(table_id: u64) -> String {
    format!("database/tables/{table_id}/")
}

fn table_fields_path(table_id: u64) -> String {
    format!("database/fields/table/{table_id}/")
}

fn field_path(field_id: u64) -> String {
    format!("database/fields/{field_id}/")
}

fn rows_path(table_id: u64) -> String {
    format!("database/rows/table/{table_id}/")
}

fn row_path(table_id: u64, row_id: u64) -> String {
    format!("database/rows/table/{table_id}/{row_id}/")
}

fn batch_rows_path(table_id: u64) -> String {
    format!("database/rows/table/{table_id}/batch/")
}
