//! Table listing, schema fetch, table mutation and bulk export

use super::{database_tables_path, table_path, BaserowClient};
use crate::error::Result;
use crate::output::{rows_by_id, write_json_file, DumpOptions};
use crate::schema::{SchemaCache, Table};
use crate::types::Outcome;
use futures::TryStreamExt;
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};

impl BaserowClient {
    /// All tables of a database, in server order
    pub async fn list_tables(&self, database_id: u64) -> Result<Vec<Table>> {
        let request = self.structural_request()?;
        self.http
            .request_json(Method::GET, &database_tables_path(database_id), request)
            .await
    }

    /// Id of the table called `name`, as a string; `None` when absent
    pub async fn get_table_by_name(&self, database_id: u64, name: &str) -> Result<Option<String>> {
        let tables = self.list_tables(database_id).await?;
        Ok(tables
            .into_iter()
            .find(|table| table.name == name)
            .map(|table| table.id.to_string()))
    }

    /// Fetch tables, then the fields of each table, into a [`SchemaCache`]
    ///
    /// One request for the listing plus one per table, issued in sequence.
    pub async fn fetch_schema(&self, database_id: u64) -> Result<SchemaCache> {
        info!("Fetching schema of database {}", database_id);

        let tables = self.list_tables(database_id).await?;
        let mut entries = Vec::with_capacity(tables.len());
        for table in tables {
            let fields = self.list_fields(table.id).await?;
            debug!("Table '{}' has {} fields", table.name, fields.len());
            entries.push((table, fields));
        }

        let schema = SchemaCache::from_tables(entries);
        info!("Schema of database {} has {} tables", database_id, schema.len());
        Ok(schema)
    }

    /// Create a table, optionally importing seed rows
    ///
    /// The first seed row is the header row. A rejected request is returned
    /// as [`Outcome::Rejected`].
    pub async fn create_table(
        &self,
        database_id: u64,
        name: &str,
        seed: Option<&[Vec<String>]>,
    ) -> Result<Outcome<Table>> {
        let mut body = json!({ "name": name });
        if let Some(rows) = seed {
            body["data"] = json!(rows);
            body["first_row_header"] = json!(true);
        }

        let request = self.structural_request()?.json(body);
        let outcome = self
            .http
            .outcome_json::<Table>(Method::POST, &database_tables_path(database_id), request)
            .await?;

        if let Outcome::Applied(ref table) = outcome {
            info!("Created table '{}' ({})", table.name, table.id);
        }
        Ok(outcome)
    }

    /// Delete a table; applied only on `204 No Content`
    pub async fn delete_table(&self, table_id: u64) -> Result<Outcome<()>> {
        let request = self.structural_request()?;
        let outcome = self
            .http
            .outcome(Method::DELETE, &table_path(table_id), request)
            .await?;

        match outcome {
            Outcome::Applied(response) if response.status() != StatusCode::NO_CONTENT => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Ok(Outcome::Rejected { status, body })
            }
            outcome => {
                if outcome.is_applied() {
                    info!("Deleted table {}", table_id);
                }
                Ok(outcome.map(|_| ()))
            }
        }
    }

    /// Write every table of a database to `<table name>.json`
    ///
    /// Each file holds one JSON object mapping row id to row. Returns the
    /// written paths in table order.
    pub async fn dump_tables_as_json(
        &self,
        database_id: u64,
        options: &DumpOptions,
    ) -> Result<Vec<PathBuf>> {
        let tables = self.list_tables(database_id).await?;
        let mut written = Vec::with_capacity(tables.len());

        for table in tables {
            let rows: Vec<_> = self.rows(table.id).try_collect().await?;
            let count = rows.len();
            let keyed = rows_by_id(rows)?;

            let path = options.file_path(&table.name);
            write_json_file(&path, &keyed, options.indent()).await?;
            info!("Wrote {} rows of '{}' to {}", count, table.name, path.display());
            written.push(path);
        }

        Ok(written)
    }
}
