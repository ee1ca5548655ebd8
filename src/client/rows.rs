//! Row streaming, search and mutation

use super::{batch_rows_path, row_path, rows_path, BaserowClient, GetOrCreate};
use crate::error::{Error, Result};
use crate::pagination::{row_stream, Page, RowCursor, RowStream};
use crate::schema::SchemaCache;
use crate::types::{JsonValue, Lookup, Row};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};

const USER_FIELD_NAMES: (&str, &str) = ("user_field_names", "true");

impl BaserowClient {
    /// Stream every row of a table
    pub fn rows(&self, table_id: u64) -> RowStream<'_> {
        self.rows_filtered(table_id, std::iter::empty::<(&str, &str)>())
    }

    /// Stream the rows of a table matching raw filter parameters
    ///
    /// Filters are appended to the first request as `&key=value`, unescaped.
    /// Nothing is requested until the stream is polled.
    pub fn rows_filtered<I, K, V>(&self, table_id: u64, filters: I) -> RowStream<'_>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let cursor = RowCursor::new(&rows_path(table_id), filters);
        row_stream(&self.http, self.row_request(), cursor)
    }

    /// First page of rows whose field `field_id` matches `query`
    pub async fn search_rows(
        &self,
        table_id: u64,
        query: &str,
        field_id: u64,
        lookup: Lookup,
    ) -> Result<Page> {
        let request = self
            .row_request()
            .query(USER_FIELD_NAMES.0, USER_FIELD_NAMES.1)
            .query(lookup.filter_param(field_id), query);

        debug!("Searching table {} for {} '{}'", table_id, lookup, query);
        let body: JsonValue = self
            .http
            .request_json(Method::GET, &rows_path(table_id), request)
            .await?;
        Page::from_value(body)
    }

    /// Create one row keyed by field names; returns the stored row
    pub async fn create_row(&self, table_id: u64, row: &JsonValue) -> Result<Row> {
        let request = self
            .row_request()
            .query(USER_FIELD_NAMES.0, USER_FIELD_NAMES.1)
            .json(row.clone());
        self.http
            .request_json(Method::POST, &rows_path(table_id), request)
            .await
    }

    /// Update some fields of one row; returns the updated row
    pub async fn patch_row(&self, table_id: u64, row_id: u64, fields: &JsonValue) -> Result<Row> {
        let request = self
            .row_request()
            .query(USER_FIELD_NAMES.0, USER_FIELD_NAMES.1)
            .json(fields.clone());
        self.http
            .request_json(Method::PATCH, &row_path(table_id, row_id), request)
            .await
    }

    /// Update several rows in one request
    ///
    /// Each item is `{"id": <row id>, <field>: <value>, ...}`. Unknown ids are
    /// reported by the server as an [`Error::Api`].
    pub async fn batch_update_rows(&self, table_id: u64, items: &[JsonValue]) -> Result<Vec<Row>> {
        let request = self
            .row_request()
            .query(USER_FIELD_NAMES.0, USER_FIELD_NAMES.1)
            .json(json!({ "items": items }));

        let mut body: JsonValue = self
            .http
            .request_json(Method::PATCH, &batch_rows_path(table_id), request)
            .await?;

        let updated = body
            .get_mut("items")
            .map(JsonValue::take)
            .ok_or_else(|| Error::protocol("batch response is missing key 'items'"))?;
        serde_json::from_value(updated)
            .map_err(|e| Error::protocol(format!("malformed batch response: {e}")))
    }

    /// Find the row whose `field_name` equals `query`, creating it if absent
    ///
    /// Several matches are reported as [`GetOrCreate::Ambiguous`] and leave
    /// the table untouched.
    pub async fn get_or_create(
        &self,
        schema: &SchemaCache,
        table_name: &str,
        field_name: &str,
        query: &str,
    ) -> Result<GetOrCreate> {
        let table_id = schema.table_id(table_name)?;
        let field_id = schema.field_id(table_name, field_name)?;

        let page = self
            .search_rows(table_id, query, field_id, Lookup::Equal)
            .await?;
        let count = page.count.unwrap_or(page.results.len() as u64);

        match count {
            0 => {
                let row = self
                    .create_row(table_id, &json!({ field_name: query }))
                    .await?;
                info!("Created row in '{}' for {} = '{}'", table_name, field_name, query);
                Ok(GetOrCreate::Created(row))
            }
            1 => match page.results.into_iter().next() {
                Some(row) => Ok(GetOrCreate::Found(row)),
                None => Err(Error::protocol("search reported one match but returned no rows")),
            },
            _ => {
                warn!(
                    "{} rows in '{}' have {} = '{}', not creating another",
                    count, table_name, field_name, query
                );
                Ok(GetOrCreate::Ambiguous {
                    count,
                    rows: page.results,
                })
            }
        }
    }
}
