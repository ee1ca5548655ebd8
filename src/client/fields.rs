//! Field listing and mutation

use super::{field_path, table_fields_path, BaserowClient};
use crate::error::Result;
use crate::schema::{validate_fields, Field};
use crate::types::{ItemOutcome, JsonValue, Outcome};
use reqwest::Method;
use std::collections::HashSet;
use tracing::{info, warn};

impl BaserowClient {
    /// All fields of a table, in server order
    pub async fn list_fields(&self, table_id: u64) -> Result<Vec<Field>> {
        let request = self.structural_request()?;
        self.http
            .request_json(Method::GET, &table_fields_path(table_id), request)
            .await
    }

    /// Create fields one request at a time
    ///
    /// Every descriptor is validated before the first request; a single
    /// invalid descriptor aborts the whole batch with [`crate::Error::Validation`].
    /// Returns one outcome per descriptor, in input order.
    pub async fn create_fields(
        &self,
        table_id: u64,
        fields: &[JsonValue],
    ) -> Result<Vec<ItemOutcome<Field>>> {
        validate_fields(fields)?;

        let path = table_fields_path(table_id);
        let mut outcomes = Vec::with_capacity(fields.len());

        for descriptor in fields {
            let name = descriptor
                .get("name")
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string();

            let request = self.structural_request()?.json(descriptor.clone());
            let outcome = self
                .http
                .outcome_json::<Field>(Method::POST, &path, request)
                .await?;

            match &outcome {
                Outcome::Applied(field) => info!("Created field '{}' ({})", field.name, field.id),
                Outcome::Rejected { status, .. } => {
                    warn!("Creating field '{}' failed with status {}", name, status)
                }
            }
            outcomes.push(ItemOutcome::new(name, outcome));
        }

        Ok(outcomes)
    }

    /// Delete every field of a table whose name is in `names`
    ///
    /// Names that match no field are ignored. Returns one outcome per deleted
    /// field, in the table's field order; an applied outcome carries the
    /// server's response (related fields that changed).
    pub async fn delete_fields<S: AsRef<str>>(
        &self,
        table_id: u64,
        names: &[S],
    ) -> Result<Vec<ItemOutcome<JsonValue>>> {
        let wanted: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        let fields = self.list_fields(table_id).await?;
        let mut outcomes = Vec::new();

        for field in fields.into_iter().filter(|f| wanted.contains(f.name.as_str())) {
            let request = self.structural_request()?;
            let outcome = self
                .http
                .outcome_json::<JsonValue>(Method::DELETE, &field_path(field.id), request)
                .await?;

            if outcome.is_applied() {
                info!("Deleted field '{}' ({}) of table {}", field.name, field.id, table_id);
            }
            outcomes.push(ItemOutcome::new(field.name, outcome));
        }

        Ok(outcomes)
    }
}
