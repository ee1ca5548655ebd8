//! Enrichment module
//!
//! Walks a table, resolves the identifier in one field through a
//! [`Reconciler`] and writes the result into another field. A failed lookup
//! writes [`NOT_AVAILABLE`] and the run continues with the next row.

mod normalize;
mod reconciler;
mod types;

pub use normalize::normalize;
pub use reconciler::{sparql_query, Reconciler, WikidataReconciler, WIKIDATA_SPARQL_ENDPOINT};
pub use types::{EnrichConfig, EnrichReport, IdentifierKind, NormalizedId, NOT_AVAILABLE};

use crate::client::BaserowClient;
use crate::error::Result;
use crate::types::{row_id, JsonValue, Row};
use futures::TryStreamExt;
use serde_json::json;
use tracing::{debug, info, warn};

/// Non-empty string value of a row field
fn text_value<'a>(row: &'a Row, field: &str) -> Option<&'a str> {
    row.get(field)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl BaserowClient {
    /// Resolve the identifiers of one table and patch the results back
    ///
    /// Rows with an empty source field, or (unless overwriting) a filled
    /// target field, are skipped. Lookup failures are written as
    /// [`NOT_AVAILABLE`]; errors of the Baserow API itself abort the run.
    pub async fn enrich_table(
        &self,
        config: &EnrichConfig,
        reconciler: &dyn Reconciler,
    ) -> Result<EnrichReport> {
        let mut report = EnrichReport::default();
        let mut rows = self.rows(config.table_id);

        while let Some(row) = rows.try_next().await? {
            let Some(id) = row_id(&row) else {
                warn!("Row without id in table {}, skipping", config.table_id);
                report.skipped += 1;
                continue;
            };

            let Some(raw) = text_value(&row, &config.source_field) else {
                report.skipped += 1;
                continue;
            };

            if !config.overwrite && text_value(&row, &config.target_field).is_some() {
                debug!("Row {} already has '{}'", id, config.target_field);
                report.skipped += 1;
                continue;
            }

            let resolved = match normalize(config.kind, raw) {
                Some(normalized) => match reconciler.resolve(&normalized).await {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!("Row {}: lookup of {} failed: {}", id, normalized, e);
                        None
                    }
                },
                None => {
                    warn!("Row {}: '{}' is not a {} identifier", id, raw, config.kind);
                    None
                }
            };

            let value = match resolved {
                Some(value) => {
                    report.resolved += 1;
                    value
                }
                None => {
                    report.failed += 1;
                    NOT_AVAILABLE.to_string()
                }
            };

            self.patch_row(config.table_id, id, &json!({ config.target_field.as_str(): value }))
                .await?;
        }

        info!(
            "Enriched table {}: {} resolved, {} failed, {} skipped",
            config.table_id, report.resolved, report.failed, report.skipped
        );
        Ok(report)
    }
}
