//! Reconciliation services
//!
//! A [`Reconciler`] maps a normalized identifier to an identifier in another
//! system. [`WikidataReconciler`] answers with the URI of the Wikidata entity
//! that carries the identifier.

use super::types::NormalizedId;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

/// Public Wikidata SPARQL endpoint
pub const WIKIDATA_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Resolves identifiers against an external service
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// Resolved identifier for `id`, or an error if the service has none
    async fn resolve(&self, id: &NormalizedId) -> Result<String>;
}

/// Looks identifiers up through a Wikidata SPARQL endpoint
#[derive(Debug, Clone)]
pub struct WikidataReconciler {
    http: HttpClient,
    endpoint: String,
}

impl WikidataReconciler {
    /// Reconciler for the public endpoint
    pub fn new() -> Result<Self> {
        Self::with_endpoint(WIKIDATA_SPARQL_ENDPOINT)
    }

    /// Reconciler for another SPARQL endpoint with the same data model
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let http = HttpClient::with_config(HttpClientConfig::default())?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint queried by this reconciler
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// SPARQL query for the entity whose `property` equals `id`
pub fn sparql_query(id: &NormalizedId) -> String {
    format!(
        "SELECT ?item WHERE {{ ?item wdt:{} \"{}\" . }} LIMIT 1",
        id.kind.wikidata_property(),
        id.id
    )
}

/// First `?item` binding of a SPARQL JSON result
fn first_item(body: &JsonValue) -> Result<Option<String>> {
    let bindings = body
        .pointer("/results/bindings")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::protocol("SPARQL response has no results.bindings"))?;

    Ok(bindings
        .first()
        .and_then(|binding| binding.pointer("/item/value"))
        .and_then(JsonValue::as_str)
        .map(str::to_string))
}

#[async_trait]
impl Reconciler for WikidataReconciler {
    async fn resolve(&self, id: &NormalizedId) -> Result<String> {
        let request = RequestConfig::new()
            .query("query", sparql_query(id))
            .query("format", "json")
            .header("Accept", "application/sparql-results+json");

        debug!("Resolving {} via {}", id, self.endpoint);
        let body: JsonValue = self
            .http
            .request_json(Method::GET, &self.endpoint, request)
            .await?;

        first_item(&body)?.ok_or_else(|| Error::Other(format!("no Wikidata entity for {id}")))
    }
}
