//! Pagination types
//!
//! The page envelope returned by Baserow list endpoints and the small state
//! record a cursor keeps between pages.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Row};
use serde::{Deserialize, Serialize};

/// Keys every page must carry
const REQUIRED_PAGE_KEYS: [&str; 2] = ["next", "results"];

/// One page of rows
///
/// ```json
/// { "count": 5, "next": "https://.../?page=2", "previous": null, "results": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Total number of matching rows (search results)
    #[serde(default)]
    pub count: Option<u64>,
    /// Absolute URL of the following page
    pub next: Option<String>,
    /// Absolute URL of the preceding page
    #[serde(default)]
    pub previous: Option<String>,
    /// Rows on this page, in server order
    pub results: Vec<Row>,
}

impl Page {
    /// Parse a page, failing loudly when `next` or `results` is absent
    ///
    /// A missing key means the server did not answer with a page at all, so
    /// it is reported as a protocol violation instead of an empty result.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::protocol("page is not a JSON object"))?;

        for key in REQUIRED_PAGE_KEYS {
            if !object.contains_key(key) {
                return Err(Error::protocol(format!("page is missing key '{key}'")));
            }
        }

        serde_json::from_value(value).map_err(|e| Error::protocol(format!("malformed page: {e}")))
    }

    /// Whether the server reported a following page
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// Result of processing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this URL next
    Url(String),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Tracks pagination progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Rows received so far
    pub rows_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received page
    pub fn add_page(&mut self, rows: usize) {
        self.pages_fetched += 1;
        self.rows_fetched += rows as u64;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}
