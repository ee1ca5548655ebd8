//! Common types used throughout the Baserow client
//!
//! Type aliases for the JSON shapes exchanged with the API, and the tagged
//! outcome types returned by structural mutations.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One table row, keyed by field name. Always carries a numeric `id`
/// when it comes from the server.
pub type Row = JsonObject;

/// Read the numeric `id` of a row
pub fn row_id(row: &Row) -> Option<u64> {
    row.get("id").and_then(JsonValue::as_u64)
}

// ============================================================================
// Backoff
// ============================================================================

/// Delay growth between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Search
// ============================================================================

/// Lookup operator used in `filter__field_<id>__<operator>` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
    /// Substring match
    #[default]
    Contains,
    /// Exact match
    Equal,
}

impl Lookup {
    /// Operator name as it appears in the query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Contains => "contains",
            Lookup::Equal => "equal",
        }
    }

    /// Build the filter parameter name for a field id
    pub fn filter_param(&self, field_id: u64) -> String {
        format!("filter__field_{field_id}__{}", self.as_str())
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Mutation Outcomes
// ============================================================================

/// Result of a structural mutation (create/delete of tables and fields)
///
/// A rejected request is not an `Err`: the caller branches on
/// [`Outcome::is_applied`]. Transport and protocol failures still surface
/// through the surrounding `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The server accepted the mutation
    Applied(T),
    /// The server answered with a non-success status
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
}

impl<T> Outcome<T> {
    /// Success flag
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Borrow the payload of an applied mutation
    pub fn applied(&self) -> Option<&T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Rejected { .. } => None,
        }
    }

    /// Status code of a rejected mutation
    pub fn rejected_status(&self) -> Option<u16> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected { status, .. } => Some(*status),
        }
    }

    /// Convert into the error path, mapping a rejection to [`Error::Api`]
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Applied(value) => Ok(value),
            Self::Rejected { status, body } => Err(Error::api(status, body)),
        }
    }

    /// Map the applied payload
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Applied(value) => Outcome::Applied(f(value)),
            Self::Rejected { status, body } => Outcome::Rejected { status, body },
        }
    }
}

/// Outcome of one item in a batch of mutations, tagged with the item's name
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome<T> {
    /// Name of the table or field the request was about
    pub name: String,
    /// What the server did with it
    pub outcome: Outcome<T>,
}

impl<T> ItemOutcome<T> {
    /// Create a new item outcome
    pub fn new(name: impl Into<String>, outcome: Outcome<T>) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    /// Success flag of the wrapped outcome
    pub fn is_applied(&self) -> bool {
        self.outcome.is_applied()
    }
}

/// True when every item in a batch was applied
pub fn all_applied<T>(items: &[ItemOutcome<T>]) -> bool {
    items.iter().all(ItemOutcome::is_applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_filter_param() {
        assert_eq!(
            Lookup::Contains.filter_param(631_801),
            "filter__field_631801__contains"
        );
        assert_eq!(Lookup::Equal.filter_param(7), "filter__field_7__equal");
        assert_eq!(Lookup::default(), Lookup::Contains);
    }

    #[test]
    fn test_row_id() {
        let row = json!({"id": 12, "Name": "Susi"});
        assert_eq!(row_id(row.as_object().unwrap()), Some(12));

        let row = json!({"Name": "Susi"});
        assert_eq!(row_id(row.as_object().unwrap()), None);
    }

    #[test]
    fn test_outcome_applied() {
        let outcome = Outcome::Applied(5);
        assert!(outcome.is_applied());
        assert_eq!(outcome.applied(), Some(&5));
        assert_eq!(outcome.rejected_status(), None);
        assert_eq!(outcome.map(|v| v * 2).into_result().unwrap(), 10);
    }

    #[test]
    fn test_outcome_rejected() {
        let outcome: Outcome<()> = Outcome::Rejected {
            status: 404,
            body: "missing".to_string(),
        };
        assert!(!outcome.is_applied());
        assert_eq!(outcome.rejected_status(), Some(404));

        let err = outcome.into_result().unwrap_err();
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }

    #[test]
    fn test_all_applied() {
        let items = vec![
            ItemOutcome::new("a", Outcome::Applied(())),
            ItemOutcome::new(
                "b",
                Outcome::Rejected {
                    status: 400,
                    body: String::new(),
                },
            ),
        ];
        assert!(!all_applied(&items));
        assert!(all_applied(&items[..1]));
    }
}
