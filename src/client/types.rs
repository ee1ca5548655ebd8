//! Result types of higher-level client operations

use crate::types::Row;

/// What [`crate::BaserowClient::get_or_create`] did
#[derive(Debug, Clone, PartialEq)]
pub enum GetOrCreate {
    /// Exactly one row matched
    Found(Row),
    /// Nothing matched, so a row was created
    Created(Row),
    /// Several rows matched; nothing was created
    Ambiguous {
        /// Number of matches reported by the server
        count: u64,
        /// Matches on the first result page
        rows: Vec<Row>,
    },
}

impl GetOrCreate {
    /// Whether a new row was created
    pub fn created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Whether the lookup was ambiguous
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// The single found or created row
    pub fn row(&self) -> Option<&Row> {
        match self {
            Self::Found(row) | Self::Created(row) => Some(row),
            Self::Ambiguous { .. } => None,
        }
    }

    /// Take the single found or created row
    pub fn into_row(self) -> Option<Row> {
        match self {
            Self::Found(row) | Self::Created(row) => Some(row),
            Self::Ambiguous { .. } => None,
        }
    }
}
