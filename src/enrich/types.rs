//! Enrichment types

use std::fmt;

/// Value written to the target field when a lookup fails
pub const NOT_AVAILABLE: &str = "N/A";

/// Identifier systems a source field can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Gemeinsame Normdatei authority record
    Gnd,
    /// GeoNames place
    GeoNames,
}

impl IdentifierKind {
    /// Wikidata property that stores this identifier
    pub fn wikidata_property(&self) -> &'static str {
        match self {
            Self::Gnd => "P227",
            Self::GeoNames => "P1566",
        }
    }

    /// Canonical URI prefix of this identifier system
    pub fn uri_prefix(&self) -> &'static str {
        match self {
            Self::Gnd => "https://d-nb.info/gnd/",
            Self::GeoNames => "https://sws.geonames.org/",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gnd => write!(f, "GND"),
            Self::GeoNames => write!(f, "GeoNames"),
        }
    }
}

/// An identifier reduced to its bare canonical form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedId {
    pub kind: IdentifierKind,
    pub id: String,
}

impl NormalizedId {
    /// Canonical URI, e.g. `https://d-nb.info/gnd/118540238/`
    pub fn uri(&self) -> String {
        format!("{}{}/", self.kind.uri_prefix(), self.id)
    }
}

impl fmt::Display for NormalizedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Which table and fields an enrichment run reads and writes
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub table_id: u64,
    pub kind: IdentifierKind,
    /// Field holding the identifier to resolve
    pub source_field: String,
    /// Field receiving the resolved identifier
    pub target_field: String,
    /// Also process rows whose target field is already filled
    pub overwrite: bool,
}

impl EnrichConfig {
    /// Enrich `table_id`, reading `source_field` and writing `target_field`
    pub fn new(
        table_id: u64,
        kind: IdentifierKind,
        source_field: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        Self {
            table_id,
            kind,
            source_field: source_field.into(),
            target_field: target_field.into(),
            overwrite: false,
        }
    }

    /// Process rows whose target field already has a value
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Counts of an enrichment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Rows patched with a resolved identifier
    pub resolved: usize,
    /// Rows patched with [`NOT_AVAILABLE`]
    pub failed: usize,
    /// Rows left untouched
    pub skipped: usize,
}

impl EnrichReport {
    /// Rows seen
    pub fn total(&self) -> usize {
        self.resolved + self.failed + self.skipped
    }
}
