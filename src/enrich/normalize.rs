//! Identifier normalization
//!
//! Source fields hold identifiers as typed by people: bare ids, URIs of
//! either scheme, portal pages with trailing paths. All of them reduce to the
//! bare id.

use super::types::{IdentifierKind, NormalizedId};
use regex::Regex;
use std::sync::LazyLock;

/// GND ids: digits, optionally hyphenated, optionally ending in a check `X`
static GND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://(?:www\.)?d-nb\.info/gnd/)?(\d[\dx-]*)(?:/.*)?$").unwrap()
});

static GEONAMES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://(?:www\.|sws\.)?geonames\.org/)?(\d+)(?:/.*)?$").unwrap()
});

/// Reduce a raw field value to a bare identifier, or `None` if it is not one
pub fn normalize(kind: IdentifierKind, raw: &str) -> Option<NormalizedId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let regex = match kind {
        IdentifierKind::Gnd => &*GND_REGEX,
        IdentifierKind::GeoNames => &*GEONAMES_REGEX,
    };

    let id = regex.captures(raw)?.get(1)?.as_str().to_uppercase();
    Some(NormalizedId { kind, id })
}
