//! Gazetteer locations.

use serde::{Deserialize, Serialize};

/// A known place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub population: u64,
    /// Alternative names, any language.
    #[serde(default, skip_serializing)]
    pub aliases: Vec<String>,
}

/// A candidate mention resolved to a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMatch {
    pub candidate: String,
    /// Span of the mention; absent when the caller supplied the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    pub location: Location,
}
