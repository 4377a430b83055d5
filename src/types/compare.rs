//! Text comparison request and result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-chosen identifier of a comparison candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One text to compare against the base text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub text: String,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Similarity of one candidate to the base text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Similarity {
    pub id: CandidateId,
    pub score: f64,
}
