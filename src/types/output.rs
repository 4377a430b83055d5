//! Command outputs for language-resolved commands.
//!
//! Score distributions are opt-in: a `None` distribution is dropped from the
//! encoded output rather than rendered as an empty value.

use serde::Serialize;

use super::{
    Language, LanguageScore, LocationMatch, ParsedSentence, Sentence, Similarity, Summary, Token,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<LanguageScore>>,
}

/// Language detected for a single token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenLanguage {
    #[serde(flatten)]
    pub token: Token,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<LanguageScore>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tokenized {
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<LanguageScore>>,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed {
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<LanguageScore>>,
    pub sentences: Vec<ParsedSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locations {
    pub locations: Vec<LocationMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub language: Language,
    /// Candidates by descending score.
    pub results: Vec<Similarity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summarized {
    pub language: Language,
    #[serde(flatten)]
    pub summary: Summary,
}
