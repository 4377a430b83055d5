//! Capability slots and availability reporting.

use std::fmt;

use serde::Serialize;

/// A named capability slot of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    Tokenizer,
    LanguageDetector,
    Parser,
    Classifier,
    FrameExtractor,
    Labeler,
    LocationLabeler,
    Locations,
    Morphology,
    Embeddings,
    Comparator,
    Summarizer,
}

impl CapabilityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tokenizer => "tokenizer",
            Self::LanguageDetector => "language_detector",
            Self::Parser => "parser",
            Self::Classifier => "classifier",
            Self::FrameExtractor => "frame_extractor",
            Self::Labeler => "labeler",
            Self::LocationLabeler => "location_labeler",
            Self::Locations => "locations",
            Self::Morphology => "morphology",
            Self::Embeddings => "embeddings",
            Self::Comparator => "comparator",
            Self::Summarizer => "summarizer",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the registry can do, as reported by `GET /capabilities`.
///
/// Keyed capabilities list their keys; `None` means the capability is absent.
/// Singleton capabilities report presence only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Capabilities {
    pub tokenizer: Option<Vec<String>>,
    /// Languages the detector can recognise.
    pub language_detector: Option<Vec<String>>,
    pub parser: Option<Vec<String>>,
    pub classifier: Option<Vec<String>>,
    pub frame_extractor: Option<Vec<String>>,
    pub labeler: Option<Vec<String>>,
    pub location_labeler: bool,
    pub locations: bool,
    pub morphology: Option<Vec<String>>,
    pub embeddings: Option<Vec<String>>,
    pub comparator: Option<Vec<String>>,
    pub summarizer: Option<Vec<String>>,
}
