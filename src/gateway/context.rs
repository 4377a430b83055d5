//! Per-request inputs.

/// What one command invocation works on.
///
/// Built per request and never shared between requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub text: String,
    /// Caller-forced ISO 639-1 code; skips detection.
    pub language: Option<String>,
    /// Caller-chosen domain; without one, domain commands fan out.
    pub domain: Option<String>,
    /// Include full score distributions in the output.
    pub distribution: bool,
}

impl RequestContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    pub fn domain(mut self, name: impl Into<String>) -> Self {
        self.domain = Some(name.into());
        self
    }

    pub fn with_distribution(mut self) -> Self {
        self.distribution = true;
        self
    }
}
