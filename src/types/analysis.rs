//! Result types for parsing, classification, frame extraction and labeling.

use serde::Serialize;

use super::{Domain, Token};

/// One token of a dependency parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedToken {
    /// 1-based position in the sentence.
    pub id: usize,
    pub form: String,
    /// Part-of-speech tag.
    pub tag: String,
    /// Id of the governor, `0` for the root.
    pub head: usize,
    /// Dependency label.
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSentence {
    pub tokens: Vec<ParsedToken>,
}

/// Score of one label (category or intent) in a distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Top category of a text, with the optional full distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<LabelScore>>,
}

impl Classification {
    /// Pick the best-scoring label; ties go to the earliest entry.
    ///
    /// The full distribution is kept; callers drop it with
    /// [`Classification::without_distribution`] unless it was requested.
    pub fn from_distribution(distribution: Vec<LabelScore>) -> Option<Self> {
        let best = top(&distribution)?;
        Some(Self {
            category: best.label.clone(),
            confidence: best.score,
            distribution: Some(distribution),
        })
    }

    pub fn without_distribution(mut self) -> Self {
        self.distribution = None;
        self
    }
}

/// A slot value found in the text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotFill {
    pub slot: String,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Intent and slots extracted from a text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub intent: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<LabelScore>>,
    pub slots: Vec<SlotFill>,
}

impl Frame {
    pub fn without_distribution(mut self) -> Self {
        self.distribution = None;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledToken {
    #[serde(flatten)]
    pub token: Token,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labels {
    pub tokens: Vec<LabeledToken>,
}

/// A per-domain result tagged with the domain that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tagged<T> {
    pub domain: Domain,
    #[serde(flatten)]
    pub result: T,
}

/// Output of a domain-keyed command: one result for an explicit domain,
/// or one tagged result per loaded domain when none was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainOutput<T> {
    Single(Tagged<T>),
    FanOut(Vec<Tagged<T>>),
}

impl<T> DomainOutput<T> {
    /// All tagged results, regardless of shape.
    pub fn results(&self) -> &[Tagged<T>] {
        match self {
            Self::Single(one) => std::slice::from_ref(one),
            Self::FanOut(all) => all,
        }
    }
}

pub(crate) fn top(distribution: &[LabelScore]) -> Option<&LabelScore> {
    distribution
        .iter()
        .reduce(|best, s| if s.score > best.score { s } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_first_label() {
        let c = Classification::from_distribution(vec![
            LabelScore::new("a", 0.5),
            LabelScore::new("b", 0.5),
        ])
        .unwrap();
        assert_eq!(c.category, "a");
    }

    #[test]
    fn dropped_distribution_is_not_serialized() {
        let c = Classification::from_distribution(vec![LabelScore::new("a", 1.0)])
            .unwrap()
            .without_distribution();
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("distribution").is_none());
    }

    #[test]
    fn tagged_results_flatten_the_domain() {
        let tagged = Tagged {
            domain: Domain::new("news"),
            result: Labels { tokens: Vec::new() },
        };
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["domain"], "news");
        assert!(json["tokens"].as_array().unwrap().is_empty());
    }
}
