//! Gazetteer token labeler.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::phrase::PhraseMatcher;
use super::traits::Labeler;
use crate::Result;
use crate::types::Token;

/// Serialized labeler model.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelerModel {
    /// Phrase to entity label (without BIO prefix).
    pub entries: BTreeMap<String, String>,
    #[serde(default = "default_outside")]
    pub outside: String,
}

fn default_outside() -> String {
    "O".to_string()
}

/// Labels known phrases with `B-`/`I-` tags and everything else as outside.
pub struct GazetteerLabeler {
    matcher: PhraseMatcher<String>,
    outside: String,
}

impl GazetteerLabeler {
    pub fn new(model: LabelerModel) -> Self {
        Self {
            matcher: PhraseMatcher::new(model.entries),
            outside: model.outside,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(loader::read_json(path)?))
    }
}

impl Labeler for GazetteerLabeler {
    fn label(&self, tokens: &[Token]) -> Result<Vec<String>> {
        let mut labels = vec![self.outside.clone(); tokens.len()];
        for m in self.matcher.find(tokens) {
            labels[m.start] = format!("B-{}", m.value);
            for label in &mut labels[m.start + 1..m.start + m.len] {
                *label = format!("I-{}", m.value);
            }
        }
        Ok(labels)
    }
}

/// Token spans of `B-`/`I-` runs whose entity is `entity`.
///
/// Returns `(first, last)` token indices, inclusive.
pub(crate) fn labeled_spans(labels: &[String], entity: &str) -> Vec<(usize, usize)> {
    let begin = format!("B-{entity}");
    let inside = format!("I-{entity}");
    let mut spans = Vec::new();
    let mut open: Option<(usize, usize)> = None;

    for (i, label) in labels.iter().enumerate() {
        if *label == begin || (*label == inside && open.is_none()) {
            spans.extend(open.take());
            open = Some((i, i));
        } else if *label == inside {
            if let Some(span) = open.as_mut() {
                span.1 = i;
            }
        } else {
            spans.extend(open.take());
        }
    }
    spans.extend(open);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::text::split_tokens;

    #[test]
    fn labels_phrases_in_bio_form() {
        let labeler = GazetteerLabeler::new(LabelerModel {
            entries: BTreeMap::from([
                ("New York".to_string(), "LOC".to_string()),
                ("Ada".to_string(), "PER".to_string()),
            ]),
            outside: default_outside(),
        });
        let labels = labeler
            .label(&split_tokens("Ada moved to New York ."))
            .unwrap();
        assert_eq!(labels, ["B-PER", "O", "O", "B-LOC", "I-LOC", "O"]);
    }

    #[test]
    fn spans_follow_bio_runs() {
        let labels: Vec<String> = ["B-LOC", "I-LOC", "O", "I-LOC", "B-LOC", "B-PER"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(labeled_spans(&labels, "LOC"), [(0, 1), (3, 3), (4, 4)]);
    }
}
