//! Keyword intents with phrase-matched slots.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::phrase::PhraseMatcher;
use super::scoring::{KeywordScorer, KeywordSet};
use super::traits::FrameExtractor;
use crate::types::{Frame, SlotFill, Token, top};
use crate::{MimirError, Result};

/// Serialized frame model.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameModel {
    pub intents: Vec<KeywordSet>,
    /// Slot name to the values it accepts.
    #[serde(default)]
    pub slots: BTreeMap<String, Vec<String>>,
}

pub struct PatternFrameExtractor {
    intents: KeywordScorer,
    slots: PhraseMatcher<String>,
}

impl PatternFrameExtractor {
    pub fn new(model: FrameModel) -> Result<Self> {
        let slots = model
            .slots
            .into_iter()
            .flat_map(|(slot, values)| values.into_iter().map(move |v| (v, slot.clone())));
        Ok(Self {
            intents: KeywordScorer::new(model.intents, "frame")?,
            slots: PhraseMatcher::new(slots),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(loader::read_json(path)?)
    }
}

impl FrameExtractor for PatternFrameExtractor {
    fn extract(&self, tokens: &[Token]) -> Result<Frame> {
        let words: Vec<String> = tokens
            .iter()
            .filter(|t| t.is_word())
            .map(Token::lowercase)
            .collect();
        let distribution = self.intents.distribution(&words);
        let best = top(&distribution)
            .cloned()
            .ok_or_else(|| MimirError::Model("frame model produced no intents".to_string()))?;

        let slots = self
            .slots
            .find(tokens)
            .into_iter()
            .map(|m| {
                let span = &tokens[m.start..m.start + m.len];
                SlotFill {
                    slot: m.value.clone(),
                    value: span
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    start: span[0].start,
                    end: span[span.len() - 1].end,
                }
            })
            .collect();

        Ok(Frame {
            intent: best.label,
            confidence: best.score,
            distribution: Some(distribution),
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::text::split_tokens;

    #[test]
    fn finds_intent_and_slots() {
        let extractor = PatternFrameExtractor::new(FrameModel {
            intents: vec![
                KeywordSet {
                    id: "book_flight".into(),
                    keywords: HashMap::from([("flight".into(), 2.0), ("fly".into(), 1.0)]),
                },
                KeywordSet {
                    id: "weather".into(),
                    keywords: HashMap::from([("rain".into(), 2.0)]),
                },
            ],
            slots: BTreeMap::from([(
                "city".to_string(),
                vec!["Paris".to_string(), "New York".to_string()],
            )]),
        })
        .unwrap();

        let frame = extractor
            .extract(&split_tokens("A flight from new york to Paris"))
            .unwrap();
        assert_eq!(frame.intent, "book_flight");
        assert_eq!(frame.slots.len(), 2);
        assert_eq!(frame.slots[0].value, "new york");
        assert_eq!((frame.slots[0].start, frame.slots[0].end), (14, 22));
        assert_eq!(frame.slots[1].slot, "city");
    }
}
