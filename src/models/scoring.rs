//! Scoring helpers shared by the keyword-based models.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use super::traits::Embeddings;
use crate::types::LabelScore;
use crate::{MimirError, Result};

/// Minimum cosine similarity for an embedding neighbour to count as a keyword hit.
const NEIGHBOUR_THRESHOLD: f64 = 0.5;

/// Numerically stable softmax. Empty input gives empty output.
pub(crate) fn softmax(values: &[f64]) -> Vec<f64> {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    let exps: Vec<f64> = values.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Cosine similarity; `0.0` when either vector has no magnitude or the
/// dimensions differ.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

/// A labelled set of weighted keywords (a category or an intent).
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSet {
    pub id: String,
    pub keywords: HashMap<String, f64>,
}

/// Scores a bag of words against keyword sets.
///
/// A word contributes the weight of a matching keyword. With embeddings, a
/// word with no exact match contributes its best similarity to any keyword
/// (above [`NEIGHBOUR_THRESHOLD`]) times that keyword's weight.
pub(crate) struct KeywordScorer {
    sets: Vec<KeywordSet>,
    embeddings: Option<Arc<dyn Embeddings>>,
}

impl KeywordScorer {
    pub(crate) fn new(sets: Vec<KeywordSet>, what: &str) -> Result<Self> {
        if sets.is_empty() {
            return Err(MimirError::Configuration(format!("{what} model has no entries")));
        }
        let sets = sets
            .into_iter()
            .map(|set| KeywordSet {
                id: set.id,
                keywords: set
                    .keywords
                    .into_iter()
                    .map(|(k, w)| (k.to_lowercase(), w))
                    .collect(),
            })
            .collect();
        Ok(Self {
            sets,
            embeddings: None,
        })
    }

    pub(crate) fn with_embeddings(mut self, embeddings: Arc<dyn Embeddings>) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    /// Softmax distribution over the sets, in model order.
    pub(crate) fn distribution(&self, words: &[String]) -> Vec<LabelScore> {
        let raw: Vec<f64> = self
            .sets
            .iter()
            .map(|set| words.iter().map(|w| self.word_weight(set, w)).sum())
            .collect();
        self.sets
            .iter()
            .zip(softmax(&raw))
            .map(|(set, score)| LabelScore::new(set.id.clone(), score))
            .collect()
    }

    fn word_weight(&self, set: &KeywordSet, word: &str) -> f64 {
        if let Some(weight) = set.keywords.get(word) {
            return *weight;
        }
        let Some(embeddings) = &self.embeddings else {
            return 0.0;
        };
        let Some(vector) = embeddings.vector(word) else {
            return 0.0;
        };
        set.keywords
            .iter()
            .filter_map(|(keyword, weight)| {
                let similarity = cosine(vector, embeddings.vector(keyword)?);
                (similarity >= NEIGHBOUR_THRESHOLD).then_some(similarity * weight)
            })
            .fold(0.0, f64::max)
    }
}
