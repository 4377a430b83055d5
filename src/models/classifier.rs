//! Keyword classifier.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::loader;
use super::scoring::{KeywordScorer, KeywordSet};
use super::traits::{Classifier, Embeddings};
use crate::types::Classification;
use crate::{MimirError, Result};

/// Serialized classifier model.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierModel {
    pub categories: Vec<KeywordSet>,
}

pub struct KeywordClassifier {
    scorer: KeywordScorer,
}

impl KeywordClassifier {
    pub fn new(model: ClassifierModel) -> Result<Self> {
        Ok(Self {
            scorer: KeywordScorer::new(model.categories, "classifier")?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(loader::read_json(path)?)
    }

    /// Let words near a keyword in embedding space count towards it.
    pub fn with_embeddings(self, embeddings: Arc<dyn Embeddings>) -> Self {
        Self {
            scorer: self.scorer.with_embeddings(embeddings),
        }
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, words: &[String]) -> Result<Classification> {
        Classification::from_distribution(self.scorer.distribution(words))
            .ok_or_else(|| MimirError::Model("classifier produced no categories".to_string()))
    }
}
