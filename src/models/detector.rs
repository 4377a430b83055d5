//! Character-trigram language detector.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::scoring::softmax;
use super::traits::LanguageDetector;
use crate::types::{Language, LanguageScore};
use crate::{MimirError, Result};

/// Serialized detector model: per-language trigram frequencies.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorModel {
    pub profiles: BTreeMap<String, HashMap<String, f64>>,
}

struct Profile {
    language: Language,
    counts: HashMap<String, f64>,
    total: f64,
}

/// Naive Bayes over character trigrams with add-one smoothing.
pub struct TrigramDetector {
    profiles: Vec<Profile>,
    vocabulary: f64,
}

impl TrigramDetector {
    pub fn new(model: DetectorModel) -> Result<Self> {
        if model.profiles.is_empty() {
            return Err(MimirError::Configuration(
                "language detector has no profiles".to_string(),
            ));
        }

        let mut vocabulary = HashSet::new();
        let mut profiles = Vec::with_capacity(model.profiles.len());
        for (code, counts) in model.profiles {
            let language = Language::from_code(&code).ok_or_else(|| {
                MimirError::Configuration(format!(
                    "language detector profile '{code}' is not an ISO 639-1 code"
                ))
            })?;
            let counts: HashMap<String, f64> = counts
                .into_iter()
                .map(|(gram, n)| (gram.to_lowercase(), n.max(0.0)))
                .collect();
            vocabulary.extend(counts.keys().cloned());
            profiles.push(Profile {
                language,
                total: counts.values().sum(),
                counts,
            });
        }

        Ok(Self {
            profiles,
            vocabulary: vocabulary.len().max(1) as f64,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(loader::read_json(path)?)
    }

    fn log_likelihood(&self, profile: &Profile, grams: &[String]) -> f64 {
        let denominator = profile.total + self.vocabulary;
        grams
            .iter()
            .map(|g| {
                let count = profile.counts.get(g).copied().unwrap_or(0.0);
                ((count + 1.0) / denominator).ln()
            })
            .sum()
    }
}

impl LanguageDetector for TrigramDetector {
    fn languages(&self) -> Vec<Language> {
        self.profiles.iter().map(|p| p.language).collect()
    }

    fn detect(&self, text: &str) -> Result<Vec<LanguageScore>> {
        let grams = trigrams(text);
        let likelihoods: Vec<f64> = self
            .profiles
            .iter()
            .map(|p| self.log_likelihood(p, &grams))
            .collect();

        let mut scores: Vec<LanguageScore> = self
            .profiles
            .iter()
            .zip(softmax(&likelihoods))
            .map(|(p, score)| LanguageScore {
                language: p.language,
                score,
            })
            .collect();
        scores.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.language.cmp(&b.language))
        });
        Ok(scores)
    }
}

/// Trigrams of the text with non-letters collapsed to single spaces and
/// padded on both sides.
fn trigrams(text: &str) -> Vec<String> {
    let mut normalized = vec![' '];
    for c in text.chars() {
        if c.is_alphabetic() {
            normalized.extend(c.to_lowercase());
        } else if normalized.last() != Some(&' ') {
            normalized.push(' ');
        }
    }
    if normalized.last() != Some(&' ') {
        normalized.push(' ');
    }

    normalized
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
