//! Frequency-based extractive summarizer.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::traits::Summarizer;
use crate::Result;
use crate::types::{Itemset, Sentence, SentenceScore, Summary, TermScore, Token};

/// Serialized summarizer model.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerModel {
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Number of keywords to report.
    #[serde(default = "default_keywords")]
    pub keywords: usize,
    /// Sentences a keyword pair must share to form an itemset.
    #[serde(default = "default_min_support")]
    pub min_support: usize,
}

impl Default for SummarizerModel {
    fn default() -> Self {
        Self {
            stopwords: Vec::new(),
            keywords: default_keywords(),
            min_support: default_min_support(),
        }
    }
}

fn default_keywords() -> usize {
    10
}

fn default_min_support() -> usize {
    2
}

pub struct FrequencySummarizer {
    stopwords: HashSet<String>,
    keywords: usize,
    min_support: usize,
}

impl FrequencySummarizer {
    pub fn new(model: SummarizerModel) -> Self {
        Self {
            stopwords: model.stopwords.iter().map(|w| w.to_lowercase()).collect(),
            keywords: model.keywords,
            min_support: model.min_support.max(1),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(loader::read_json(path)?))
    }

    fn terms(&self, sentence: &Sentence) -> Vec<String> {
        sentence
            .tokens
            .iter()
            .filter(|t| t.is_word())
            .map(Token::lowercase)
            .filter(|w| !self.stopwords.contains(w))
            .collect()
    }

    fn itemsets(&self, keywords: &[String], terms: &[Vec<String>]) -> Vec<Itemset> {
        let keyword_set: HashSet<&str> = keywords.iter().map(String::as_str).collect();
        let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();

        for sentence in terms {
            let present: BTreeSet<&str> = sentence
                .iter()
                .map(String::as_str)
                .filter(|w| keyword_set.contains(w))
                .collect();
            let present: Vec<&str> = present.into_iter().collect();
            for (i, a) in present.iter().enumerate() {
                for b in &present[i + 1..] {
                    *pairs.entry((a.to_string(), b.to_string())).or_default() += 1;
                }
            }
        }

        let mut itemsets: Vec<Itemset> = pairs
            .into_iter()
            .filter(|(_, support)| *support >= self.min_support)
            .map(|((a, b), support)| Itemset {
                items: vec![a, b],
                support,
            })
            .collect();
        // BTreeMap order already sorts equal supports by items.
        itemsets.sort_by(|a, b| b.support.cmp(&a.support));
        itemsets
    }
}

impl Default for FrequencySummarizer {
    fn default() -> Self {
        Self::new(SummarizerModel::default())
    }
}

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, sentences: &[Sentence]) -> Result<Summary> {
        let terms: Vec<Vec<String>> = sentences.iter().map(|s| self.terms(s)).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for term in terms.iter().flatten() {
            *counts.entry(term.as_str()).or_default() += 1;
        }
        let total = counts.values().sum::<usize>().max(1) as f64;

        let mut salience: Vec<TermScore> = counts
            .iter()
            .map(|(term, n)| TermScore {
                term: term.to_string(),
                score: *n as f64 / total,
            })
            .collect();
        salience.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.term.cmp(&b.term)));

        let keywords: Vec<String> = salience
            .iter()
            .take(self.keywords)
            .map(|t| t.term.clone())
            .collect();
        let itemsets = self.itemsets(&keywords, &terms);

        let scores: HashMap<&str, f64> = salience
            .iter()
            .map(|t| (t.term.as_str(), t.score))
            .collect();
        let sentences = sentences
            .iter()
            .zip(&terms)
            .enumerate()
            .map(|(index, (sentence, words))| {
                let sum: f64 = words.iter().filter_map(|w| scores.get(w.as_str())).sum();
                SentenceScore {
                    index,
                    start: sentence.start,
                    end: sentence.end,
                    score: if words.is_empty() {
                        0.0
                    } else {
                        sum / words.len() as f64
                    },
                }
            })
            .collect();

        Ok(Summary {
            salience,
            keywords,
            itemsets,
            sentences,
        })
    }
}
