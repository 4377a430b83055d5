//! Extractive summary types.

use serde::Serialize;

/// Salience of one term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermScore {
    pub term: String,
    pub score: f64,
}

/// Keywords that co-occur in `support` sentences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itemset {
    pub items: Vec<String>,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceScore {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Term salience distribution, highest first.
    pub salience: Vec<TermScore>,
    pub keywords: Vec<String>,
    pub itemsets: Vec<Itemset>,
    /// One score per sentence, in text order.
    pub sentences: Vec<SentenceScore>,
}
