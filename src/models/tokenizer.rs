//! Rule-based sentence and word tokenizer.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::traits::Tokenizer;
use crate::Result;
use crate::types::text::split_tokens;
use crate::types::{Sentence, Token};

/// Serialized tokenizer model.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerModel {
    /// Lowercased words after which a terminator does not end a sentence.
    #[serde(default)]
    pub abbreviations: Vec<String>,
    #[serde(default = "default_terminators")]
    pub terminators: Vec<String>,
}

impl Default for TokenizerModel {
    fn default() -> Self {
        Self {
            abbreviations: Vec::new(),
            terminators: default_terminators(),
        }
    }
}

fn default_terminators() -> Vec<String> {
    [".", "!", "?"].into_iter().map(String::from).collect()
}

/// Splits text into word/punctuation tokens, then into sentences at
/// terminators.
pub struct RuleTokenizer {
    abbreviations: HashSet<String>,
    terminators: HashSet<String>,
}

impl RuleTokenizer {
    pub fn new(model: TokenizerModel) -> Self {
        Self {
            abbreviations: model
                .abbreviations
                .into_iter()
                .map(|a| a.trim_end_matches('.').to_lowercase())
                .collect(),
            terminators: model.terminators.into_iter().collect(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(loader::read_json(path)?))
    }

    fn ends_sentence(&self, token: &Token, previous: Option<&Token>) -> bool {
        if !self.terminators.contains(&token.text) {
            return false;
        }
        // "Dr." keeps the sentence open.
        !previous.is_some_and(|p| p.is_word() && self.abbreviations.contains(&p.lowercase()))
    }
}

impl Default for RuleTokenizer {
    fn default() -> Self {
        Self::new(TokenizerModel::default())
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Sentence>> {
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut current: Vec<Token> = Vec::new();

        for token in split_tokens(text) {
            // Trailing terminators ("?!") stay with the sentence they close.
            if current.is_empty() && self.terminators.contains(&token.text) {
                if let Some(last) = sentences.last_mut() {
                    last.end = token.end;
                    last.tokens.push(token);
                    continue;
                }
            }

            let closes = self.ends_sentence(&token, current.last());
            current.push(token);
            if closes {
                sentences.extend(Sentence::from_tokens(std::mem::take(&mut current)));
            }
        }
        sentences.extend(Sentence::from_tokens(current));

        Ok(sentences)
    }
}
