//! Greedy longest-match phrase lookup over token sequences.

use crate::types::Token;
use crate::types::text::split_tokens;

/// A phrase occurrence: first token index, token count and payload.
pub(crate) struct PhraseMatch<'a, T> {
    pub start: usize,
    pub len: usize,
    pub value: &'a T,
}

/// Phrases stored as lowercased token sequences, longest first.
pub(crate) struct PhraseMatcher<T> {
    phrases: Vec<(Vec<String>, T)>,
}

impl<T> PhraseMatcher<T> {
    pub(crate) fn new(entries: impl IntoIterator<Item = (String, T)>) -> Self {
        let mut phrases: Vec<(Vec<String>, T)> = entries
            .into_iter()
            .map(|(phrase, value)| {
                let forms = split_tokens(&phrase)
                    .into_iter()
                    .map(|t| t.lowercase())
                    .collect();
                (forms, value)
            })
            .filter(|(forms, _): &(Vec<String>, T)| !forms.is_empty())
            .collect();
        // Stable sort keeps file order among equal lengths.
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { phrases }
    }

    /// Non-overlapping matches, scanning left to right.
    pub(crate) fn find(&self, tokens: &[Token]) -> Vec<PhraseMatch<'_, T>> {
        let forms: Vec<String> = tokens.iter().map(Token::lowercase).collect();
        let mut matches = Vec::new();
        let mut i = 0;
        while i < forms.len() {
            let hit = self
                .phrases
                .iter()
                .find(|(phrase, _)| forms[i..].starts_with(phrase));
            match hit {
                Some((phrase, value)) => {
                    matches.push(PhraseMatch {
                        start: i,
                        len: phrase.len(),
                        value,
                    });
                    i += phrase.len();
                }
                None => i += 1,
            }
        }
        matches
    }
}
