//! Tokens, sentences and the plain word splitter.
//!
//! All offsets are character offsets into the request text, end-exclusive.

use serde::Serialize;

/// A token with its character span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether the token contains at least one alphanumeric character.
    pub fn is_word(&self) -> bool {
        self.text.chars().any(char::is_alphanumeric)
    }

    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }
}

/// A sentence: the span it covers and its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Build a sentence spanning its first and last token.
    ///
    /// Returns `None` for an empty token list.
    pub fn from_tokens(tokens: Vec<Token>) -> Option<Self> {
        let start = tokens.first()?.start;
        let end = tokens.last()?.end;
        Some(Self { start, end, tokens })
    }
}

/// Split text into word and punctuation tokens.
///
/// A word is a run of alphanumeric characters, optionally joined by a single
/// apostrophe or hyphen (`don't`, `well-known`). Every other non-whitespace
/// character is a token of its own.
pub fn split_tokens(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if c.is_alphanumeric() {
            i += 1;
            while i < chars.len() {
                if chars[i].is_alphanumeric() {
                    i += 1;
                } else if is_joiner(chars[i])
                    && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric())
                {
                    i += 2;
                } else {
                    break;
                }
            }
        } else {
            i += 1;
        }

        tokens.push(Token::new(chars[start..i].iter().collect::<String>(), start, i));
    }

    tokens
}

/// Lowercased word tokens, punctuation dropped.
pub fn words(text: &str) -> Vec<String> {
    split_tokens(text)
        .into_iter()
        .filter(Token::is_word)
        .map(|t| t.lowercase())
        .collect()
}

fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '’' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        let tokens = split_tokens("Hello, world!");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Hello", ",", "world", "!"]);
        assert_eq!((tokens[2].start, tokens[2].end), (7, 12));
    }

    #[test]
    fn keeps_joined_words_together() {
        let texts: Vec<String> = split_tokens("don't well-known - x")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, ["don't", "well-known", "-", "x"]);
    }

    #[test]
    fn offsets_are_in_characters() {
        let tokens = split_tokens("héllo wörld");
        assert_eq!((tokens[1].start, tokens[1].end), (6, 11));
    }

    #[test]
    fn words_are_lowercased_without_punctuation() {
        assert_eq!(words("The Cat, sat."), ["the", "cat", "sat"]);
    }

    #[test]
    fn empty_sentence_is_none() {
        assert!(Sentence::from_tokens(Vec::new()).is_none());
    }
}
