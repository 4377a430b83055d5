//! Capability traits.
//!
//! Every capability is a narrow, synchronous trait: the registry and the
//! commands only ever see these, never a concrete model. Inference is
//! CPU-bound, so callers run these on blocking worker threads.
//!
//! Implementations must be immutable after construction; the registry shares
//! them across request workers without locking.

use crate::Result;
use crate::types::{
    Classification, Frame, Language, LanguageScore, Location, ParsedSentence, Sentence, Summary,
    Token,
};

/// Splits text into sentences of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Sentence>>;
}

/// Identifies the language of a text.
pub trait LanguageDetector: Send + Sync {
    /// Languages this detector can return.
    fn languages(&self) -> Vec<Language>;

    /// Score every candidate language, highest first.
    ///
    /// The result is never empty for a detector with at least one language.
    fn detect(&self, text: &str) -> Result<Vec<LanguageScore>>;
}

/// Produces a dependency parse of one tokenized sentence.
pub trait DependencyParser: Send + Sync {
    fn parse(&self, sentence: &Sentence) -> Result<ParsedSentence>;
}

/// Assigns a category to a bag of lowercased words.
pub trait Classifier: Send + Sync {
    /// The returned classification always carries its full distribution.
    fn classify(&self, words: &[String]) -> Result<Classification>;
}

/// Extracts an intent and its slots from tokens.
pub trait FrameExtractor: Send + Sync {
    /// The returned frame always carries its full intent distribution.
    fn extract(&self, tokens: &[Token]) -> Result<Frame>;
}

/// Labels every token (BIO style).
pub trait Labeler: Send + Sync {
    /// Returns exactly one label per input token.
    fn label(&self, tokens: &[Token]) -> Result<Vec<String>>;
}

/// Resolves place names to known locations.
pub trait LocationsDictionary: Send + Sync {
    /// Best location for a candidate name, if any.
    fn resolve(&self, candidate: &str) -> Option<Location>;
}

/// Maps word forms to lemmas.
pub trait Morphology: Send + Sync {
    /// Lemma of a lowercased form; the form itself when unknown.
    fn lemma(&self, form: &str) -> String;
}

/// Word vectors.
pub trait Embeddings: Send + Sync {
    fn dimensions(&self) -> usize;

    fn vector(&self, word: &str) -> Option<&[f32]>;
}

/// Maps a text to a vector whose cosine similarity ranks comparisons.
pub trait Comparator: Send + Sync {
    fn represent(&self, text: &str) -> Result<Vec<f32>>;
}

/// Scores terms and sentences of a tokenized text.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, sentences: &[Sentence]) -> Result<Summary>;
}
