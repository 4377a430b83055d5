//! Capabilities that chain a tokenizer with a per-sentence model.

use std::sync::Arc;

use super::traits::{DependencyParser, Summarizer, Tokenizer};
use crate::Result;
use crate::types::{ParsedSentence, Summary};

/// Tokenizer followed by a dependency parser.
pub struct ParsePipeline {
    tokenizer: Arc<dyn Tokenizer>,
    parser: Arc<dyn DependencyParser>,
}

impl ParsePipeline {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, parser: Arc<dyn DependencyParser>) -> Self {
        Self { tokenizer, parser }
    }

    pub fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>> {
        self.tokenizer
            .tokenize(text)?
            .iter()
            .map(|sentence| self.parser.parse(sentence))
            .collect()
    }
}

/// Tokenizer followed by a summarizer.
pub struct SummarizePipeline {
    tokenizer: Arc<dyn Tokenizer>,
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizePipeline {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            tokenizer,
            summarizer,
        }
    }

    pub fn summarize(&self, text: &str) -> Result<Summary> {
        self.summarizer.summarize(&self.tokenizer.tokenize(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FrequencySummarizer, LexiconParser, RuleTokenizer};

    #[test]
    fn parses_every_sentence() {
        let pipeline = ParsePipeline::new(
            Arc::new(RuleTokenizer::default()),
            Arc::new(LexiconParser::default()),
        );
        let parsed = pipeline.parse("One. Two three.").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].tokens.len(), 3);
    }

    #[test]
    fn summarizes_tokenized_text() {
        let pipeline = SummarizePipeline::new(
            Arc::new(RuleTokenizer::default()),
            Arc::new(FrequencySummarizer::default()),
        );
        let summary = pipeline.summarize("Owls hunt. Owls sleep.").unwrap();
        assert_eq!(summary.keywords[0], "owls");
        assert_eq!(summary.sentences.len(), 2);
    }
}
