//! Lexicon-driven dependency parser.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::traits::DependencyParser;
use crate::Result;
use crate::types::{ParsedSentence, ParsedToken, Sentence, Token};

const PUNCT: &str = "PUNCT";
const NUM: &str = "NUM";

/// Serialized parser model.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserModel {
    /// Lowercased form to part-of-speech tag.
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Tags that may head a sentence, in order of preference.
    #[serde(default = "default_root_tags")]
    pub root_tags: Vec<String>,
    /// Tag to (governor tag, relation).
    #[serde(default)]
    pub attachments: HashMap<String, (String, String)>,
}

impl Default for ParserModel {
    fn default() -> Self {
        Self {
            tags: HashMap::new(),
            default_tag: default_tag(),
            root_tags: default_root_tags(),
            attachments: HashMap::new(),
        }
    }
}

fn default_tag() -> String {
    "NOUN".to_string()
}

fn default_root_tags() -> Vec<String> {
    vec!["VERB".to_string(), "AUX".to_string()]
}

/// Tags tokens from a lexicon and attaches them with a few head rules.
pub struct LexiconParser {
    tags: HashMap<String, String>,
    default_tag: String,
    root_tags: HashSet<String>,
    attachments: HashMap<String, (String, String)>,
}

impl LexiconParser {
    pub fn new(model: ParserModel) -> Self {
        Self {
            tags: model
                .tags
                .into_iter()
                .map(|(form, tag)| (form.to_lowercase(), tag))
                .collect(),
            default_tag: model.default_tag,
            root_tags: model.root_tags.into_iter().collect(),
            attachments: model.attachments,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(loader::read_json(path)?))
    }

    fn tag(&self, token: &Token) -> String {
        if !token.is_word() {
            return PUNCT.to_string();
        }
        let form = token.lowercase();
        if let Some(tag) = self.tags.get(&form) {
            return tag.clone();
        }
        if form.chars().all(|c| c.is_numeric() || c == '-') {
            return NUM.to_string();
        }
        self.default_tag.clone()
    }

    fn root(&self, tags: &[String]) -> usize {
        tags.iter()
            .position(|t| self.root_tags.contains(t))
            .or_else(|| tags.iter().position(|t| t != PUNCT))
            .unwrap_or(0)
    }

    fn attach(&self, index: usize, root: usize, tags: &[String]) -> (usize, String) {
        let tag = tags[index].as_str();
        if tag == PUNCT {
            return (root, "punct".to_string());
        }
        if let Some((head_tag, relation)) = self.attachments.get(tag) {
            let right = (index + 1..tags.len()).find(|&j| tags[j] == *head_tag);
            let left = (0..index).rev().find(|&j| tags[j] == *head_tag);
            return (right.or(left).unwrap_or(root), relation.clone());
        }
        let relation = match (tag, index < root) {
            ("NOUN" | "PROPN" | "PRON", true) => "nsubj",
            ("NOUN" | "PROPN" | "PRON", false) => "obj",
            _ => "dep",
        };
        (root, relation.to_string())
    }
}

impl Default for LexiconParser {
    fn default() -> Self {
        Self::new(ParserModel::default())
    }
}

impl DependencyParser for LexiconParser {
    fn parse(&self, sentence: &Sentence) -> Result<ParsedSentence> {
        let tags: Vec<String> = sentence.tokens.iter().map(|t| self.tag(t)).collect();
        let root = self.root(&tags);

        let tokens = sentence
            .tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let (head, relation) = if i == root {
                    (0, "root".to_string())
                } else {
                    let (head, relation) = self.attach(i, root, &tags);
                    (head + 1, relation)
                };
                ParsedToken {
                    id: i + 1,
                    form: token.text.clone(),
                    tag: tags[i].clone(),
                    head,
                    relation,
                }
            })
            .collect();

        Ok(ParsedSentence { tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::text::split_tokens;

    fn sentence(text: &str) -> Sentence {
        Sentence::from_tokens(split_tokens(text)).unwrap()
    }

    fn parser() -> LexiconParser {
        LexiconParser::new(ParserModel {
            tags: HashMap::from([
                ("the".into(), "DET".into()),
                ("cat".into(), "NOUN".into()),
                ("eats".into(), "VERB".into()),
                ("fish".into(), "NOUN".into()),
            ]),
            attachments: HashMap::from([("DET".into(), ("NOUN".into(), "det".into()))]),
            ..ParserModel::default()
        })
    }

    #[test]
    fn verb_is_root_and_nouns_attach_around_it() {
        let parsed = parser().parse(&sentence("The cat eats fish.")).unwrap();
        let rows: Vec<(usize, &str, usize, &str)> = parsed
            .tokens
            .iter()
            .map(|t| (t.id, t.tag.as_str(), t.head, t.relation.as_str()))
            .collect();
        assert_eq!(
            rows,
            [
                (1, "DET", 2, "det"),
                (2, "NOUN", 3, "nsubj"),
                (3, "VERB", 0, "root"),
                (4, "NOUN", 3, "obj"),
                (5, "PUNCT", 3, "punct"),
            ]
        );
    }

    #[test]
    fn without_a_verb_the_first_word_is_root() {
        let parsed = parser().parse(&sentence("! 42 cats")).unwrap();
        assert_eq!(parsed.tokens[1].tag, "NUM");
        assert_eq!(parsed.tokens[1].head, 0);
        assert_eq!(parsed.tokens[0].head, 2);
    }
}
