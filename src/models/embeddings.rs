//! Word vectors loaded from JSON or word2vec text files.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::traits::Embeddings;
use crate::{MimirError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsModel {
    pub dimensions: usize,
    pub vectors: HashMap<String, Vec<f32>>,
}

pub struct WordEmbeddings {
    dimensions: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordEmbeddings {
    /// Build from in-memory vectors; every vector must have `dimensions` entries.
    pub fn from_vectors(dimensions: usize, vectors: HashMap<String, Vec<f32>>) -> Result<Self> {
        if dimensions == 0 {
            return Err(MimirError::Configuration(
                "embeddings must have at least one dimension".to_string(),
            ));
        }
        if let Some((word, v)) = vectors.iter().find(|(_, v)| v.len() != dimensions) {
            return Err(MimirError::Configuration(format!(
                "embedding for '{word}' has {} dimensions, expected {dimensions}",
                v.len()
            )));
        }
        Ok(Self {
            dimensions,
            vectors: vectors
                .into_iter()
                .map(|(word, v)| (word.to_lowercase(), v))
                .collect(),
        })
    }

    /// `.vec` and `.txt` files are read as word2vec text, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let is_text = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e, "vec" | "txt"));
        if is_text {
            let (dimensions, vectors) = parse_word2vec(&loader::read_text(path)?)
                .map_err(|e| MimirError::Configuration(format!("{path:?}: {e}")))?;
            Self::from_vectors(dimensions, vectors)
        } else {
            let model: EmbeddingsModel = loader::read_json(path)?;
            Self::from_vectors(model.dimensions, model.vectors)
        }
    }
}

impl Embeddings for WordEmbeddings {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }
}

/// Parse the word2vec text format: a `count dimensions` header, then one
/// `word v1 .. vN` line per word.
fn parse_word2vec(
    content: &str,
) -> std::result::Result<(usize, HashMap<String, Vec<f32>>), String> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or("empty embeddings file")?;
    let mut fields = header.split_whitespace();
    let count: usize = parse_field(fields.next(), "word count")?;
    let dimensions: usize = parse_field(fields.next(), "dimensions")?;

    let mut vectors = HashMap::with_capacity(count);
    for (n, line) in lines.enumerate() {
        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else { continue };
        let vector = fields
            .map(|f| f.parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| format!("line {}: {e}", n + 2))?;
        vectors.insert(word.to_string(), vector);
    }
    if vectors.len() != count {
        return Err(format!("header declares {count} words, found {}", vectors.len()));
    }
    Ok((dimensions, vectors))
}

fn parse_field(field: Option<&str>, name: &str) -> std::result::Result<usize, String> {
    field
        .ok_or_else(|| format!("header is missing the {name}"))?
        .parse()
        .map_err(|e| format!("invalid {name} in header: {e}"))
}
