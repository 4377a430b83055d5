//! Embedding-based text comparison.

use std::sync::Arc;

use rayon::ThreadPool;
use rayon::prelude::*;

use super::scoring::cosine;
use super::traits::{Comparator, DependencyParser, Embeddings, Morphology, Tokenizer};
use crate::Result;
use crate::types::{Candidate, ParsedToken, Similarity};

/// Represents a text as the weighted mean of its lemma vectors.
///
/// Content words weigh more than function words; punctuation is ignored.
pub struct TextComparator {
    tokenizer: Arc<dyn Tokenizer>,
    parser: Arc<dyn DependencyParser>,
    morphology: Arc<dyn Morphology>,
    embeddings: Arc<dyn Embeddings>,
}

impl TextComparator {
    pub fn new(
        tokenizer: Arc<dyn Tokenizer>,
        parser: Arc<dyn DependencyParser>,
        morphology: Arc<dyn Morphology>,
        embeddings: Arc<dyn Embeddings>,
    ) -> Self {
        Self {
            tokenizer,
            parser,
            morphology,
            embeddings,
        }
    }

    fn weight(token: &ParsedToken) -> f32 {
        match token.tag.as_str() {
            "NOUN" | "PROPN" | "VERB" | "ADJ" => 1.0,
            "PUNCT" => 0.0,
            _ => 0.3,
        }
    }
}

impl Comparator for TextComparator {
    fn represent(&self, text: &str) -> Result<Vec<f32>> {
        let mut sum = vec![0.0f32; self.embeddings.dimensions()];
        let mut total = 0.0f32;

        for sentence in self.tokenizer.tokenize(text)? {
            for token in self.parser.parse(&sentence)?.tokens {
                let weight = Self::weight(&token);
                if weight == 0.0 {
                    continue;
                }
                let form = token.form.to_lowercase();
                let lemma = self.morphology.lemma(&form);
                let Some(vector) = self
                    .embeddings
                    .vector(&lemma)
                    .or_else(|| self.embeddings.vector(&form))
                else {
                    continue;
                };
                for (s, v) in sum.iter_mut().zip(vector) {
                    *s += weight * v;
                }
                total += weight;
            }
        }

        if total > 0.0 {
            sum.iter_mut().for_each(|s| *s /= total);
        }
        Ok(sum)
    }
}

/// Score every candidate against `base` on `pool`, `chunk_size` candidates
/// per task.
///
/// The result is sorted by descending score; equal scores keep input order,
/// so the ranking does not depend on how the work was chunked.
pub fn rank(
    comparator: &dyn Comparator,
    base: &str,
    candidates: &[Candidate],
    pool: &ThreadPool,
    chunk_size: usize,
) -> Result<Vec<Similarity>> {
    let base = comparator.represent(base)?;
    let chunk_size = chunk_size.max(1);

    let chunks: Vec<Vec<(usize, Similarity)>> = pool.install(|| {
        candidates
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(n, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(i, candidate)| {
                        let vector = comparator.represent(&candidate.text)?;
                        let similarity = Similarity {
                            id: candidate.id.clone(),
                            score: cosine(&base, &vector),
                        };
                        Ok((n * chunk_size + i, similarity))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let mut scored: Vec<(usize, Similarity)> = chunks.into_iter().flatten().collect();
    scored.sort_by(|(ia, a), (ib, b)| b.score.total_cmp(&a.score).then(ia.cmp(ib)));
    Ok(scored.into_iter().map(|(_, s)| s).collect())
}
