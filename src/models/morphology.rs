//! Lemma dictionary.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::loader;
use super::traits::Morphology;
use crate::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MorphologyModel {
    pub lemmas: HashMap<String, String>,
}

pub struct MorphologyDictionary {
    lemmas: HashMap<String, String>,
}

impl MorphologyDictionary {
    pub fn new(model: MorphologyModel) -> Self {
        Self {
            lemmas: model
                .lemmas
                .into_iter()
                .map(|(form, lemma)| (form.to_lowercase(), lemma.to_lowercase()))
                .collect(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(loader::read_json(path)?))
    }
}

impl Morphology for MorphologyDictionary {
    fn lemma(&self, form: &str) -> String {
        self.lemmas
            .get(form)
            .cloned()
            .unwrap_or_else(|| form.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_forms_are_their_own_lemma() {
        let morphology = MorphologyDictionary::new(MorphologyModel {
            lemmas: HashMap::from([("Cats".into(), "cat".into())]),
        });
        assert_eq!(morphology.lemma("cats"), "cat");
        assert_eq!(morphology.lemma("dogs"), "dogs");
    }
}
