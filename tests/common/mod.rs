//! Shared model fixtures for integration tests.
//!
//! `fixture()` writes a small but complete model tree to a temp directory:
//! tokenizers, parsers and summarizers for `en` and `fr`, morphology and
//! embeddings for `en` only (so the comparator exists for `en` alone), two
//! classifier domains, a frame domain, a labeler domain, a location labeler
//! and a locations gazetteer. No language detector is configured; tests
//! that need one set `models.language_detector = Some(fixture.detector())`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use mimir::registry::ModelsConfig;
use mimir::{Gateway, Mimir};
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
    pub models: ModelsConfig,
}

impl Fixture {
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Path of the language detector model (written, not configured).
    pub fn detector(&self) -> PathBuf {
        self.path("langid.json")
    }

    pub fn with_detector(mut self) -> Self {
        self.models.language_detector = Some(self.detector());
        self
    }

    pub fn gateway(&self) -> Gateway {
        Mimir::builder()
            .models(self.models.clone())
            .build()
            .expect("fixture gateway builds")
    }
}

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "tokenizers/tokenizer_en.json", r#"{"abbreviations": ["dr"]}"#);
    write(root, "tokenizers/tokenizer_fr.json", r#"{"abbreviations": ["m"]}"#);

    write(
        root,
        "langid.json",
        r#"{"profiles": {
            "en": {" th": 8, "the": 8, "he ": 8, " an": 4, "and": 4, "nd ": 4, " is": 3, "is ": 3},
            "fr": {" le": 8, "le ": 8, " la": 6, "la ": 6, " et": 4, "et ": 4, "les": 4, " bo": 2}
        }}"#,
    );

    write(
        root,
        "parsers/parser_en.json",
        r#"{
            "tags": {"the": "DET", "a": "DET", "dog": "NOUN", "dogs": "NOUN", "cat": "NOUN",
                     "cats": "NOUN", "barks": "VERB", "bark": "VERB", "chased": "VERB",
                     "sat": "VERB", "loud": "ADJ"},
            "attachments": {"DET": ["NOUN", "det"], "ADJ": ["NOUN", "amod"]}
        }"#,
    );
    write(
        root,
        "parsers/parser_fr.json",
        r#"{"tags": {"le": "DET", "chat": "NOUN", "dort": "VERB"},
            "attachments": {"DET": ["NOUN", "det"]}}"#,
    );

    write(
        root,
        "summarizers/summarizer_en.json",
        r#"{"stopwords": ["the", "a", "is", "and"], "keywords": 5, "min_support": 2}"#,
    );
    write(root, "summarizers/summarizer_fr.json", r#"{"stopwords": ["le", "la"]}"#);

    write(
        root,
        "morphology/morphology_en.json",
        r#"{"lemmas": {"dogs": "dog", "cats": "cat", "barks": "bark", "barked": "bark",
                       "cars": "car"}}"#,
    );
    write(
        root,
        "embeddings/embeddings_en.vec",
        "6 3\n\
         dog 1.0 0.1 0.0\n\
         cat 0.9 0.2 0.0\n\
         bark 0.8 0.0 0.3\n\
         car 0.0 1.0 0.0\n\
         drive 0.0 0.9 0.4\n\
         road 0.1 0.8 0.2\n",
    );

    write(
        root,
        "classifiers/news.json",
        r#"{"categories": [
            {"id": "politics", "keywords": {"election": 2.0, "vote": 1.5, "minister": 1.0}},
            {"id": "sport", "keywords": {"match": 2.0, "goal": 1.5, "team": 1.0}}
        ]}"#,
    );
    write(
        root,
        "classifiers/sports.json",
        r#"{"categories": [
            {"id": "football", "keywords": {"goal": 2.0, "penalty": 1.5}},
            {"id": "tennis", "keywords": {"serve": 2.0, "racket": 1.5}}
        ]}"#,
    );

    write(
        root,
        "frames/travel.json",
        r#"{
            "intents": [
                {"id": "book_flight", "keywords": {"book": 1.0, "flight": 2.0}},
                {"id": "cancel", "keywords": {"cancel": 2.0}}
            ],
            "slots": {"city": ["paris", "new york"], "date": ["tomorrow"]}
        }"#,
    );

    write(
        root,
        "labelers/people.json",
        r#"{"entries": {"ada lovelace": "PER", "london": "LOC"}}"#,
    );
    write(
        root,
        "location-labeler.json",
        r#"{"entries": {"paris": "LOC", "new york": "LOC", "springfield": "LOC"}}"#,
    );
    write(
        root,
        "locations.json",
        r#"{"locations": [
            {"id": "2988507", "name": "Paris", "country": "FR", "latitude": 48.85,
             "longitude": 2.35, "population": 2138551},
            {"id": "4717560", "name": "Paris", "country": "US", "latitude": 33.66,
             "longitude": -95.55, "population": 24171},
            {"id": "5128581", "name": "New York", "country": "US", "latitude": 40.71,
             "longitude": -74.01, "population": 8804190, "aliases": ["NYC", "New York City"]}
        ]}"#,
    );

    let models = ModelsConfig {
        tokenizers: Some(root.join("tokenizers")),
        parsers: Some(root.join("parsers")),
        classifiers: Some(root.join("classifiers")),
        frames: Some(root.join("frames")),
        labelers: Some(root.join("labelers")),
        location_labeler: Some(root.join("location-labeler.json")),
        locations: Some(root.join("locations.json")),
        morphology: Some(root.join("morphology")),
        embeddings: Some(root.join("embeddings")),
        summarizers: Some(root.join("summarizers")),
        ..ModelsConfig::default()
    };

    Fixture { dir, models }
}
