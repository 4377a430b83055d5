//! Capability registry.
//!
//! The registry owns every capability slot. Each slot is either
//! [`Capability::Absent`] (never configured) or [`Capability::Present`]
//! with a map from key (language or domain) to a loaded model.
//!
//! The registry is built once, at startup, by [`RegistryBuilder`] and is
//! read-only afterwards. Request handlers share it through an `Arc` without
//! locking.
//!
//! # Derived capabilities
//!
//! Some capabilities only exist where several prerequisites overlap:
//!
//! ```text
//! parser(L)     = tokenizer(L) ∩ parser-model(L)
//! summarizer(L) = tokenizer(L) ∩ summarizer-model(L)
//! comparator(L) = tokenizer(L) ∩ parser-model(L) ∩ morphology(L) ∩ embeddings(L)
//! ```
//!
//! A derived capability is absent when any prerequisite is absent.

mod builder;
pub mod derive;
pub mod keys;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use builder::{ModelsConfig, RegistryBuilder};

use crate::models::{
    Classifier, Comparator, Embeddings, FrameExtractor, Labeler, LanguageDetector,
    LocationsDictionary, Morphology, ParsePipeline, SummarizePipeline, Tokenizer,
};
use crate::types::{Capabilities, Domain, Language};

/// A capability slot.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    Absent,
    Present(T),
}

impl<T> Default for Capability<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Capability<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

/// Models keyed by language or domain.
pub type Keyed<K, M> = BTreeMap<K, Arc<M>>;

/// All capability slots.
#[derive(Default)]
pub struct CapabilityRegistry {
    pub(crate) tokenizers: Capability<Keyed<Language, dyn Tokenizer>>,
    pub(crate) language_detector: Capability<Arc<dyn LanguageDetector>>,
    pub(crate) parsers: Capability<Keyed<Language, ParsePipeline>>,
    pub(crate) classifiers: Capability<Keyed<Domain, dyn Classifier>>,
    pub(crate) frame_extractors: Capability<Keyed<Domain, dyn FrameExtractor>>,
    pub(crate) labelers: Capability<Keyed<Domain, dyn Labeler>>,
    pub(crate) location_labeler: Capability<Arc<dyn Labeler>>,
    pub(crate) locations: Capability<Arc<dyn LocationsDictionary>>,
    pub(crate) morphology: Capability<Keyed<Language, dyn Morphology>>,
    pub(crate) embeddings: Capability<Keyed<Language, dyn Embeddings>>,
    pub(crate) comparators: Capability<Keyed<Language, dyn Comparator>>,
    pub(crate) summarizers: Capability<Keyed<Language, SummarizePipeline>>,
}

impl CapabilityRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn tokenizers(&self) -> &Capability<Keyed<Language, dyn Tokenizer>> {
        &self.tokenizers
    }

    pub fn language_detector(&self) -> &Capability<Arc<dyn LanguageDetector>> {
        &self.language_detector
    }

    pub fn parsers(&self) -> &Capability<Keyed<Language, ParsePipeline>> {
        &self.parsers
    }

    pub fn classifiers(&self) -> &Capability<Keyed<Domain, dyn Classifier>> {
        &self.classifiers
    }

    pub fn frame_extractors(&self) -> &Capability<Keyed<Domain, dyn FrameExtractor>> {
        &self.frame_extractors
    }

    pub fn labelers(&self) -> &Capability<Keyed<Domain, dyn Labeler>> {
        &self.labelers
    }

    pub fn location_labeler(&self) -> &Capability<Arc<dyn Labeler>> {
        &self.location_labeler
    }

    pub fn locations(&self) -> &Capability<Arc<dyn LocationsDictionary>> {
        &self.locations
    }

    pub fn morphology(&self) -> &Capability<Keyed<Language, dyn Morphology>> {
        &self.morphology
    }

    pub fn embeddings(&self) -> &Capability<Keyed<Language, dyn Embeddings>> {
        &self.embeddings
    }

    pub fn comparators(&self) -> &Capability<Keyed<Language, dyn Comparator>> {
        &self.comparators
    }

    pub fn summarizers(&self) -> &Capability<Keyed<Language, SummarizePipeline>> {
        &self.summarizers
    }

    /// Key sets of every slot.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            tokenizer: language_keys(&self.tokenizers),
            language_detector: self.language_detector.present().map(|detector| {
                detector
                    .languages()
                    .iter()
                    .map(|l| l.code().to_string())
                    .collect()
            }),
            parser: language_keys(&self.parsers),
            classifier: domain_keys(&self.classifiers),
            frame_extractor: domain_keys(&self.frame_extractors),
            labeler: domain_keys(&self.labelers),
            location_labeler: self.location_labeler.is_present(),
            locations: self.locations.is_present(),
            morphology: language_keys(&self.morphology),
            embeddings: language_keys(&self.embeddings),
            comparator: language_keys(&self.comparators),
            summarizer: language_keys(&self.summarizers),
        }
    }
}

fn language_keys<M: ?Sized>(capability: &Capability<Keyed<Language, M>>) -> Option<Vec<String>> {
    capability
        .present()
        .map(|map| map.keys().map(|l| l.code().to_string()).collect())
}

fn domain_keys<M: ?Sized>(capability: &Capability<Keyed<Domain, M>>) -> Option<Vec<String>> {
    capability
        .present()
        .map(|map| map.keys().map(|d| d.to_string()).collect())
}
