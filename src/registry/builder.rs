//! Registry construction from configured model paths.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use super::derive::{derive, key_set};
use super::{CapabilityRegistry, Keyed, keys};
use crate::models::{
    Classifier, Comparator, DependencyParser, Embeddings, FrameExtractor, FrequencySummarizer,
    GazetteerLabeler, GazetteerLocations, KeywordClassifier, Labeler, LanguageDetector,
    LexiconParser, LocationsDictionary, Morphology, MorphologyDictionary, ParsePipeline,
    PatternFrameExtractor, RuleTokenizer, SummarizePipeline, Summarizer, TextComparator,
    Tokenizer, TrigramDetector, WordEmbeddings,
};
use crate::telemetry;
use crate::types::{CapabilityKind, Domain, Language};
use crate::{MimirError, Result};

/// Model paths. Every entry is optional; an unset entry leaves its
/// capability absent.
///
/// Keyed capabilities take a directory holding one file per language or
/// domain; singleton capabilities take a single file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub tokenizers: Option<PathBuf>,
    pub language_detector: Option<PathBuf>,
    pub parsers: Option<PathBuf>,
    pub classifiers: Option<PathBuf>,
    /// Per-domain word vectors for the classifiers; must cover exactly the
    /// classifier domains.
    pub classifier_embeddings: Option<PathBuf>,
    pub frames: Option<PathBuf>,
    pub labelers: Option<PathBuf>,
    pub location_labeler: Option<PathBuf>,
    pub locations: Option<PathBuf>,
    pub morphology: Option<PathBuf>,
    pub embeddings: Option<PathBuf>,
    pub summarizers: Option<PathBuf>,
}

/// Collects models, then derives the composite capabilities in [`build`].
///
/// Models come either from files ([`RegistryBuilder::from_config`]) or are
/// injected directly, which is how tests supply doubles.
///
/// [`build`]: RegistryBuilder::build
#[derive(Default)]
pub struct RegistryBuilder {
    tokenizers: Option<Keyed<Language, dyn Tokenizer>>,
    language_detector: Option<Arc<dyn LanguageDetector>>,
    parsers: Option<Keyed<Language, dyn DependencyParser>>,
    classifiers: Option<Keyed<Domain, dyn Classifier>>,
    frame_extractors: Option<Keyed<Domain, dyn FrameExtractor>>,
    labelers: Option<Keyed<Domain, dyn Labeler>>,
    location_labeler: Option<Arc<dyn Labeler>>,
    locations: Option<Arc<dyn LocationsDictionary>>,
    morphology: Option<Keyed<Language, dyn Morphology>>,
    embeddings: Option<Keyed<Language, dyn Embeddings>>,
    summarizers: Option<Keyed<Language, dyn Summarizer>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every configured model.
    ///
    /// Fails on the first unreadable path or model file, and when classifier
    /// embeddings do not cover exactly the classifier domains.
    pub fn from_config(config: &ModelsConfig) -> Result<Self> {
        let mut builder = Self::new();

        if let Some(dir) = &config.tokenizers {
            let files = keys::scan_languages(dir, CapabilityKind::Tokenizer)?;
            builder.tokenizers = Some(load_keyed(
                CapabilityKind::Tokenizer,
                files,
                |_, path| -> Result<Arc<dyn Tokenizer>> {
                    Ok(Arc::new(RuleTokenizer::from_file(path)?))
                },
            )?);
        }

        if let Some(path) = &config.language_detector {
            builder.language_detector = Some(load_single(
                CapabilityKind::LanguageDetector,
                path,
                |path| -> Result<Arc<dyn LanguageDetector>> {
                    Ok(Arc::new(TrigramDetector::from_file(path)?))
                },
            )?);
        }

        if let Some(dir) = &config.parsers {
            let files = keys::scan_languages(dir, CapabilityKind::Parser)?;
            builder.parsers = Some(load_keyed(
                CapabilityKind::Parser,
                files,
                |_, path| -> Result<Arc<dyn DependencyParser>> {
                    Ok(Arc::new(LexiconParser::from_file(path)?))
                },
            )?);
        }

        match (&config.classifiers, &config.classifier_embeddings) {
            (Some(dir), auxiliary) => {
                builder.classifiers = Some(load_classifiers(dir, auxiliary.as_deref())?);
            }
            (None, Some(_)) => {
                return Err(MimirError::Configuration(
                    "classifier_embeddings is configured but classifiers is not".to_string(),
                ));
            }
            (None, None) => {}
        }

        if let Some(dir) = &config.frames {
            let files = keys::scan_domains(dir, CapabilityKind::FrameExtractor)?;
            builder.frame_extractors = Some(load_keyed(
                CapabilityKind::FrameExtractor,
                files,
                |_, path| -> Result<Arc<dyn FrameExtractor>> {
                    Ok(Arc::new(PatternFrameExtractor::from_file(path)?))
                },
            )?);
        }

        if let Some(dir) = &config.labelers {
            let files = keys::scan_domains(dir, CapabilityKind::Labeler)?;
            builder.labelers = Some(load_keyed(
                CapabilityKind::Labeler,
                files,
                |_, path| -> Result<Arc<dyn Labeler>> {
                    Ok(Arc::new(GazetteerLabeler::from_file(path)?))
                },
            )?);
        }

        if let Some(path) = &config.location_labeler {
            builder.location_labeler = Some(load_single(
                CapabilityKind::LocationLabeler,
                path,
                |path| -> Result<Arc<dyn Labeler>> {
                    Ok(Arc::new(GazetteerLabeler::from_file(path)?))
                },
            )?);
        }

        if let Some(path) = &config.locations {
            builder.locations = Some(load_single(
                CapabilityKind::Locations,
                path,
                |path| -> Result<Arc<dyn LocationsDictionary>> {
                    Ok(Arc::new(GazetteerLocations::from_file(path)?))
                },
            )?);
        }

        if let Some(dir) = &config.morphology {
            let files = keys::scan_languages(dir, CapabilityKind::Morphology)?;
            builder.morphology = Some(load_keyed(
                CapabilityKind::Morphology,
                files,
                |_, path| -> Result<Arc<dyn Morphology>> {
                    Ok(Arc::new(MorphologyDictionary::from_file(path)?))
                },
            )?);
        }

        if let Some(dir) = &config.embeddings {
            let files = keys::scan_languages(dir, CapabilityKind::Embeddings)?;
            builder.embeddings = Some(load_keyed(
                CapabilityKind::Embeddings,
                files,
                |_, path| -> Result<Arc<dyn Embeddings>> {
                    Ok(Arc::new(WordEmbeddings::from_file(path)?))
                },
            )?);
        }

        if let Some(dir) = &config.summarizers {
            let files = keys::scan_languages(dir, CapabilityKind::Summarizer)?;
            builder.summarizers = Some(load_keyed(
                CapabilityKind::Summarizer,
                files,
                |_, path| -> Result<Arc<dyn Summarizer>> {
                    Ok(Arc::new(FrequencySummarizer::from_file(path)?))
                },
            )?);
        }

        Ok(builder)
    }

    pub fn tokenizer(mut self, language: Language, tokenizer: impl Tokenizer + 'static) -> Self {
        insert(&mut self.tokenizers, language, Arc::new(tokenizer));
        self
    }

    pub fn language_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.language_detector = Some(Arc::new(detector));
        self
    }

    /// Add a dependency parser; it is only served for languages that also
    /// have a tokenizer.
    pub fn parser(mut self, language: Language, parser: impl DependencyParser + 'static) -> Self {
        insert(&mut self.parsers, language, Arc::new(parser));
        self
    }

    pub fn classifier(
        mut self,
        domain: impl Into<Domain>,
        classifier: impl Classifier + 'static,
    ) -> Self {
        insert(&mut self.classifiers, domain.into(), Arc::new(classifier));
        self
    }

    pub fn frame_extractor(
        mut self,
        domain: impl Into<Domain>,
        extractor: impl FrameExtractor + 'static,
    ) -> Self {
        insert(&mut self.frame_extractors, domain.into(), Arc::new(extractor));
        self
    }

    pub fn labeler(mut self, domain: impl Into<Domain>, labeler: impl Labeler + 'static) -> Self {
        insert(&mut self.labelers, domain.into(), Arc::new(labeler));
        self
    }

    /// Labeler whose `LOC` spans become location candidates.
    pub fn location_labeler(mut self, labeler: impl Labeler + 'static) -> Self {
        self.location_labeler = Some(Arc::new(labeler));
        self
    }

    pub fn locations(mut self, locations: impl LocationsDictionary + 'static) -> Self {
        self.locations = Some(Arc::new(locations));
        self
    }

    pub fn morphology(mut self, language: Language, morphology: impl Morphology + 'static) -> Self {
        insert(&mut self.morphology, language, Arc::new(morphology));
        self
    }

    pub fn embeddings(mut self, language: Language, embeddings: impl Embeddings + 'static) -> Self {
        insert(&mut self.embeddings, language, Arc::new(embeddings));
        self
    }

    /// Add a summarizer; it is only served for languages that also have a
    /// tokenizer.
    pub fn summarizer(mut self, language: Language, summarizer: impl Summarizer + 'static) -> Self {
        insert(&mut self.summarizers, language, Arc::new(summarizer));
        self
    }

    /// Derive the composite capabilities and freeze the registry.
    pub fn build(self) -> CapabilityRegistry {
        let tokenizers = self.tokenizers.as_ref();
        let parser_models = self.parsers.as_ref();

        let parsers = derive(
            CapabilityKind::Parser,
            &[
                (CapabilityKind::Tokenizer, key_set(tokenizers)),
                (CapabilityKind::Parser, key_set(parser_models)),
            ],
            |language| {
                Some(Arc::new(ParsePipeline::new(
                    tokenizers?.get(language)?.clone(),
                    parser_models?.get(language)?.clone(),
                )))
            },
        );

        let summarizer_models = self.summarizers.as_ref();
        let summarizers = derive(
            CapabilityKind::Summarizer,
            &[
                (CapabilityKind::Tokenizer, key_set(tokenizers)),
                (CapabilityKind::Summarizer, key_set(summarizer_models)),
            ],
            |language| {
                Some(Arc::new(SummarizePipeline::new(
                    tokenizers?.get(language)?.clone(),
                    summarizer_models?.get(language)?.clone(),
                )))
            },
        );

        let morphology = self.morphology.as_ref();
        let embeddings = self.embeddings.as_ref();
        let comparators = derive(
            CapabilityKind::Comparator,
            &[
                (CapabilityKind::Tokenizer, key_set(tokenizers)),
                (CapabilityKind::Parser, key_set(parser_models)),
                (CapabilityKind::Morphology, key_set(morphology)),
                (CapabilityKind::Embeddings, key_set(embeddings)),
            ],
            |language| {
                let comparator: Arc<dyn Comparator> = Arc::new(TextComparator::new(
                    tokenizers?.get(language)?.clone(),
                    parser_models?.get(language)?.clone(),
                    morphology?.get(language)?.clone(),
                    embeddings?.get(language)?.clone(),
                ));
                Some(comparator)
            },
        );

        let registry = CapabilityRegistry {
            tokenizers: self.tokenizers.into(),
            language_detector: self.language_detector.into(),
            parsers,
            classifiers: self.classifiers.into(),
            frame_extractors: self.frame_extractors.into(),
            labelers: self.labelers.into(),
            location_labeler: self.location_labeler.into(),
            locations: self.locations.into(),
            morphology: self.morphology.into(),
            embeddings: self.embeddings.into(),
            comparators,
            summarizers,
        };
        debug!(capabilities = ?registry.capabilities(), "capability registry built");
        registry
    }
}

fn insert<K: Ord, M: ?Sized>(slot: &mut Option<Keyed<K, M>>, key: K, model: Arc<M>) {
    slot.get_or_insert_with(BTreeMap::new).insert(key, model);
}

fn loaded(capability: CapabilityKind, key: &dyn Display, path: &Path) {
    info!(capability = %capability, key = %key, path = %path.display(), "model loaded");
    metrics::counter!(telemetry::MODELS_LOADED_TOTAL, "capability" => capability.as_str())
        .increment(1);
}

fn load_keyed<K, M, F>(
    capability: CapabilityKind,
    files: BTreeMap<K, PathBuf>,
    load: F,
) -> Result<Keyed<K, M>>
where
    K: Ord + Display,
    M: ?Sized,
    F: Fn(&K, &Path) -> Result<Arc<M>>,
{
    files
        .into_iter()
        .map(|(key, path)| {
            let model = load(&key, &path)?;
            loaded(capability, &key, &path);
            Ok((key, model))
        })
        .collect()
}

fn load_single<M, F>(capability: CapabilityKind, path: &Path, load: F) -> Result<Arc<M>>
where
    M: ?Sized,
    F: FnOnce(&Path) -> Result<Arc<M>>,
{
    if !path.is_file() {
        return Err(MimirError::Configuration(format!(
            "{capability} file does not exist: {path:?}"
        )));
    }
    let model = load(path)?;
    info!(capability = %capability, path = %path.display(), "model loaded");
    metrics::counter!(telemetry::MODELS_LOADED_TOTAL, "capability" => capability.as_str())
        .increment(1);
    Ok(model)
}

fn load_classifiers(dir: &Path, auxiliary: Option<&Path>) -> Result<Keyed<Domain, dyn Classifier>> {
    let files = keys::scan_domains(dir, CapabilityKind::Classifier)?;
    let vectors = match auxiliary {
        Some(aux_dir) => {
            let vectors = keys::scan_domains(aux_dir, CapabilityKind::Embeddings)?;
            check_auxiliary(
                CapabilityKind::Classifier,
                "embeddings",
                &files.keys().cloned().collect(),
                &vectors.keys().cloned().collect(),
            )?;
            vectors
        }
        None => BTreeMap::new(),
    };

    load_keyed(CapabilityKind::Classifier, files, |domain, path| {
        let classifier = KeywordClassifier::from_file(path)?;
        let classifier: Arc<dyn Classifier> = match vectors.get(domain) {
            Some(vectors_path) => {
                let embeddings = WordEmbeddings::from_file(vectors_path)?;
                loaded(CapabilityKind::Embeddings, domain, vectors_path);
                Arc::new(classifier.with_embeddings(Arc::new(embeddings)))
            }
            None => Arc::new(classifier),
        };
        Ok(classifier)
    })
}

/// The auxiliary keys must equal the primary keys: each side missing a key
/// the other has is fatal.
pub(crate) fn check_auxiliary<K: Ord + Display>(
    capability: CapabilityKind,
    resource: &'static str,
    primary: &BTreeSet<K>,
    auxiliary: &BTreeSet<K>,
) -> Result<()> {
    match primary.symmetric_difference(auxiliary).next() {
        Some(key) => Err(MimirError::MissingAuxiliaryResource {
            capability: capability.as_str(),
            resource,
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}
