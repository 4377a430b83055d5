//! Command dispatch over the capability registry.
//!
//! [`Gateway`] runs one command per call: it validates the text, resolves
//! the language or domains, invokes the models, and assembles the output.
//! Every command is synchronous and CPU-bound; async callers run them on a
//! blocking thread.
//!
//! Each call is recorded in the `mimir_requests_total` and
//! `mimir_request_duration_seconds` metrics, labelled with the command and
//! its outcome.

mod builder;
mod context;

use std::sync::Arc;
use std::time::Instant;

use rayon::ThreadPool;
use tracing::instrument;

pub use builder::{CompareConfig, Mimir, MimirBuilder};
pub use context::RequestContext;

use crate::models::{Tokenizer, labeled_spans, rank};
use crate::registry::{Capability, CapabilityRegistry};
use crate::resolve::{LanguageResolver, parse_language, select, select_domains};
use crate::telemetry;
use crate::types::text::split_tokens;
use crate::types::{
    Candidate, Capabilities, CapabilityKind, Classification, Comparison, Detection, DomainOutput,
    Frame, LabeledToken, Labels, LocationMatch, Locations, Parsed, Summarized, Tagged,
    TokenLanguage, Token, Tokenized,
};
use crate::{MimirError, Result};

/// Entity label the location labeler marks place names with.
const LOCATION_ENTITY: &str = "LOC";

/// Runs commands against a shared, read-only registry.
///
/// Cloning is cheap; clones share the registry and the comparison pool.
#[derive(Clone)]
pub struct Gateway {
    registry: Arc<CapabilityRegistry>,
    resolver: LanguageResolver,
    pool: Arc<ThreadPool>,
    chunk_size: usize,
}

impl Gateway {
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn capabilities(&self) -> Capabilities {
        self.registry.capabilities()
    }

    /// Split text into sentences and tokens.
    #[instrument(skip_all, fields(command = "tokenize"))]
    pub fn tokenize(&self, ctx: &RequestContext) -> Result<Tokenized> {
        observe("tokenize", || {
            check_text(ctx)?;
            let tokenizers = require(self.registry.tokenizers(), CapabilityKind::Tokenizer)?;
            let (resolution, tokenizer) =
                self.resolver.resolve(&ctx.text, ctx.language.as_deref(), tokenizers)?;
            Ok(Tokenized {
                language: resolution.language,
                distribution: resolution.distribution.filter(|_| ctx.distribution),
                sentences: tokenizer.tokenize(&ctx.text)?,
            })
        })
    }

    /// Detect the language of the whole text.
    #[instrument(skip_all, fields(command = "detect_language"))]
    pub fn detect_language(&self, ctx: &RequestContext) -> Result<Detection> {
        observe("detect_language", || {
            check_text(ctx)?;
            let resolution = self.resolver.detect(&ctx.text)?;
            Ok(Detection {
                language: resolution.language,
                distribution: resolution.distribution.filter(|_| ctx.distribution),
            })
        })
    }

    /// Detect the language of every word token.
    #[instrument(skip_all, fields(command = "detect_language_per_token"))]
    pub fn detect_language_per_token(&self, ctx: &RequestContext) -> Result<Vec<TokenLanguage>> {
        observe("detect_language_per_token", || {
            check_text(ctx)?;
            split_tokens(&ctx.text)
                .into_iter()
                .filter(Token::is_word)
                .map(|token| {
                    let resolution = self.resolver.detect(&token.text)?;
                    Ok(TokenLanguage {
                        token,
                        language: resolution.language,
                        distribution: resolution.distribution.filter(|_| ctx.distribution),
                    })
                })
                .collect()
        })
    }

    /// Dependency-parse every sentence.
    #[instrument(skip_all, fields(command = "parse"))]
    pub fn parse(&self, ctx: &RequestContext) -> Result<Parsed> {
        observe("parse", || {
            check_text(ctx)?;
            let parsers = require(self.registry.parsers(), CapabilityKind::Parser)?;
            let (resolution, parser) =
                self.resolver.resolve(&ctx.text, ctx.language.as_deref(), parsers)?;
            Ok(Parsed {
                language: resolution.language,
                distribution: resolution.distribution.filter(|_| ctx.distribution),
                sentences: parser.parse(&ctx.text)?,
            })
        })
    }

    /// Classify the text in one domain, or in every domain.
    #[instrument(skip_all, fields(command = "categorize", domain = ctx.domain.as_deref()))]
    pub fn categorize(&self, ctx: &RequestContext) -> Result<DomainOutput<Classification>> {
        observe("categorize", || {
            check_text(ctx)?;
            let classifiers = require(self.registry.classifiers(), CapabilityKind::Classifier)?;
            let selected = select_domains(ctx.domain.as_deref(), classifiers)?;
            let words: Vec<String> = self
                .domain_tokens(ctx)?
                .iter()
                .filter(|t| t.is_word())
                .map(Token::lowercase)
                .collect();

            let results = selected
                .into_iter()
                .map(|(domain, classifier)| {
                    let result = classifier.classify(&words)?;
                    Ok(Tagged {
                        domain: domain.clone(),
                        result: if ctx.distribution {
                            result
                        } else {
                            result.without_distribution()
                        },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(domain_output(ctx, results))
        })
    }

    /// Extract intent and slots in one domain, or in every domain.
    #[instrument(skip_all, fields(command = "frames", domain = ctx.domain.as_deref()))]
    pub fn extract_frames(&self, ctx: &RequestContext) -> Result<DomainOutput<Frame>> {
        observe("frames", || {
            check_text(ctx)?;
            let extractors =
                require(self.registry.frame_extractors(), CapabilityKind::FrameExtractor)?;
            let selected = select_domains(ctx.domain.as_deref(), extractors)?;
            let tokens = self.domain_tokens(ctx)?;

            let results = selected
                .into_iter()
                .map(|(domain, extractor)| {
                    let frame = extractor.extract(&tokens)?;
                    Ok(Tagged {
                        domain: domain.clone(),
                        result: if ctx.distribution {
                            frame
                        } else {
                            frame.without_distribution()
                        },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(domain_output(ctx, results))
        })
    }

    /// Label every token in one domain, or in every domain.
    #[instrument(skip_all, fields(command = "label", domain = ctx.domain.as_deref()))]
    pub fn label(&self, ctx: &RequestContext) -> Result<DomainOutput<Labels>> {
        observe("label", || {
            check_text(ctx)?;
            let labelers = require(self.registry.labelers(), CapabilityKind::Labeler)?;
            let selected = select_domains(ctx.domain.as_deref(), labelers)?;
            let tokens = self.domain_tokens(ctx)?;

            let results = selected
                .into_iter()
                .map(|(domain, labeler)| {
                    let labels = labeler.label(&tokens)?;
                    Ok(Tagged {
                        domain: domain.clone(),
                        result: Labels {
                            tokens: zip_labels(&tokens, labels)?,
                        },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(domain_output(ctx, results))
        })
    }

    /// Resolve place names to locations.
    ///
    /// Explicit `candidates` are looked up as given. Without them, the
    /// location labeler finds candidates in the text, which then requires
    /// the text's language to have a tokenizer.
    #[instrument(skip_all, fields(command = "locations"))]
    pub fn find_locations(
        &self,
        ctx: &RequestContext,
        candidates: Option<Vec<String>>,
    ) -> Result<Locations> {
        observe("locations", || {
            check_text(ctx)?;
            let dictionary = require(self.registry.locations(), CapabilityKind::Locations)?;

            let locations = match candidates {
                Some(candidates) => candidates
                    .into_iter()
                    .filter_map(|candidate| {
                        let location = dictionary.resolve(&candidate)?;
                        Some(LocationMatch {
                            candidate,
                            start: None,
                            end: None,
                            location,
                        })
                    })
                    .collect(),
                None => {
                    let labeler = self.registry.location_labeler().present().ok_or_else(|| {
                        MimirError::Internal("no location candidate labeler configured".to_string())
                    })?;
                    let tokenizers =
                        require(self.registry.tokenizers(), CapabilityKind::Tokenizer)?;
                    let (_, tokenizer) =
                        self.resolver.resolve(&ctx.text, ctx.language.as_deref(), tokenizers)?;

                    let mut found = Vec::new();
                    for sentence in tokenizer.tokenize(&ctx.text)? {
                        let labels = labeler.label(&sentence.tokens)?;
                        check_label_count(&sentence.tokens, &labels)?;
                        for (first, last) in labeled_spans(&labels, LOCATION_ENTITY) {
                            let start = sentence.tokens[first].start;
                            let end = sentence.tokens[last].end;
                            let candidate = char_slice(&ctx.text, start, end);
                            if let Some(location) = dictionary.resolve(&candidate) {
                                found.push(LocationMatch {
                                    candidate,
                                    start: Some(start),
                                    end: Some(end),
                                    location,
                                });
                            }
                        }
                    }
                    found
                }
            };
            Ok(Locations { locations })
        })
    }

    /// Rank candidates by similarity to the text, most similar first.
    #[instrument(skip_all, fields(command = "compare", candidates = candidates.len()))]
    pub fn compare(&self, ctx: &RequestContext, candidates: &[Candidate]) -> Result<Comparison> {
        observe("compare", || {
            check_text(ctx)?;
            let comparators = require(self.registry.comparators(), CapabilityKind::Comparator)?;
            let (resolution, comparator) =
                self.resolver.resolve(&ctx.text, ctx.language.as_deref(), comparators)?;
            let results = rank(
                comparator.as_ref(),
                &ctx.text,
                candidates,
                &self.pool,
                self.chunk_size,
            )?;
            Ok(Comparison {
                language: resolution.language,
                results,
            })
        })
    }

    /// Term salience, keywords, itemsets and sentence scores.
    #[instrument(skip_all, fields(command = "summarize"))]
    pub fn summarize(&self, ctx: &RequestContext) -> Result<Summarized> {
        observe("summarize", || {
            check_text(ctx)?;
            let summarizers = require(self.registry.summarizers(), CapabilityKind::Summarizer)?;
            let (resolution, summarizer) =
                self.resolver.resolve(&ctx.text, ctx.language.as_deref(), summarizers)?;
            Ok(Summarized {
                language: resolution.language,
                summary: summarizer.summarize(&ctx.text)?,
            })
        })
    }

    /// Tokens for a domain command.
    ///
    /// A requested language must have a tokenizer, which is then used; with
    /// no language the plain word splitter runs. Detection never runs here.
    fn domain_tokens(&self, ctx: &RequestContext) -> Result<Vec<Token>> {
        let Some(code) = ctx.language.as_deref() else {
            return Ok(split_tokens(&ctx.text));
        };
        let language = parse_language(code)?;
        let tokenizer: Arc<dyn Tokenizer> = match self.registry.tokenizers().present() {
            Some(tokenizers) => select(language, tokenizers)?,
            None => return Err(MimirError::LanguageNotSupported(language.code().to_string())),
        };
        Ok(tokenizer
            .tokenize(&ctx.text)?
            .into_iter()
            .flat_map(|s| s.tokens)
            .collect())
    }
}

/// Record the outcome and duration of one command.
fn observe<T>(command: &'static str, run: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = run();
    let status = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind().as_str(),
    };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "command" => command,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "command" => command,
    )
    .record(start.elapsed().as_secs_f64());
    result
}

fn check_text(ctx: &RequestContext) -> Result<()> {
    if ctx.text.trim().is_empty() {
        return Err(MimirError::BlankText);
    }
    Ok(())
}

/// The models of a capability the caller expects to be configured.
fn require<T>(capability: &Capability<T>, kind: CapabilityKind) -> Result<&T> {
    capability
        .present()
        .ok_or_else(|| MimirError::Internal(format!("{kind} capability is not configured")))
}

fn domain_output<T>(ctx: &RequestContext, mut results: Vec<Tagged<T>>) -> DomainOutput<T> {
    match (&ctx.domain, results.pop()) {
        (Some(_), Some(one)) if results.is_empty() => DomainOutput::Single(one),
        (_, last) => {
            results.extend(last);
            DomainOutput::FanOut(results)
        }
    }
}

fn check_label_count(tokens: &[Token], labels: &[String]) -> Result<()> {
    if tokens.len() != labels.len() {
        return Err(MimirError::Model(format!(
            "labeler returned {} labels for {} tokens",
            labels.len(),
            tokens.len()
        )));
    }
    Ok(())
}

fn zip_labels(tokens: &[Token], labels: Vec<String>) -> Result<Vec<LabeledToken>> {
    check_label_count(tokens, &labels)?;
    Ok(tokens
        .iter()
        .cloned()
        .zip(labels)
        .map(|(token, label)| LabeledToken { token, label })
        .collect())
}

/// Characters `start..end` of `text`.
fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}
