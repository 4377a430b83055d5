//! Language and domain resolution.
//!
//! Resolution decides which key of a capability serves a request:
//!
//! 1. A forced language wins unconditionally.
//! 2. Otherwise the language detector runs, if one is loaded.
//! 3. Otherwise the language is unresolved.
//!
//! The resulting language must then be a key of the capability being
//! invoked. The same text can be tokenizable in a language yet not
//! parsable in it.
//!
//! Domain-keyed capabilities either use the requested domain or fan out
//! over every loaded domain.

use std::sync::Arc;

use crate::MimirError;
use crate::models::LanguageDetector;
use crate::registry::Keyed;
use crate::types::{Domain, Language, LanguageScore};

/// Why a request could not be matched to a capability key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No language was forced and no detector is loaded.
    Unresolved,
    /// The language (by code) is not a key of the capability.
    NotSupported(String),
    InvalidDomain(String),
}

impl From<ResolveError> for MimirError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Unresolved => MimirError::LanguageUnresolved,
            ResolveError::NotSupported(code) => MimirError::LanguageNotSupported(code),
            ResolveError::InvalidDomain(name) => MimirError::InvalidDomain(name),
        }
    }
}

/// The language a request runs in.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub language: Language,
    /// Detector scores, present only when detection ran.
    pub distribution: Option<Vec<LanguageScore>>,
}

impl Resolution {
    pub fn forced(language: Language) -> Self {
        Self {
            language,
            distribution: None,
        }
    }
}

/// Resolves request languages, detecting them when needed.
#[derive(Clone, Default)]
pub struct LanguageResolver {
    detector: Option<Arc<dyn LanguageDetector>>,
}

impl LanguageResolver {
    pub fn new(detector: Option<Arc<dyn LanguageDetector>>) -> Self {
        Self { detector }
    }

    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    /// Run the detector on `text`.
    pub fn detect(&self, text: &str) -> crate::Result<Resolution> {
        let detector = self.detector.as_ref().ok_or(ResolveError::Unresolved)?;
        let distribution = detector.detect(text)?;
        let best = distribution
            .first()
            .ok_or_else(|| MimirError::Model("language detector returned no scores".to_string()))?;
        Ok(Resolution {
            language: best.language,
            distribution: Some(distribution),
        })
    }

    /// Resolve the language of `text` and pick its model from `models`.
    ///
    /// `forced` is a caller-supplied ISO 639-1 code; it skips detection.
    pub fn resolve<M: ?Sized>(
        &self,
        text: &str,
        forced: Option<&str>,
        models: &Keyed<Language, M>,
    ) -> crate::Result<(Resolution, Arc<M>)> {
        let resolution = match forced {
            Some(code) => Resolution::forced(parse_language(code)?),
            None => self.detect(text)?,
        };
        let model = select(resolution.language, models)?;
        Ok((resolution, model))
    }
}

/// Parse a caller-supplied language code.
///
/// A code outside ISO 639-1 can never be supported, so it is reported the
/// same way as a valid code without a model.
pub fn parse_language(code: &str) -> Result<Language, ResolveError> {
    Language::from_code(code).ok_or_else(|| ResolveError::NotSupported(code.trim().to_string()))
}

/// The model for `language`, if the capability has it.
pub fn select<M: ?Sized>(
    language: Language,
    models: &Keyed<Language, M>,
) -> Result<Arc<M>, ResolveError> {
    models
        .get(&language)
        .cloned()
        .ok_or_else(|| ResolveError::NotSupported(language.code().to_string()))
}

/// Models a domain command runs: the named domain only, or every loaded
/// domain in key order when none is named.
pub fn select_domains<'a, M: ?Sized>(
    domain: Option<&str>,
    models: &'a Keyed<Domain, M>,
) -> Result<Vec<(&'a Domain, &'a Arc<M>)>, ResolveError> {
    match domain {
        Some(name) => models
            .get_key_value(name)
            .map(|entry| vec![entry])
            .ok_or_else(|| ResolveError::InvalidDomain(name.to_string())),
        None => Ok(models.iter().collect()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::Result;

    struct Fixed(&'static str);

    impl LanguageDetector for Fixed {
        fn languages(&self) -> Vec<Language> {
            Language::from_code(self.0).into_iter().collect()
        }

        fn detect(&self, _text: &str) -> Result<Vec<LanguageScore>> {
            Ok(self
                .languages()
                .into_iter()
                .map(|language| LanguageScore {
                    language,
                    score: 1.0,
                })
                .collect())
        }
    }

    fn models(codes: &[&str]) -> Keyed<Language, str> {
        codes
            .iter()
            .map(|c| (Language::from_code(c).unwrap(), Arc::from(*c)))
            .collect()
    }

    #[test]
    fn forced_language_skips_detection() {
        let resolver = LanguageResolver::new(Some(Arc::new(Fixed("fr"))));
        let (resolution, model) = resolver
            .resolve("Bonjour", Some("en"), &models(&["en", "fr"]))
            .unwrap();
        assert_eq!(resolution.language.code(), "en");
        assert!(resolution.distribution.is_none());
        assert_eq!(&*model, "en");
    }

    #[test]
    fn detection_reports_its_distribution() {
        let resolver = LanguageResolver::new(Some(Arc::new(Fixed("fr"))));
        let (resolution, _) = resolver.resolve("Bonjour", None, &models(&["fr"])).unwrap();
        assert_eq!(resolution.language.code(), "fr");
        assert_eq!(resolution.distribution.map(|d| d.len()), Some(1));
    }

    #[test]
    fn no_detector_and_no_forced_language_is_unresolved() {
        let err = LanguageResolver::default()
            .resolve("Hello", None, &models(&["en"]))
            .unwrap_err();
        assert!(matches!(err, MimirError::LanguageUnresolved));
    }

    #[test]
    fn unsupported_languages_name_their_code() {
        let resolver = LanguageResolver::default();
        let err = resolver.resolve("x", Some("fr"), &models(&["en"])).unwrap_err();
        assert!(matches!(err, MimirError::LanguageNotSupported(ref c) if c == "fr"));

        let err = resolver.resolve("x", Some("xx"), &models(&["en"])).unwrap_err();
        assert!(matches!(err, MimirError::LanguageNotSupported(ref c) if c == "xx"));
    }

    #[test]
    fn domains_are_explicit_or_fanned_out() {
        let models: Keyed<Domain, str> = BTreeMap::from([
            (Domain::new("sports"), Arc::from("s")),
            (Domain::new("news"), Arc::from("n")),
        ]);

        let all: Vec<&str> = select_domains(None, &models)
            .unwrap()
            .into_iter()
            .map(|(d, _)| d.as_str())
            .collect();
        assert_eq!(all, ["news", "sports"]);

        assert_eq!(select_domains(Some("news"), &models).unwrap().len(), 1);
        assert_eq!(
            select_domains(Some("weather"), &models).unwrap_err(),
            ResolveError::InvalidDomain("weather".into())
        );
    }
}
