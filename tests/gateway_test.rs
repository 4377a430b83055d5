mod common;

use common::fixture;
use mimir::models::Classifier;
use mimir::registry::ModelsConfig;
use mimir::types::LabelScore;
use mimir::{
    Candidate, CandidateId, Classification, DomainOutput, ErrorKind, Mimir, MimirError,
    RegistryBuilder, RequestContext,
};

// ============================================================================
// Language resolution
// ============================================================================

#[test]
fn no_detector_and_no_language_is_unresolved() {
    let gateway = fixture().gateway();
    for err in [
        gateway.tokenize(&RequestContext::new("Hello")).unwrap_err(),
        gateway.parse(&RequestContext::new("Hello")).unwrap_err(),
        gateway.summarize(&RequestContext::new("Hello")).unwrap_err(),
        gateway
            .compare(&RequestContext::new("Hello"), &[Candidate::new(1, "hi")])
            .unwrap_err(),
    ] {
        assert!(matches!(err, MimirError::LanguageUnresolved), "got {err:?}");
        assert_eq!(err.status(), 400);
    }
}

#[test]
fn forced_language_overrides_the_text() {
    let gateway = fixture().gateway();
    let tokenized = gateway
        .tokenize(&RequestContext::new("Bonjour").language("en"))
        .unwrap();
    assert_eq!(tokenized.language.code(), "en");
    assert_eq!(tokenized.sentences.len(), 1);
    assert_eq!(tokenized.sentences[0].tokens[0].text, "Bonjour");
    assert!(tokenized.distribution.is_none());
}

#[test]
fn every_configured_key_is_accepted() {
    let gateway = fixture().gateway();
    for code in ["en", "fr"] {
        gateway
            .tokenize(&RequestContext::new("text").language(code))
            .unwrap();
        gateway
            .parse(&RequestContext::new("text").language(code))
            .unwrap();
    }
    for domain in ["news", "sports"] {
        gateway
            .categorize(&RequestContext::new("text").domain(domain))
            .unwrap();
    }
}

#[test]
fn comparator_is_missing_for_languages_without_morphology() {
    let gateway = fixture().gateway();
    let err = gateway
        .compare(
            &RequestContext::new("le chat").language("fr"),
            &[Candidate::new(1, "le chien")],
        )
        .unwrap_err();
    assert!(matches!(err, MimirError::LanguageNotSupported(ref code) if code == "fr"));
}

#[test]
fn detection_picks_the_language_and_reports_scores_on_request() {
    let gateway = fixture().with_detector().gateway();

    let detection = gateway
        .detect_language(&RequestContext::new("the cat and the dog"))
        .unwrap();
    assert_eq!(detection.language.code(), "en");
    assert!(detection.distribution.is_none());

    let detection = gateway
        .detect_language(&RequestContext::new("le chat et la souris").with_distribution())
        .unwrap();
    assert_eq!(detection.language.code(), "fr");
    let distribution = detection.distribution.unwrap();
    assert_eq!(distribution.len(), 2);
    assert!(distribution[0].score >= distribution[1].score);
}

#[test]
fn detected_language_selects_the_model() {
    let gateway = fixture().with_detector().gateway();
    let tokenized = gateway
        .tokenize(&RequestContext::new("the dog and the cat").with_distribution())
        .unwrap();
    assert_eq!(tokenized.language.code(), "en");
    assert!(tokenized.distribution.is_some());
}

#[test]
fn detection_without_a_detector_is_unresolved() {
    let err = fixture()
        .gateway()
        .detect_language(&RequestContext::new("the cat"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LanguageUnresolved);
}

#[test]
fn per_token_detection_skips_punctuation() {
    let gateway = fixture().with_detector().gateway();
    let tokens = gateway
        .detect_language_per_token(&RequestContext::new("the , la"))
        .unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.token.text.as_str()).collect();
    assert_eq!(texts, ["the", "la"]);
    assert!(tokens.iter().all(|t| t.distribution.is_none()));
}

#[test]
fn blank_text_is_a_validation_error() {
    let gateway = fixture().gateway();
    let err = gateway
        .tokenize(&RequestContext::new("   ").language("en"))
        .unwrap_err();
    assert!(matches!(err, MimirError::BlankText));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ============================================================================
// Parse and summarize
// ============================================================================

#[test]
fn parse_attaches_tokens_to_the_verb() {
    let gateway = fixture().gateway();
    let parsed = gateway
        .parse(&RequestContext::new("The dog barks.").language("en"))
        .unwrap();
    let tokens = &parsed.sentences[0].tokens;
    let forms: Vec<&str> = tokens.iter().map(|t| t.form.as_str()).collect();
    assert_eq!(forms, ["The", "dog", "barks", "."]);

    let root = tokens.iter().find(|t| t.head == 0).unwrap();
    assert_eq!(root.form, "barks");
    assert_eq!(root.relation, "root");
    assert_eq!((tokens[0].head, tokens[0].relation.as_str()), (2, "det"));
    assert_eq!((tokens[1].head, tokens[1].relation.as_str()), (3, "nsubj"));
}

#[test]
fn summarize_scores_terms_and_sentences() {
    let gateway = fixture().gateway();
    let summarized = gateway
        .summarize(
            &RequestContext::new("The dog barks. The dog sleeps. A cat sits.").language("en"),
        )
        .unwrap();
    let summary = summarized.summary;
    assert_eq!(summary.keywords[0], "dog");
    assert_eq!(summary.salience[0].term, "dog");
    assert_eq!(summary.sentences.len(), 3);
    assert!(summary.salience.iter().all(|t| t.term != "the"));
}

// ============================================================================
// Domain commands
// ============================================================================

#[test]
fn fan_out_returns_one_result_per_domain() {
    let gateway = fixture().gateway();
    let ctx = RequestContext::new("the team scored a goal in the match");

    let fan_out = gateway.categorize(&ctx).unwrap();
    let DomainOutput::FanOut(results) = &fan_out else {
        panic!("expected a fan-out");
    };
    let domains: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(domains, ["news", "sports"]);
    assert_eq!(results[0].result.category, "sport");
    assert_eq!(results[1].result.category, "football");

    let single = gateway.categorize(&ctx.clone().domain("sports")).unwrap();
    let DomainOutput::Single(tagged) = single else {
        panic!("expected a single result");
    };
    assert_eq!(tagged, results[1]);
}

/// Always answers with one category.
struct Steady(&'static str);

impl Classifier for Steady {
    fn classify(&self, _words: &[String]) -> mimir::Result<Classification> {
        Classification::from_distribution(vec![LabelScore {
            label: self.0.to_string(),
            score: 1.0,
        }])
        .ok_or_else(|| MimirError::Model("empty distribution".to_string()))
    }
}

/// Fails every call.
struct Broken;

impl Classifier for Broken {
    fn classify(&self, _words: &[String]) -> mimir::Result<Classification> {
        Err(MimirError::Model("weights are corrupted".to_string()))
    }
}

#[test]
fn fan_out_aborts_on_the_first_failing_domain() {
    let registry = RegistryBuilder::new()
        .classifier("alpha", Steady("ok"))
        .classifier("beta", Broken);
    let gateway = Mimir::builder().registry(registry).build().unwrap();

    let err = gateway
        .categorize(&RequestContext::new("anything at all"))
        .unwrap_err();
    assert!(matches!(err, MimirError::Model(ref message) if message.contains("corrupted")));
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.status(), 500);

    let healthy = gateway
        .categorize(&RequestContext::new("anything at all").domain("alpha"))
        .unwrap();
    let DomainOutput::Single(tagged) = healthy else {
        panic!("expected a single result");
    };
    assert_eq!(tagged.domain.as_str(), "alpha");
    assert_eq!(tagged.result.category, "ok");

    assert!(
        gateway
            .categorize(&RequestContext::new("anything at all").domain("beta"))
            .is_err()
    );
}

#[test]
fn unknown_domains_are_rejected() {
    let gateway = fixture().gateway();
    let err = gateway
        .extract_frames(&RequestContext::new("book a flight").domain("weather"))
        .unwrap_err();
    assert!(matches!(err, MimirError::InvalidDomain(ref name) if name == "weather"));
}

#[test]
fn distributions_are_opt_in() {
    let gateway = fixture().gateway();
    let ctx = RequestContext::new("vote in the election").domain("news");

    let plain = gateway.categorize(&ctx).unwrap();
    assert!(plain.results()[0].result.distribution.is_none());

    let full = gateway.categorize(&ctx.with_distribution()).unwrap();
    let distribution = full.results()[0].result.distribution.clone().unwrap();
    assert_eq!(distribution.len(), 2);
    let total: f64 = distribution.iter().map(|s| s.score).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn frames_carry_intent_and_slots() {
    let gateway = fixture().gateway();
    let output = gateway
        .extract_frames(&RequestContext::new("Book a flight to New York tomorrow").domain("travel"))
        .unwrap();
    let frame = &output.results()[0].result;
    assert_eq!(frame.intent, "book_flight");

    let slots: Vec<(&str, &str)> = frame
        .slots
        .iter()
        .map(|s| (s.slot.as_str(), s.value.as_str()))
        .collect();
    assert_eq!(slots, [("city", "New York"), ("date", "tomorrow")]);
    assert_eq!((frame.slots[0].start, frame.slots[0].end), (17, 25));
}

#[test]
fn labels_use_bio_tags() {
    let gateway = fixture().gateway();
    let output = gateway
        .label(&RequestContext::new("Ada Lovelace visited London"))
        .unwrap();
    let labels: Vec<&str> = output.results()[0]
        .result
        .tokens
        .iter()
        .map(|t| t.label.as_str())
        .collect();
    assert_eq!(labels, ["B-PER", "I-PER", "O", "B-LOC"]);
}

#[test]
fn domain_commands_with_a_language_need_its_tokenizer() {
    let gateway = fixture().gateway();
    let err = gateway
        .categorize(&RequestContext::new("goal").language("de"))
        .unwrap_err();
    assert!(matches!(err, MimirError::LanguageNotSupported(ref code) if code == "de"));

    gateway
        .categorize(&RequestContext::new("goal").language("fr"))
        .unwrap();
}

// ============================================================================
// Locations
// ============================================================================

#[test]
fn explicit_candidates_are_resolved() {
    let gateway = fixture().gateway();
    let found = gateway
        .find_locations(
            &RequestContext::new("ignored"),
            Some(vec!["paris".into(), "Atlantis".into(), "NYC".into()]),
        )
        .unwrap();
    let ids: Vec<&str> = found
        .locations
        .iter()
        .map(|m| m.location.id.as_str())
        .collect();
    assert_eq!(ids, ["2988507", "5128581"]);
    assert!(found.locations[0].start.is_none());
}

#[test]
fn candidates_are_found_in_the_text() {
    let gateway = fixture().gateway();
    let found = gateway
        .find_locations(
            &RequestContext::new("We flew from Paris to New York.").language("en"),
            None,
        )
        .unwrap();
    let matches: Vec<(&str, Option<usize>, Option<usize>)> = found
        .locations
        .iter()
        .map(|m| (m.candidate.as_str(), m.start, m.end))
        .collect();
    assert_eq!(
        matches,
        [("Paris", Some(13), Some(18)), ("New York", Some(22), Some(30))]
    );
}

#[test]
fn derived_candidates_need_a_labeler() {
    let fixture = fixture();
    let gateway = Mimir::builder()
        .models(ModelsConfig {
            location_labeler: None,
            ..fixture.models.clone()
        })
        .build()
        .unwrap();

    let err = gateway
        .find_locations(&RequestContext::new("Paris").language("en"), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(err.to_string().contains("candidate"));
}

// ============================================================================
// Compare
// ============================================================================

fn candidates() -> Vec<Candidate> {
    vec![
        Candidate::new(1, "cars drive on the road"),
        Candidate::new(2, "the cat barked"),
        Candidate::new(3, "a dog"),
    ]
}

#[test]
fn compare_ranks_every_candidate() {
    let gateway = fixture().gateway();
    let comparison = gateway
        .compare(&RequestContext::new("dogs bark").language("en"), &candidates())
        .unwrap();

    let mut ids: Vec<CandidateId> = comparison.results.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids.last(), Some(&CandidateId::Number(1)));
    ids.sort_by_key(|id| id.to_string());
    assert_eq!(ids, [1, 2, 3].map(CandidateId::Number));
    assert!(
        comparison
            .results
            .windows(2)
            .all(|w| w[0].score >= w[1].score)
    );
}

#[test]
fn compare_is_independent_of_chunk_size() {
    let fixture = fixture();
    let ctx = RequestContext::new("dogs bark").language("en");

    let results: Vec<_> = [1, 2, 64]
        .into_iter()
        .map(|chunk_size| {
            Mimir::builder()
                .models(fixture.models.clone())
                .compare_workers(2)
                .chunk_size(chunk_size)
                .build()
                .unwrap()
                .compare(&ctx, &candidates())
                .unwrap()
                .results
        })
        .collect();

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0], results[2]);
}

#[test]
fn compare_accepts_string_ids_and_no_candidates() {
    let gateway = fixture().gateway();
    let ctx = RequestContext::new("dogs bark").language("en");

    let comparison = gateway
        .compare(&ctx, &[Candidate::new("doc-a", "a dog")])
        .unwrap();
    assert_eq!(comparison.results[0].id, CandidateId::from("doc-a"));

    assert!(gateway.compare(&ctx, &[]).unwrap().results.is_empty());
}
