mod common;

use common::{fixture, write};
use mimir::registry::{ModelsConfig, RegistryBuilder};
use mimir::{ErrorKind, MimirError};

fn keys(list: &Option<Vec<String>>) -> Vec<&str> {
    list.as_deref()
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect()
}

#[test]
fn loads_every_configured_capability() {
    let fixture = fixture();
    let caps = RegistryBuilder::from_config(&fixture.models)
        .unwrap()
        .build()
        .capabilities();

    assert_eq!(keys(&caps.tokenizer), ["en", "fr"]);
    assert_eq!(keys(&caps.parser), ["en", "fr"]);
    assert_eq!(keys(&caps.summarizer), ["en", "fr"]);
    assert_eq!(keys(&caps.classifier), ["news", "sports"]);
    assert_eq!(keys(&caps.frame_extractor), ["travel"]);
    assert_eq!(keys(&caps.labeler), ["people"]);
    assert!(caps.location_labeler);
    assert!(caps.locations);
    assert!(caps.language_detector.is_none());
}

#[test]
fn comparator_needs_all_four_prerequisites() {
    let fixture = fixture();
    let caps = RegistryBuilder::from_config(&fixture.models)
        .unwrap()
        .build()
        .capabilities();

    // morphology and embeddings exist for en only
    assert_eq!(keys(&caps.comparator), ["en"]);
}

#[test]
fn derived_capabilities_vanish_without_a_prerequisite() {
    let fixture = fixture();
    let models = ModelsConfig {
        tokenizers: None,
        ..fixture.models.clone()
    };
    let caps = RegistryBuilder::from_config(&models)
        .unwrap()
        .build()
        .capabilities();

    assert!(caps.tokenizer.is_none());
    assert!(caps.parser.is_none());
    assert!(caps.summarizer.is_none());
    assert!(caps.comparator.is_none());
    assert_eq!(keys(&caps.morphology), ["en"]);
}

#[test]
fn keying_is_deterministic() {
    let fixture = fixture();
    let first = RegistryBuilder::from_config(&fixture.models)
        .unwrap()
        .build()
        .capabilities();
    let second = RegistryBuilder::from_config(&fixture.models)
        .unwrap()
        .build()
        .capabilities();
    assert_eq!(first, second);
}

#[test]
fn classifier_embeddings_must_cover_every_domain() {
    let fixture = fixture();
    let root = fixture.dir.path();
    write(root, "cls-emb/news.json", r#"{"dimensions": 1, "vectors": {"vote": [1.0]}}"#);

    let models = ModelsConfig {
        classifier_embeddings: Some(root.join("cls-emb")),
        ..fixture.models.clone()
    };
    let err = RegistryBuilder::from_config(&models).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingAuxiliaryResource);
    assert!(matches!(
        err,
        MimirError::MissingAuxiliaryResource { ref key, .. } if key == "sports"
    ));
}

#[test]
fn classifier_embeddings_may_not_name_unknown_domains() {
    let fixture = fixture();
    let root = fixture.dir.path();
    for domain in ["news", "sports", "weather"] {
        write(
            root,
            &format!("cls-emb/{domain}.json"),
            r#"{"dimensions": 1, "vectors": {"goal": [1.0]}}"#,
        );
    }

    let models = ModelsConfig {
        classifier_embeddings: Some(root.join("cls-emb")),
        ..fixture.models.clone()
    };
    let err = RegistryBuilder::from_config(&models).err().unwrap();
    assert!(matches!(
        err,
        MimirError::MissingAuxiliaryResource { ref key, .. } if key == "weather"
    ));
}

#[test]
fn matching_classifier_embeddings_load() {
    let fixture = fixture();
    let root = fixture.dir.path();
    write(root, "cls-emb/emb_news.json", r#"{"dimensions": 1, "vectors": {"vote": [1.0]}}"#);
    write(root, "cls-emb/emb_sports.vec", "1 1\ngoal 1.0\n");

    let models = ModelsConfig {
        classifier_embeddings: Some(root.join("cls-emb")),
        ..fixture.models.clone()
    };
    let caps = RegistryBuilder::from_config(&models)
        .unwrap()
        .build()
        .capabilities();
    assert_eq!(keys(&caps.classifier), ["news", "sports"]);
}

#[test]
fn classifier_embeddings_without_classifiers_is_a_configuration_error() {
    let fixture = fixture();
    let models = ModelsConfig {
        classifiers: None,
        classifier_embeddings: Some(fixture.path("embeddings")),
        ..fixture.models.clone()
    };
    let err = RegistryBuilder::from_config(&models).err().unwrap();
    assert!(matches!(err, MimirError::Configuration(_)));
}

#[test]
fn language_directories_need_iso_codes() {
    let fixture = fixture();
    let root = fixture.dir.path();
    write(root, "bad-tokenizers/tokenizer_english.json", "{}");

    let models = ModelsConfig {
        tokenizers: Some(root.join("bad-tokenizers")),
        ..ModelsConfig::default()
    };
    let err = RegistryBuilder::from_config(&models).err().unwrap();
    assert!(matches!(err, MimirError::Configuration(_)));
}

#[test]
fn unreadable_models_fail_the_load() {
    let fixture = fixture();
    let root = fixture.dir.path();
    write(root, "broken/en.json", "{ not json");

    let models = ModelsConfig {
        morphology: Some(root.join("broken")),
        ..ModelsConfig::default()
    };
    let err = RegistryBuilder::from_config(&models).err().unwrap();
    assert!(err.to_string().contains("en.json"));
}

#[test]
fn missing_directories_fail_the_load() {
    let models = ModelsConfig {
        labelers: Some("/nonexistent/labelers".into()),
        ..ModelsConfig::default()
    };
    assert!(RegistryBuilder::from_config(&models).is_err());
}

#[test]
fn nothing_configured_is_an_empty_registry() {
    let caps = RegistryBuilder::from_config(&ModelsConfig::default())
        .unwrap()
        .build()
        .capabilities();
    assert_eq!(caps, mimir::Capabilities::default());
}
