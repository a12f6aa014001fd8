use crate::errors::SieveError;
use crate::label::Label;
use crate::service::PredictionService;
use crate::tests::test_corpus::{trained_artifact, trained_service};

#[test]
fn classifies_spam_example() {
    let service = trained_service();
    let result = service.predict("Win a free prize now!").unwrap();
    assert_eq!(result.label, Label::Spam);
    assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
}

#[test]
fn classifies_ham_example() {
    let service = trained_service();
    let result = service.predict("Meeting at 3pm tomorrow").unwrap();
    assert_eq!(result.label, Label::Ham);
    assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
}

#[test]
fn prediction_is_idempotent() {
    let service = trained_service();
    let a = service.predict("Claim your free reward").unwrap();
    let b = service.predict("Claim your free reward").unwrap();
    assert_eq!(a.label, b.label);
    assert_eq!(a.confidence, b.confidence);
}

#[test]
fn unseen_text_still_gets_a_label() {
    let service = trained_service();
    let result = service.predict("totally unrelated gibberish xyzzy").unwrap();
    assert!(matches!(result.label, Label::Spam | Label::Ham));
    assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
}

#[test]
fn empty_message_is_a_validation_error() {
    let service = trained_service();
    for text in ["", "   ", "\n\t"] {
        let err = service.predict(text).unwrap_err();
        assert!(matches!(err, SieveError::Validation { .. }), "{text:?}");
    }
}

#[test]
fn oversized_message_is_a_validation_error() {
    let service = PredictionService::from_artifact(trained_artifact(), 16);
    let err = service.predict("this message is longer than sixteen bytes").unwrap_err();
    assert!(matches!(err, SieveError::Validation { .. }));
}

#[test]
fn keywords_are_case_insensitive() {
    let service = trained_service();
    let result = service.predict("WIN a FREE prize").unwrap();
    let words: Vec<&str> = result.keywords.iter().map(|k| k.word.as_str()).collect();
    assert_eq!(words, vec!["win", "free", "prize"]);
}

#[test]
fn missing_artifact_degrades_to_model_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let service = PredictionService::from_artifact_dir(&dir.path().join("nope"), 16 * 1024);

    assert!(!service.ready());
    // Every attempt reports the same condition; nothing crashes per-request.
    for _ in 0..3 {
        let err = service.predict("Win a free prize now!").unwrap_err();
        assert!(matches!(err, SieveError::ModelUnavailable { .. }));
    }
}
