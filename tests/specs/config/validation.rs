//! Configuration validation specs
//!
//! A document violating exactly one invariant is rejected with the
//! specific error for that invariant.

use crate::prelude::*;
use ep_procedure::{load_document, ConfigError, EntityKind, LoadError, ParseError};

/// Run a mutation against the navigation document and return the error
fn reject(mutate: impl FnOnce(&mut Value)) -> ConfigError {
    let mut document = navigation_document();
    mutate(&mut document);
    match load_document(&document.to_string()) {
        Err(LoadError::Invalid(err)) => err,
        other => panic!("expected config error, got {:?}", other),
    }
}

fn procedure(document: &mut Value) -> &mut Value {
    &mut document["procedures"][0]
}

fn stage(document: &mut Value, index: usize) -> &mut Value {
    &mut document["procedures"][0]["stages"][index]
}

#[test]
fn navigation_document_is_valid() {
    assert!(load_document(&navigation_document().to_string()).is_ok());
}

// Invariant 1: IDs present and unique in scope

#[test]
fn missing_ids_are_rejected() {
    let err = reject(|d| {
        stage(d, 2).as_object_mut().unwrap().remove("id");
    });
    assert!(matches!(err, ConfigError::MissingId { kind: EntityKind::Stage, .. }));

    let err = reject(|d| d["buttons"][1]["id"] = Value::Null);
    assert!(matches!(err, ConfigError::MissingId { kind: EntityKind::Button, .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = reject(|d| stage(d, 2)["id"] = json!(2));
    assert!(matches!(
        err,
        ConfigError::DuplicateId { kind: EntityKind::Stage, id: 2, .. }
    ));

    let err = reject(|d| {
        stage(d, 0)["options"][0]
            .as_array_mut()
            .unwrap()
            .push(json!({ "id": 1, "buttonId": 1 }))
    });
    assert!(matches!(
        err,
        ConfigError::DuplicateId { kind: EntityKind::Option, id: 1, .. }
    ));
}

// Invariant 2: language list well-formed

#[test]
fn malformed_languages_are_rejected() {
    let err = reject(|d| d["supportedLanguages"] = json!(["en", "fa", "pt-BR"]));
    assert!(matches!(err, ConfigError::InvalidLanguageTitle { .. }));

    let err = reject(|d| d["supportedLanguages"] = json!(["en", "fa", "EN"]));
    assert_eq!(err, ConfigError::DuplicateLanguage("EN".to_string()));
}

// Invariant 3: text completeness

#[test]
fn incomplete_texts_are_rejected() {
    let err = reject(|d| {
        stage(d, 1)["text"].as_object_mut().unwrap().remove("fa");
    });
    assert!(matches!(
        err,
        ConfigError::MissingTextForLanguage { kind: EntityKind::Stage, id: 2, ref language, .. }
            if language == "fa"
    ));
}

// Invariant 4: references resolve in scope

#[test]
fn dangling_references_are_rejected() {
    let err = reject(|d| procedure(d)["rootStageId"] = json!(9));
    assert!(matches!(err, ConfigError::StageNotFound { field: "rootStageId", .. }));

    let err = reject(|d| procedure(d)["toRootButtonId"] = json!(9));
    assert!(matches!(err, ConfigError::ButtonNotFound { field: "toRootButtonId", button: 9, .. }));

    let err = reject(|d| stage(d, 2)["previousStageId"] = json!(9));
    assert!(matches!(err, ConfigError::StageNotFound { field: "previousStageId", .. }));

    let err = reject(|d| stage(d, 0)["options"][0][0]["nextStageId"] = json!(9));
    assert!(matches!(err, ConfigError::StageNotFound { field: "nextStageId", .. }));

    let err = reject(|d| stage(d, 0)["options"][0][0]["buttonId"] = json!(9));
    assert!(matches!(err, ConfigError::ButtonNotFound { field: "buttonId", .. }));
}

// Invariant 5: enabled navigation needs its button

#[test]
fn enabled_navigation_without_button_is_rejected() {
    let err = reject(|d| procedure(d)["toRootButtonId"] = Value::Null);
    assert_eq!(err, ConfigError::MissingRootButtonReference { procedure: 1 });

    let err = reject(|d| {
        procedure(d).as_object_mut().unwrap().remove("toPreviousButtonId");
    });
    assert_eq!(err, ConfigError::MissingPreviousButtonReference { procedure: 1 });
}

// Invariant 6: non-root stages point back

#[test]
fn orphan_stage_is_rejected() {
    let err = reject(|d| stage(d, 2)["previousStageId"] = Value::Null);
    assert_eq!(
        err,
        ConfigError::NoPreviousStageSpecified {
            procedure: 1,
            stage: 3
        }
    );
}

// Invariant 7: options have labels

#[test]
fn unlabelled_option_is_rejected() {
    let err = reject(|d| {
        stage(d, 1)["options"][0][0]
            .as_object_mut()
            .unwrap()
            .remove("buttonId");
    });
    assert_eq!(
        err,
        ConfigError::NoButtonSpecifiedForOption {
            procedure: 1,
            stage: 2,
            option: 1
        }
    );
}

#[test]
fn malformed_documents_are_not_config_errors() {
    assert!(matches!(
        load_document("   "),
        Err(LoadError::Malformed(ParseError::Empty))
    ));
    assert!(matches!(
        load_document("{ \"procedures\": "),
        Err(LoadError::Malformed(ParseError::Json(_)))
    ));
}
