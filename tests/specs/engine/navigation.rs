//! Navigation option specs
//!
//! Non-root stages gain a trailing row holding "previous" then "root",
//! each removable per stage and absent when the procedure disables it.

use crate::prelude::*;
use similar_asserts::assert_eq;

fn with_stage_flags(flags: Value) -> Value {
    let mut document = navigation_document();
    let stage = document["procedures"][0]["stages"][1]
        .as_object_mut()
        .unwrap();
    for (name, value) in flags.as_object().unwrap() {
        stage.insert(name.clone(), value.clone());
    }
    document
}

#[test]
fn non_root_stage_gains_exactly_two_options() {
    let engine = engine_from(&navigation_document());

    // two declared, plus two navigation on each of stages 2 and 3
    assert_eq!(engine.option_count(), 2 + 4);
    assert_eq!(
        labels(&engine, "1", "2", "en"),
        vec![
            vec!["Next".to_string()],
            vec!["Back".to_string(), "Home".to_string()],
        ]
    );
    assert_eq!(
        labels(&engine, "1", "3", "fa"),
        vec![vec!["قبلی".to_string(), "خانه".to_string()]]
    );
}

#[test]
fn root_stage_gains_nothing() {
    let engine = engine_from(&navigation_document());
    assert_eq!(labels(&engine, "1", "1", "en"), vec![vec!["Next".to_string()]]);
}

#[test]
fn navigation_payloads_carry_reserved_option_keys() {
    let engine = engine_from(&navigation_document());
    assert_eq!(
        payloads(&engine, "1", "3", "en"),
        vec![
            CallbackPayload::new(option_key("1", "3", TO_PREVIOUS_OPTION_ID), "en").encode(),
            CallbackPayload::new(option_key("1", "3", TO_ROOT_OPTION_ID), "en").encode(),
        ]
    );
}

#[test]
fn remove_to_previous_drops_only_previous() {
    let engine = engine_from(&with_stage_flags(json!({ "removeToPreviousButton": true })));
    assert_eq!(
        labels(&engine, "1", "2", "en"),
        vec![vec!["Next".to_string()], vec!["Home".to_string()]]
    );
    assert_eq!(engine.option_count(), 2 + 3);
}

#[test]
fn remove_to_root_drops_only_root() {
    let engine = engine_from(&with_stage_flags(json!({ "removeToRootButton": true })));
    assert_eq!(
        labels(&engine, "1", "2", "en"),
        vec![vec!["Next".to_string()], vec!["Back".to_string()]]
    );
}

#[test]
fn removing_both_drops_the_row() {
    let engine = engine_from(&with_stage_flags(json!({
        "removeToRootButton": true,
        "removeToPreviousButton": true
    })));
    assert_eq!(labels(&engine, "1", "2", "en"), vec![vec!["Next".to_string()]]);
    // stage 3 keeps its own navigation
    assert_eq!(labels(&engine, "1", "3", "en").len(), 1);
}

#[test]
fn disabled_navigation_adds_nothing() {
    let mut document = navigation_document();
    document["procedures"][0]["addToRootButton"] = json!(false);
    document["procedures"][0]["addToPreviousButton"] = json!(false);

    let engine = engine_from(&document);
    assert_eq!(engine.option_count(), 2);
    assert!(labels(&engine, "1", "3", "en").is_empty());
}

#[tokio::test]
async fn previous_returns_to_the_declared_previous_stage() {
    let engine = engine_from(&navigation_document());
    let payload = CallbackPayload::new(option_key("1", "3", TO_PREVIOUS_OPTION_ID), "fa").encode();

    let outcome = engine.on_event(&click(&payload)).await.unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::Transitioned {
            procedure_id: "1".to_string(),
            stage_id: "2".to_string()
        }
    );
    assert_eq!(last_edit_text(&engine).as_deref(), Some("مرحله دو"));
}

#[tokio::test]
async fn root_returns_to_the_root_stage() {
    let engine = engine_from(&navigation_document());
    let payload = CallbackPayload::new(option_key("1", "3", TO_ROOT_OPTION_ID), "en").encode();

    engine.on_event(&click(&payload)).await.unwrap();

    let edits = engine.transport().edits();
    assert_eq!(edits.len(), 1);
    match &edits[0] {
        TransportCall::Edit { target, text, layout, .. } => {
            assert_eq!(*target, DISPLAYED);
            assert_eq!(text, "Welcome");
            assert_eq!(layout.as_ref().map(|l| l.len()), Some(1));
        }
        other => panic!("expected edit, got {:?}", other),
    }
}
