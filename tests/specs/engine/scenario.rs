//! End-to-end scenario: welcome stage, one click, second stage

use crate::prelude::*;
use ep_core::TextMode;
use similar_asserts::assert_eq;

#[test]
fn welcome_stage_renders_single_next_button() {
    let engine = engine(SCENARIO);
    let rendered = engine.get_rendered_stage("1", "1", "en").unwrap();

    assert_eq!(rendered.text, "Welcome");
    assert_eq!(rendered.mode, TextMode::Plain);
    assert_eq!(labels(&engine, "1", "1", "en"), vec![vec!["Next".to_string()]]);
    assert_eq!(
        payloads(&engine, "1", "1", "en"),
        vec![format!("{}\nen", option_key("1", "1", "1"))]
    );
}

#[test]
fn second_stage_has_no_buttons_without_navigation() {
    let engine = engine(SCENARIO);
    let rendered = engine.get_rendered_stage("1", "2", "en").unwrap();

    assert_eq!(rendered.text, "Stage Two");
    assert!(rendered.layout.is_none());
}

#[tokio::test]
async fn clicking_next_edits_the_message_into_stage_two() {
    let engine = engine(SCENARIO);
    let payload = format!("{}\nen", option_key("1", "1", "1"));

    let outcome = engine.on_event(&click(&payload)).await.unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::Transitioned {
            procedure_id: "1".to_string(),
            stage_id: "2".to_string()
        }
    );
    assert_eq!(
        engine.transport().calls(),
        vec![TransportCall::Edit {
            target: DISPLAYED,
            text: "Stage Two".to_string(),
            mode: TextMode::Plain,
            layout: None,
        }]
    );
}

#[tokio::test]
async fn stale_click_after_transition_is_harmless() {
    let engine = engine(SCENARIO);
    let payload = format!("{}\nen", option_key("1", "1", "1"));

    engine.on_event(&click(&payload)).await.unwrap();
    engine.on_event(&click(&payload)).await.unwrap();

    // The old button still resolves; the message is re-edited, not duplicated
    assert_eq!(engine.transport().edits().len(), 2);
    assert!(engine
        .transport()
        .calls()
        .iter()
        .all(|call| matches!(call, TransportCall::Edit { .. })));
}
