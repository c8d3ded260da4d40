//! Event routing specs
//!
//! Every rendered payload routes back to the option that produced it;
//! anything else is dropped without side effects.

use crate::prelude::*;
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Vec<ClickDetails>>>;

/// Engine over the navigation document with a recording handler on every
/// option; handlers on stage 2 ask to stay
fn recording_engine() -> (ProcedureEngine<FakeTransport>, Seen) {
    let mut engine = engine_from(&navigation_document());
    let seen: Seen = Arc::default();

    let options: Vec<(String, String, String)> = engine
        .graph()
        .options()
        .map(|o| (o.procedure_id.clone(), o.stage_id.clone(), o.id.clone()))
        .collect();
    for (procedure, stage, option) in options {
        let seen = seen.clone();
        let stay = stage == "2";
        engine
            .register_option_handler(
                &procedure,
                &stage,
                &option,
                handler_fn(move |_: FakeTransport, _: Update, details: ClickDetails| {
                    let seen = seen.clone();
                    async move {
                        seen.lock().unwrap().push(details);
                        Ok::<_, HandlerError>(if stay {
                            HandlerResult::stay()
                        } else {
                            HandlerResult::proceed()
                        })
                    }
                }),
            )
            .unwrap();
    }

    (engine, seen)
}

#[tokio::test]
async fn every_rendered_payload_routes_to_its_option() {
    let (engine, seen) = recording_engine();

    for language in ["en", "fa"] {
        for stage in ["1", "2", "3"] {
            for payload in payloads(&engine, "1", stage, language) {
                seen.lock().unwrap().clear();

                let outcome = engine.on_event(&click(&payload)).await.unwrap();
                assert!(!matches!(outcome, RouteOutcome::Ignored(_)), "{}", payload);

                let parsed = CallbackPayload::parse(&payload).unwrap();
                let option = engine.graph().option_by_key(&parsed.option_key).unwrap();
                assert_eq!(
                    *seen.lock().unwrap(),
                    vec![ClickDetails {
                        language: language.to_string(),
                        procedure_id: "1".to_string(),
                        stage_id: stage.to_string(),
                        option_id: option.id.clone(),
                    }]
                );
            }
        }
    }
}

#[tokio::test]
async fn transition_requires_next_stage_message_and_consent() {
    let (engine, _) = recording_engine();

    // Stage 1 handler proceeds: transition
    let next = payloads(&engine, "1", "1", "en").remove(0);
    assert!(matches!(
        engine.on_event(&click(&next)).await.unwrap(),
        RouteOutcome::Transitioned { .. }
    ));
    assert_eq!(engine.transport().edits().len(), 1);

    // Stage 2 handlers ask to stay
    let stay = payloads(&engine, "1", "2", "en").remove(0);
    assert_eq!(
        engine.on_event(&click(&stay)).await.unwrap(),
        RouteOutcome::Handled {
            handler_invoked: true
        }
    );
    assert_eq!(engine.transport().edits().len(), 1);

    // No displayed message to edit
    let detached = Update::CallbackQuery {
        id: "spec".to_string(),
        chat_id: DISPLAYED.chat_id,
        message_id: None,
        data: Some(next),
    };
    assert_eq!(
        engine.on_event(&detached).await.unwrap(),
        RouteOutcome::Handled {
            handler_invoked: true
        }
    );
    assert_eq!(engine.transport().edits().len(), 1);
}

#[tokio::test]
async fn option_without_handler_still_transitions() {
    let engine = engine_from(&navigation_document());
    let payload = payloads(&engine, "1", "1", "fa").remove(0);

    engine.on_event(&click(&payload)).await.unwrap();

    assert_eq!(last_edit_text(&engine).as_deref(), Some("مرحله دو"));
}

#[tokio::test]
async fn malformed_events_have_no_effect() {
    let (engine, seen) = recording_engine();
    let valid = payloads(&engine, "1", "1", "en").remove(0);
    let key = CallbackPayload::parse(&valid).unwrap().option_key;

    let events = vec![
        Update::Message {
            chat_id: DISPLAYED.chat_id,
            text: "/start_en".to_string(),
        },
        Update::CallbackQuery {
            id: "spec".to_string(),
            chat_id: DISPLAYED.chat_id,
            message_id: Some(DISPLAYED.message_id),
            data: None,
        },
        click(""),
        click(&key),
        click(&format!("{}\nen\nextra", key)),
        click(&format!("{}\nde", key)),
        click(&format!("{}\n", key)),
        click(&CallbackPayload::new(option_key("1", "1", "9"), "en").encode()),
        click(&CallbackPayload::new(option_key("2", "1", "1"), "en").encode()),
    ];

    for event in &events {
        let outcome = engine.on_event(event).await.unwrap();
        assert!(matches!(outcome, RouteOutcome::Ignored(_)), "{:?}", event);
    }
    assert!(seen.lock().unwrap().is_empty());
    assert!(engine.transport().calls().is_empty());
}
