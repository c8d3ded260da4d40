//! Shared fixtures for behavioral specs

#![allow(dead_code)]

pub use ep_adapters::{FakeTransport, TransportCall};
pub use ep_core::{option_key, stage_key, CallbackPayload, MessageRef, Update};
pub use ep_engine::{
    handler_fn, ClickDetails, HandlerError, HandlerResult, IgnoreReason, ProcedureEngine,
    RouteOutcome, TO_PREVIOUS_OPTION_ID, TO_ROOT_OPTION_ID,
};
pub use serde_json::{json, Value};

/// One procedure, two stages, one option: the smallest useful document
pub const SCENARIO: &str = r#"{
    "supportedLanguages": ["en"],
    "buttons": [{ "id": 1, "text": { "en": "Next" } }],
    "procedures": [{
        "id": 1,
        "rootStageId": 1,
        "stages": [
            {
                "id": 1,
                "text": { "en": "Welcome" },
                "options": [[{ "id": 1, "buttonId": 1, "nextStageId": 2 }]]
            },
            { "id": 2, "previousStageId": 1, "text": { "en": "Stage Two" } }
        ]
    }]
}"#;

/// Message every click in the specs originates from
pub const DISPLAYED: MessageRef = MessageRef {
    chat_id: 100,
    message_id: 200,
};

/// Document with both navigation buttons enabled; stage 2 has a declared
/// option, stage 3 is a leaf
pub fn navigation_document() -> Value {
    json!({
        "supportedLanguages": ["en", "fa"],
        "buttons": [
            { "id": 1, "text": { "en": "Next", "fa": "بعدی" } },
            { "id": 2, "text": { "en": "Back", "fa": "قبلی" } },
            { "id": 3, "text": { "en": "Home", "fa": "خانه" } }
        ],
        "procedures": [{
            "id": 1,
            "rootStageId": 1,
            "addToRootButton": true,
            "addToPreviousButton": true,
            "toRootButtonId": 3,
            "toPreviousButtonId": 2,
            "stages": [
                {
                    "id": 1,
                    "text": { "en": "Welcome", "fa": "خوش آمدید" },
                    "options": [[{ "id": 1, "buttonId": 1, "nextStageId": 2 }]]
                },
                {
                    "id": 2,
                    "previousStageId": 1,
                    "text": { "en": "Stage Two", "fa": "مرحله دو" },
                    "options": [[{ "id": 1, "buttonId": 1, "nextStageId": 3 }]]
                },
                {
                    "id": 3,
                    "previousStageId": 2,
                    "text": { "en": "Stage Three", "fa": "مرحله سه" }
                }
            ]
        }]
    })
}

pub fn engine(json: &str) -> ProcedureEngine<FakeTransport> {
    ProcedureEngine::from_json(FakeTransport::new(), json).unwrap()
}

pub fn engine_from(document: &Value) -> ProcedureEngine<FakeTransport> {
    engine(&document.to_string())
}

/// Button click on the displayed message
pub fn click(payload: &str) -> Update {
    Update::CallbackQuery {
        id: "spec".to_string(),
        chat_id: DISPLAYED.chat_id,
        message_id: Some(DISPLAYED.message_id),
        data: Some(payload.to_string()),
    }
}

/// Labels of a rendered stage, row by row
pub fn labels(
    engine: &ProcedureEngine<FakeTransport>,
    procedure: &str,
    stage: &str,
    language: &str,
) -> Vec<Vec<String>> {
    engine
        .get_rendered_stage(procedure, stage, language)
        .unwrap()
        .layout
        .map(|layout| {
            layout
                .rows
                .iter()
                .map(|row| row.iter().map(|b| b.text.clone()).collect())
                .collect()
        })
        .unwrap_or_default()
}

/// Payloads of every button of a rendered stage, in row order
pub fn payloads(
    engine: &ProcedureEngine<FakeTransport>,
    procedure: &str,
    stage: &str,
    language: &str,
) -> Vec<String> {
    engine
        .get_rendered_stage(procedure, stage, language)
        .unwrap()
        .layout
        .map(|layout| layout.buttons().map(|b| b.payload.clone()).collect())
        .unwrap_or_default()
}

/// Text of the last edit made through the fake transport
pub fn last_edit_text(engine: &ProcedureEngine<FakeTransport>) -> Option<String> {
    engine.transport().edits().last().map(|call| match call {
        TransportCall::Edit { text, .. } | TransportCall::Send { text, .. } => text.clone(),
    })
}
