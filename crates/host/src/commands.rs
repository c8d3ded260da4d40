// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text commands: `/start`, `/start_<language>` and the fallback reply

use crate::config::StartConfig;
use ep_adapters::{TransportAdapter, TransportError};
use ep_core::TextMode;
use ep_engine::ProcedureEngine;

const START: &str = "/start";

/// What a text message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    /// `/start`: list the per-language start commands
    Menu,
    /// `/start_<language>`, resolved to a supported language
    Start(String),
    /// Anything else
    Unknown,
}

/// Match a message against the start commands.
///
/// Languages match case-insensitively and resolve to their configured spelling.
pub fn parse_command(text: &str, languages: &[String]) -> TextCommand {
    let text = text.trim();
    if text == START {
        return TextCommand::Menu;
    }

    text.strip_prefix(START)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|requested| {
            languages
                .iter()
                .find(|language| language.eq_ignore_ascii_case(requested))
        })
        .map_or(TextCommand::Unknown, |language| {
            TextCommand::Start(language.clone())
        })
}

/// Text listing one start command per supported language
pub fn menu_text(languages: &[String]) -> String {
    let mut text = String::from("Choose a language:");
    for language in languages {
        text.push('\n');
        text.push_str(START);
        text.push('_');
        text.push_str(language);
    }
    text
}

/// Answer a text message
pub async fn handle_message<T: TransportAdapter>(
    engine: &ProcedureEngine<T>,
    start: &StartConfig,
    chat_id: i64,
    text: &str,
) -> Result<TextCommand, TransportError> {
    let command = parse_command(text, engine.supported_languages());
    let transport = engine.transport();

    match &command {
        TextCommand::Menu => {
            transport
                .send_message(
                    chat_id,
                    &menu_text(engine.supported_languages()),
                    TextMode::Plain,
                    None,
                )
                .await?;
        }
        TextCommand::Start(language) => {
            match engine.get_rendered_stage(&start.procedure, &start.stage, language) {
                Some(stage) => {
                    transport
                        .send_message(chat_id, stage.text, stage.mode, stage.layout)
                        .await?;
                }
                None => tracing::warn!(
                    procedure = %start.procedure,
                    stage = %start.stage,
                    %language,
                    "start stage not found"
                ),
            }
        }
        TextCommand::Unknown => {
            transport
                .send_message(chat_id, &start.fallback_text, TextMode::Plain, None)
                .await?;
        }
    }

    Ok(command)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
