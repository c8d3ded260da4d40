// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler registration table

use crate::config::{HandlerAction, HandlerEntry, HostError};
use async_trait::async_trait;
use ep_adapters::TransportAdapter;
use ep_core::{TextMode, Update};
use ep_engine::{ClickDetails, HandlerError, HandlerResult, OptionHandler, ProcedureEngine};

/// Handler built from one table row
#[derive(Debug, Clone)]
pub struct TableHandler {
    action: HandlerAction,
    text: String,
    stay: bool,
}

impl TableHandler {
    pub fn from_entry(entry: &HandlerEntry) -> Result<Self, HostError> {
        let text = match (entry.action, &entry.text) {
            (HandlerAction::Reply, None) => {
                return Err(HostError::ReplyWithoutText {
                    procedure: entry.procedure.clone(),
                    stage: entry.stage.clone(),
                    option: entry.option.clone(),
                })
            }
            (_, text) => text.clone().unwrap_or_default(),
        };
        Ok(Self {
            action: entry.action,
            text,
            stay: entry.stay,
        })
    }
}

#[async_trait]
impl<T: TransportAdapter> OptionHandler<T> for TableHandler {
    async fn on_click(
        &self,
        transport: &T,
        update: &Update,
        details: &ClickDetails,
    ) -> Result<HandlerResult, HandlerError> {
        match self.action {
            HandlerAction::Log => tracing::info!(
                chat_id = update.chat_id(),
                procedure = %details.procedure_id,
                stage = %details.stage_id,
                option = %details.option_id,
                language = %details.language,
                "option clicked"
            ),
            HandlerAction::Reply => {
                transport
                    .send_message(update.chat_id(), &self.text, TextMode::Plain, None)
                    .await
                    .map_err(HandlerError::new)?;
            }
        }

        Ok(HandlerResult {
            avoid_moving_next_stage: self.stay,
        })
    }
}

/// Register every table row; an unknown option aborts startup
pub fn apply_handlers<T: TransportAdapter>(
    engine: &mut ProcedureEngine<T>,
    entries: &[HandlerEntry],
) -> Result<usize, HostError> {
    for entry in entries {
        let handler = TableHandler::from_entry(entry)?;
        engine.register_option_handler(&entry.procedure, &entry.stage, &entry.option, handler)?;
    }
    if !entries.is_empty() {
        tracing::info!(count = entries.len(), "option handlers registered");
    }
    Ok(entries.len())
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
