// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Procedure engine: stage lookup, handler registration and click routing

use crate::compiler::compile;
use crate::error::{CompileError, RuntimeError};
use crate::graph::{ProcedureGraph, RenderedStage, StageOption};
use crate::handler::{ClickDetails, HandlerResult, OptionHandler};
use ep_adapters::TransportAdapter;
use ep_core::{option_key, CallbackPayload, Update};
use ep_procedure::{load_document, ProcedureDocument};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// Why an update was not routed to any option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Update carries no click payload
    NotAClick,
    /// Payload is not `<key>\n<language>`
    MalformedPayload,
    UnsupportedLanguage,
    /// No option has this key, e.g. a button from an older graph
    UnknownOption,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IgnoreReason::NotAClick => "not a button click",
            IgnoreReason::MalformedPayload => "malformed payload",
            IgnoreReason::UnsupportedLanguage => "unsupported language",
            IgnoreReason::UnknownOption => "unknown option",
        })
    }
}

/// Result of routing one update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Ignored(IgnoreReason),
    /// Option resolved but the displayed message was left as is
    Handled { handler_invoked: bool },
    /// Displayed message now shows this stage
    Transitioned { procedure_id: String, stage_id: String },
}

/// Runtime facade over a compiled procedure graph
pub struct ProcedureEngine<T> {
    transport: T,
    graph: ProcedureGraph,
    handlers: HashMap<String, Arc<dyn OptionHandler<T>>>,
}

impl<T: TransportAdapter> ProcedureEngine<T> {
    pub fn new(transport: T, graph: ProcedureGraph) -> Self {
        Self {
            transport,
            graph,
            handlers: HashMap::new(),
        }
    }

    pub fn from_document(transport: T, document: &ProcedureDocument) -> Result<Self, CompileError> {
        Ok(Self::new(transport, compile(document)?))
    }

    /// Parse, validate and compile a JSON procedure document
    pub fn from_json(transport: T, json: &str) -> Result<Self, CompileError> {
        let document = load_document(json)?;
        Self::from_document(transport, &document)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn graph(&self) -> &ProcedureGraph {
        &self.graph
    }

    pub fn supported_languages(&self) -> &[String] {
        self.graph.supported_languages()
    }

    pub fn procedure_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.procedures().iter().map(|p| p.id.as_str())
    }

    pub fn stage_count(&self) -> usize {
        self.graph.stage_count()
    }

    pub fn option_count(&self) -> usize {
        self.graph.option_count()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Look up a stage rendered for one language.
    ///
    /// `None` means the caller should do nothing.
    pub fn get_rendered_stage<'a>(
        &'a self,
        procedure_id: &str,
        stage_id: &str,
        language: &'a str,
    ) -> Option<RenderedStage<'a>> {
        self.graph.render(procedure_id, stage_id, language)
    }

    /// Attach a click handler to an option, replacing any previous one
    pub fn register_option_handler(
        &mut self,
        procedure_id: &str,
        stage_id: &str,
        option_id: &str,
        handler: impl OptionHandler<T> + 'static,
    ) -> Result<&mut Self, RuntimeError> {
        let key = option_key(procedure_id, stage_id, option_id);
        if self.graph.option_by_key(&key).is_none() {
            return Err(RuntimeError::OptionNotFound {
                procedure: procedure_id.to_string(),
                stage: stage_id.to_string(),
                option: option_id.to_string(),
            });
        }

        let replaced = self.handlers.insert(key, Arc::new(handler)).is_some();
        tracing::debug!(
            procedure = procedure_id,
            stage = stage_id,
            option = option_id,
            replaced,
            "option handler registered"
        );
        Ok(self)
    }

    /// Route an inbound update.
    ///
    /// Foreign, stale or malformed clicks are ignored, never errors. Handler
    /// and transport failures propagate.
    pub async fn on_event(&self, update: &Update) -> Result<RouteOutcome, RuntimeError> {
        let Some(data) = update.callback_data() else {
            return Ok(ignore(IgnoreReason::NotAClick));
        };
        let Some(payload) = CallbackPayload::parse(data) else {
            return Ok(ignore(IgnoreReason::MalformedPayload));
        };
        if !self.graph.supports_language(&payload.language) {
            return Ok(ignore(IgnoreReason::UnsupportedLanguage));
        }
        let Some(option) = self.graph.option_by_key(&payload.option_key) else {
            return Ok(ignore(IgnoreReason::UnknownOption));
        };

        let span = tracing::info_span!(
            "route",
            procedure = %option.procedure_id,
            stage = %option.stage_id,
            option = %option.id,
            language = %payload.language,
        );
        self.route(update, option, &payload.language)
            .instrument(span)
            .await
    }

    async fn route(
        &self,
        update: &Update,
        option: &StageOption,
        language: &str,
    ) -> Result<RouteOutcome, RuntimeError> {
        let mut result = HandlerResult::proceed();
        let handler = self.handlers.get(&option.key);
        if let Some(handler) = handler {
            let details = ClickDetails {
                language: language.to_string(),
                procedure_id: option.procedure_id.clone(),
                stage_id: option.stage_id.clone(),
                option_id: option.id.clone(),
            };
            result = handler.on_click(&self.transport, update, &details).await?;
            tracing::debug!(stay = result.avoid_moving_next_stage, "handler completed");
        }
        let handled = RouteOutcome::Handled {
            handler_invoked: handler.is_some(),
        };

        let Some(next_stage_id) = &option.next_stage_id else {
            tracing::debug!("option has no next stage");
            return Ok(handled);
        };
        if result.avoid_moving_next_stage {
            tracing::debug!("handler asked to stay");
            return Ok(handled);
        }
        let Some(target) = update.callback_message() else {
            tracing::debug!("click has no message to edit");
            return Ok(handled);
        };
        let Some(next) = self
            .graph
            .render(&option.procedure_id, next_stage_id, language)
        else {
            tracing::debug!(next_stage = %next_stage_id, "next stage not found");
            return Ok(handled);
        };

        self.transport
            .edit_message(target, next.text, next.mode, next.layout)
            .await?;
        tracing::info!(next_stage = %next_stage_id, "stage transitioned");

        Ok(RouteOutcome::Transitioned {
            procedure_id: option.procedure_id.clone(),
            stage_id: next_stage_id.clone(),
        })
    }
}

fn ignore(reason: IgnoreReason) -> RouteOutcome {
    tracing::debug!(%reason, "update ignored");
    RouteOutcome::Ignored(reason)
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
