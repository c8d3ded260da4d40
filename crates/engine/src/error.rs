// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the procedure engine

use crate::handler::HandlerError;
use ep_adapters::TransportError;
use ep_procedure::LoadError;
use thiserror::Error;

/// Errors that can occur while building the runtime graph
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("button not found: {0}")]
    ButtonNotFound(i64),
    #[error("stage {stage} not found in procedure {procedure}")]
    StageNotFound { procedure: i64, stage: i64 },
    #[error("duplicate key generated: {0}")]
    DuplicateKey(String),
}

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("option not found: {option} in stage {stage}, procedure {procedure}")]
    OptionNotFound {
        procedure: String,
        stage: String,
        option: String,
    },
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
