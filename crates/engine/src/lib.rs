// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Procedure engine: graph compiler and click router

mod compiler;
mod error;
mod graph;
mod handler;
mod runtime;

pub use compiler::compile;
pub use error::{CompileError, RuntimeError};
pub use graph::{
    OptionIdx, OptionKind, Procedure, ProcedureGraph, RenderedStage, Stage, StageIdx,
    StageOption, TO_PREVIOUS_OPTION_ID, TO_ROOT_OPTION_ID,
};
pub use handler::{handler_fn, ClickDetails, HandlerError, HandlerFn, HandlerResult, OptionHandler};
pub use runtime::{IgnoreReason, ProcedureEngine, RouteOutcome};
