// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! procd: hosts a procedure engine behind a line-oriented console transport

pub mod check;
pub mod commands;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;
pub mod serve;

pub use check::Summary;
pub use config::{HandlerAction, HandlerEntry, HostConfig, HostError, StartConfig};
pub use handlers::{apply_handlers, TableHandler};
pub use serve::serve;
