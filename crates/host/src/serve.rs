// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update loop: one JSON-encoded [`Update`] per input line

use crate::commands::handle_message;
use crate::config::StartConfig;
use ep_adapters::TransportAdapter;
use ep_core::Update;
use ep_engine::ProcedureEngine;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub updates: usize,
    pub skipped: usize,
}

/// Route updates read from `input` until EOF or Ctrl-C.
///
/// Each update runs on its own task; failures are logged and do not stop
/// the loop. In-flight updates finish before this returns.
pub async fn serve<T, R>(
    engine: Arc<ProcedureEngine<T>>,
    start: Arc<StartConfig>,
    input: R,
) -> std::io::Result<ServeStats>
where
    T: TransportAdapter,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut tasks = JoinSet::new();
    let mut stats = ServeStats::default();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl-C, shutting down");
                break;
            }
        };
        let Some(line) = line else {
            debug!("input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let update: Update = match serde_json::from_str(&line) {
            Ok(update) => update,
            Err(e) => {
                warn!(error = %e, "skipping malformed update");
                stats.skipped += 1;
                continue;
            }
        };
        stats.updates += 1;

        let engine = Arc::clone(&engine);
        let start = Arc::clone(&start);
        tasks.spawn(async move { dispatch(&engine, &start, update).await });

        // Reap finished tasks so the set does not grow unbounded
        while tasks.try_join_next().is_some() {}
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            error!(error = %e, "update task failed");
        }
    }

    info!(updates = stats.updates, skipped = stats.skipped, "update loop stopped");
    Ok(stats)
}

async fn dispatch<T: TransportAdapter>(
    engine: &ProcedureEngine<T>,
    start: &StartConfig,
    update: Update,
) {
    match &update {
        Update::Message { chat_id, text } => {
            if let Err(e) = handle_message(engine, start, *chat_id, text).await {
                error!(chat_id, error = %e, "failed to answer message");
            }
        }
        Update::CallbackQuery { id, .. } => match engine.on_event(&update).await {
            Ok(outcome) => debug!(callback = %id, ?outcome, "callback routed"),
            Err(e) => error!(callback = %id, error = %e, "callback routing failed"),
        },
    }
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
