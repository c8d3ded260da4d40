// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console transport: renders outbound messages as JSON lines.
//!
//! Each call writes one line to the configured writer (stdout by default):
//!
//! ```text
//! {"type":"send","chat_id":7,"message_id":1,"text":"Welcome","mode":"plain","layout":{"rows":[...]}}
//! {"type":"edit","chat_id":7,"message_id":1,"text":"Stage Two","mode":"plain","layout":null}
//! ```

use super::{TransportAdapter, TransportError};
use async_trait::async_trait;
use ep_core::{ButtonLayout, MessageRef, TextMode};
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// One rendered outbound line
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Outbound<'a> {
    Send {
        chat_id: i64,
        message_id: i64,
        text: &'a str,
        mode: TextMode,
        layout: Option<&'a ButtonLayout>,
    },
    Edit {
        chat_id: i64,
        message_id: i64,
        text: &'a str,
        mode: TextMode,
        layout: Option<&'a ButtonLayout>,
    },
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Transport that prints every message as a JSON line
#[derive(Clone)]
pub struct ConsoleTransport {
    out: SharedWriter,
    next_message_id: Arc<AtomicI64>,
}

impl ConsoleTransport {
    /// Console transport writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            next_message_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn emit(&self, line: &Outbound<'_>) -> Result<(), TransportError> {
        let encoded = serde_json::to_string(line)?;
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", encoded)?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl TransportAdapter for ConsoleTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<MessageRef, TransportError> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::Relaxed);
        self.emit(&Outbound::Send {
            chat_id,
            message_id,
            text,
            mode,
            layout,
        })?;
        Ok(MessageRef {
            chat_id,
            message_id,
        })
    }

    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<(), TransportError> {
        self.emit(&Outbound::Edit {
            chat_id: target.chat_id,
            message_id: target.message_id,
            text,
            mode,
            layout,
        })
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
