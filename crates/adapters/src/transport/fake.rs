// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{TransportAdapter, TransportError};
use async_trait::async_trait;
use ep_core::{ButtonLayout, MessageRef, TextMode};
use std::sync::{Arc, Mutex};

/// Recorded transport call
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Send {
        chat_id: i64,
        text: String,
        mode: TextMode,
        layout: Option<ButtonLayout>,
    },
    Edit {
        target: MessageRef,
        text: String,
        mode: TextMode,
        layout: Option<ButtonLayout>,
    },
}

#[derive(Default)]
struct FakeState {
    calls: Vec<TransportCall>,
    next_message_id: i64,
    fail_with: Option<String>,
}

/// Fake transport for testing
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TransportCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Recorded edits only, in call order
    pub fn edits(&self) -> Vec<TransportCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, TransportCall::Edit { .. }))
            .collect()
    }

    /// Make every following call fail with the given reason
    pub fn fail_with(&self, reason: &str) {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).fail_with = Some(reason.to_string());
    }

    fn record(&self, call: TransportCall) -> Result<i64, TransportError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(call);
        if let Some(reason) = &state.fail_with {
            return Err(TransportError::Rejected(reason.clone()));
        }
        state.next_message_id += 1;
        Ok(state.next_message_id)
    }
}

#[async_trait]
impl TransportAdapter for FakeTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<MessageRef, TransportError> {
        let message_id = self.record(TransportCall::Send {
            chat_id,
            text: text.to_string(),
            mode,
            layout: layout.cloned(),
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
        self.record(TransportCall::Edit {
            target,
            text: text.to_string(),
            mode,
            layout: layout.cloned(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
