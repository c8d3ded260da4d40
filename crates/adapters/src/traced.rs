// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced transport wrapper for consistent observability

use crate::transport::{TransportAdapter, TransportError};
use async_trait::async_trait;
use ep_core::{ButtonLayout, MessageRef, TextMode};
use tracing::Instrument;

/// Wrapper that adds tracing to any TransportAdapter
#[derive(Clone)]
pub struct TracedTransport<T> {
    inner: T,
}

impl<T> TracedTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

fn button_count(layout: Option<&ButtonLayout>) -> usize {
    layout.map_or(0, ButtonLayout::len)
}

#[async_trait]
impl<T: TransportAdapter> TransportAdapter for TracedTransport<T> {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<MessageRef, TransportError> {
        let span = tracing::info_span!("transport.send", chat_id);

        async {
            tracing::debug!(
                text_len = text.len(),
                ?mode,
                buttons = button_count(layout),
                "sending"
            );

            let start = std::time::Instant::now();
            let result = self.inner.send_message(chat_id, text, mode, layout).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(sent) => tracing::info!(
                    message_id = sent.message_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "message sent"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "send failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<(), TransportError> {
        let span = tracing::info_span!(
            "transport.edit",
            chat_id = target.chat_id,
            message_id = target.message_id
        );

        async {
            tracing::debug!(
                text_len = text.len(),
                ?mode,
                buttons = button_count(layout),
                "editing"
            );

            let start = std::time::Instant::now();
            let result = self.inner.edit_message(target, text, mode, layout).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "message edited"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "edit failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
