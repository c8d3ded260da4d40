// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op transport for headless runs.

use super::{TransportAdapter, TransportError};
use async_trait::async_trait;
use ep_core::{ButtonLayout, MessageRef, TextMode};

/// Transport that accepts everything and displays nothing.
///
/// Used by `procd check` and anywhere a graph is compiled without a chat.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpTransport;

impl NoOpTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransportAdapter for NoOpTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        _text: &str,
        _mode: TextMode,
        _layout: Option<&ButtonLayout>,
    ) -> Result<MessageRef, TransportError> {
        Ok(MessageRef {
            chat_id,
            message_id: 0,
        })
    }

    async fn edit_message(
        &self,
        _target: MessageRef,
        _text: &str,
        _mode: TextMode,
        _layout: Option<&ButtonLayout>,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}
