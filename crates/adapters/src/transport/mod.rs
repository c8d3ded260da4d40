// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Messaging transport adapters

mod console;
mod noop;

pub use console::ConsoleTransport;
pub use noop::NoOpTransport;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, TransportCall};

use async_trait::async_trait;
use ep_core::{ButtonLayout, MessageRef, TextMode};
use thiserror::Error;

/// Errors from transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("message not found: chat {}, message {}", .0.chat_id, .0.message_id)]
    MessageNotFound(MessageRef),
    #[error("transport rejected request: {0}")]
    Rejected(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Adapter for the chat transport that displays procedure stages
#[async_trait]
pub trait TransportAdapter: Clone + Send + Sync + 'static {
    /// Send a new message to a chat
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<MessageRef, TransportError>;

    /// Replace the text and buttons of an already displayed message
    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
        mode: TextMode,
        layout: Option<&ButtonLayout>,
    ) -> Result<(), TransportError>;
}
