// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbound updates delivered by the messaging transport

use serde::{Deserialize, Serialize};

/// Identity of a message already displayed in a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

/// Something that happened on the transport side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    /// A user sent a text message
    Message { chat_id: i64, text: String },

    /// A user clicked a button
    CallbackQuery {
        id: String,
        chat_id: i64,
        /// Message the clicked button belongs to, when the transport knows it
        #[serde(default)]
        message_id: Option<i64>,
        /// Payload of the clicked button
        #[serde(default)]
        data: Option<String>,
    },
}

impl Update {
    /// Payload of a button click, if this update is one
    pub fn callback_data(&self) -> Option<&str> {
        match self {
            Update::CallbackQuery { data, .. } => data.as_deref(),
            Update::Message { .. } => None,
        }
    }

    /// Message a button click originated from
    pub fn callback_message(&self) -> Option<MessageRef> {
        match self {
            Update::CallbackQuery {
                chat_id,
                message_id: Some(message_id),
                ..
            } => Some(MessageRef {
                chat_id: *chat_id,
                message_id: *message_id,
            }),
            _ => None,
        }
    }

    pub fn chat_id(&self) -> i64 {
        match self {
            Update::Message { chat_id, .. } | Update::CallbackQuery { chat_id, .. } => *chat_id,
        }
    }
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
