// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback payload carried by rendered buttons
//!
//! Wire format is two lines: `<option key>\n<language>`.

use std::fmt;

/// Separates the option key from the language in a payload
pub const PAYLOAD_SEPARATOR: char = '\n';

/// Decoded button payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload {
    pub option_key: String,
    pub language: String,
}

impl CallbackPayload {
    pub fn new(option_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            option_key: option_key.into(),
            language: language.into(),
        }
    }

    /// Encode for embedding in a button
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.option_key, PAYLOAD_SEPARATOR, self.language)
    }

    /// Decode a raw payload.
    ///
    /// Returns `None` unless the payload contains exactly one separator with
    /// non-empty text on both sides.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let (option_key, language) = raw.split_once(PAYLOAD_SEPARATOR)?;
        if language.contains(PAYLOAD_SEPARATOR) || option_key.is_empty() || language.is_empty() {
            return None;
        }

        Some(Self::new(option_key, language))
    }
}

impl fmt::Display for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
