// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendered message markup handed to transports

use serde::{Deserialize, Serialize};

/// How the transport should interpret message text.
///
/// Stages currently always compile to [`TextMode::Plain`]; the value is
/// passed through to the transport untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMode {
    #[default]
    Plain,
    Html,
    MarkdownV2,
}

/// One clickable button: visible label plus the payload echoed back on click
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveButton {
    pub text: String,
    pub payload: String,
}

/// Grid of buttons attached to a message, row by row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonLayout {
    pub rows: Vec<Vec<InteractiveButton>>,
}

impl ButtonLayout {
    /// Iterate over every button in row order
    pub fn buttons(&self) -> impl Iterator<Item = &InteractiveButton> {
        self.rows.iter().flatten()
    }

    /// Total number of buttons
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
