// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw configuration tree
//!
//! Mirrors the JSON document one-to-one. Nothing here is checked: IDs and
//! references may be absent or dangling until the validator has run.

use std::collections::BTreeMap;

/// Per-language text, keyed by language title
pub type LanguageText = BTreeMap<String, String>;

/// Whole configuration document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    pub supported_languages: Vec<String>,
    pub buttons: Vec<RawButton>,
    pub procedures: Vec<RawProcedure>,
}

/// Reusable button label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawButton {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub text: LanguageText,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProcedure {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub root_stage_id: Option<i64>,
    pub add_to_root_button: bool,
    pub add_to_previous_button: bool,
    pub to_root_button_id: Option<i64>,
    pub to_previous_button_id: Option<i64>,
    pub stages: Vec<RawStage>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStage {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub previous_stage_id: Option<i64>,
    pub remove_to_root_button: bool,
    pub remove_to_previous_button: bool,
    pub text: LanguageText,
    /// Option rows, top to bottom
    pub options: Vec<Vec<RawOption>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOption {
    pub id: Option<i64>,
    pub button_id: Option<i64>,
    pub next_stage_id: Option<i64>,
}

impl RawStage {
    /// All options in row order
    pub fn all_options(&self) -> impl Iterator<Item = &RawOption> {
        self.options.iter().flatten()
    }
}
