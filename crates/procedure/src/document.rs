// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated procedure document
//!
//! Produced only by [`crate::validate_config`]: every ID is present and
//! unique, every reference resolves, and every text covers all supported
//! languages.

use crate::raw::LanguageText;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDocument {
    pub supported_languages: Vec<String>,
    pub buttons: Vec<ButtonDef>,
    pub procedures: Vec<ProcedureDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonDef {
    pub id: i64,
    pub title: Option<String>,
    pub text: LanguageText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDef {
    pub id: i64,
    pub title: Option<String>,
    pub root_stage_id: i64,
    pub add_to_root_button: bool,
    pub add_to_previous_button: bool,
    pub to_root_button_id: Option<i64>,
    pub to_previous_button_id: Option<i64>,
    pub stages: Vec<StageDef>,
}

impl ProcedureDef {
    /// Label of the synthesized "to root" option, when enabled
    pub fn to_root_button(&self) -> Option<i64> {
        self.to_root_button_id.filter(|_| self.add_to_root_button)
    }

    /// Label of the synthesized "to previous" option, when enabled
    pub fn to_previous_button(&self) -> Option<i64> {
        self.to_previous_button_id
            .filter(|_| self.add_to_previous_button)
    }

    pub fn is_root(&self, stage: &StageDef) -> bool {
        stage.id == self.root_stage_id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageDef {
    pub id: i64,
    pub title: Option<String>,
    pub previous_stage_id: Option<i64>,
    pub remove_to_root_button: bool,
    pub remove_to_previous_button: bool,
    pub text: LanguageText,
    pub options: Vec<Vec<OptionDef>>,
}

impl StageDef {
    pub fn option_count(&self) -> usize {
        self.options.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDef {
    pub id: i64,
    pub button_id: i64,
    pub next_stage_id: Option<i64>,
}
