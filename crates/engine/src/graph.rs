// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled procedure graph
//!
//! Arena layout: the graph owns flat vectors of stages and options, and
//! procedures/stages refer to their children by index. Back-references
//! (option → stage → procedure) are plain string IDs used for key
//! derivation and lookup only.

use ep_core::{stage_key, ButtonLayout, TextMode};
use ep_procedure::LanguageText;
use std::collections::{BTreeMap, HashMap};

/// Option ID of the synthesized "back to previous stage" option
pub const TO_PREVIOUS_OPTION_ID: &str = "ToPrevious";

/// Option ID of the synthesized "back to root stage" option
pub const TO_ROOT_OPTION_ID: &str = "ToRoot";

/// Index of a stage in [`ProcedureGraph::stages`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageIdx(pub(crate) usize);

/// Index of an option in [`ProcedureGraph::options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionIdx(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct Procedure {
    pub id: String,
    pub title: Option<String>,
    pub root_stage_id: String,
    pub stages: Vec<StageIdx>,
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub key: String,
    pub procedure_id: String,
    pub id: String,
    pub title: Option<String>,
    pub previous_stage_id: Option<String>,
    pub text: LanguageText,
    pub mode: TextMode,
    /// Option rows top to bottom, synthesized navigation row last
    pub rows: Vec<Vec<OptionIdx>>,
    /// Rendered button layout per language
    pub layouts: BTreeMap<String, ButtonLayout>,
}

impl Stage {
    pub fn text_for(&self, language: &str) -> Option<&str> {
        self.text.get(language).map(String::as_str)
    }

    /// Button layout for a language; `None` when no option has a label in it
    pub fn layout_for(&self, language: &str) -> Option<&ButtonLayout> {
        self.layouts.get(language)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Declared,
    ToPrevious,
    ToRoot,
}

#[derive(Debug, Clone)]
pub struct StageOption {
    pub key: String,
    pub procedure_id: String,
    pub stage_id: String,
    pub id: String,
    pub kind: OptionKind,
    /// Label per language, taken from the referenced button
    pub text: LanguageText,
    pub next_stage_id: Option<String>,
}

/// One stage resolved for a single language
#[derive(Debug, Clone, Copy)]
pub struct RenderedStage<'a> {
    pub stage: &'a Stage,
    pub language: &'a str,
    pub text: &'a str,
    pub mode: TextMode,
    pub layout: Option<&'a ButtonLayout>,
}

/// Immutable runtime graph produced by [`crate::compile`]
#[derive(Debug, Clone, Default)]
pub struct ProcedureGraph {
    pub(crate) supported_languages: Vec<String>,
    pub(crate) procedures: Vec<Procedure>,
    pub(crate) stages: Vec<Stage>,
    pub(crate) options: Vec<StageOption>,
    pub(crate) stages_by_key: HashMap<String, StageIdx>,
    pub(crate) options_by_key: HashMap<String, OptionIdx>,
}

impl ProcedureGraph {
    pub fn supported_languages(&self) -> &[String] {
        &self.supported_languages
    }

    pub fn supports_language(&self, language: &str) -> bool {
        self.supported_languages.iter().any(|l| l == language)
    }

    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    pub fn procedure(&self, id: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.id == id)
    }

    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    pub fn options(&self) -> impl Iterator<Item = &StageOption> {
        self.options.iter()
    }

    pub fn stage_by_key(&self, key: &str) -> Option<&Stage> {
        self.stages_by_key.get(key).map(|idx| &self.stages[idx.0])
    }

    pub fn option_by_key(&self, key: &str) -> Option<&StageOption> {
        self.options_by_key.get(key).map(|idx| &self.options[idx.0])
    }

    pub fn stage(&self, procedure_id: &str, stage_id: &str) -> Option<&Stage> {
        self.stage_by_key(&stage_key(procedure_id, stage_id))
    }

    pub fn stage_at(&self, idx: StageIdx) -> &Stage {
        &self.stages[idx.0]
    }

    pub fn option_at(&self, idx: OptionIdx) -> &StageOption {
        &self.options[idx.0]
    }

    /// Options of a stage, row by row
    pub fn stage_rows<'a>(
        &'a self,
        stage: &'a Stage,
    ) -> impl Iterator<Item = Vec<&'a StageOption>> + 'a {
        stage
            .rows
            .iter()
            .map(move |row| row.iter().map(|idx| self.option_at(*idx)).collect())
    }

    /// Resolve a stage for one language.
    ///
    /// `None` if the stage does not exist or has no text in that language.
    pub fn render<'a>(
        &'a self,
        procedure_id: &str,
        stage_id: &str,
        language: &'a str,
    ) -> Option<RenderedStage<'a>> {
        let stage = self.stage(procedure_id, stage_id)?;
        let text = stage.text_for(language)?;
        Some(RenderedStage {
            stage,
            language,
            text,
            mode: stage.mode,
            layout: stage.layout_for(language),
        })
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}
