// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph compiler: validated document → runtime graph

use crate::error::CompileError;
use crate::graph::{
    OptionIdx, OptionKind, Procedure, ProcedureGraph, Stage, StageIdx, StageOption,
    TO_PREVIOUS_OPTION_ID, TO_ROOT_OPTION_ID,
};
use ep_core::{
    option_key, stage_key, ButtonLayout, CallbackPayload, InteractiveButton, TextMode,
};
use ep_procedure::{ButtonDef, LanguageText, ProcedureDef, ProcedureDocument, StageDef};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Compile a validated document into the runtime graph.
///
/// Lookups that validation already guarantees are still checked, so a
/// hand-built document fails with [`CompileError`] instead of panicking.
pub fn compile(document: &ProcedureDocument) -> Result<ProcedureGraph, CompileError> {
    let buttons: HashMap<i64, &ButtonDef> = document.buttons.iter().map(|b| (b.id, b)).collect();
    let mut compiler = Compiler {
        buttons,
        graph: ProcedureGraph {
            supported_languages: document.supported_languages.clone(),
            ..ProcedureGraph::default()
        },
    };

    for procedure in &document.procedures {
        compiler.add_procedure(procedure)?;
    }

    let graph = compiler.graph;
    tracing::info!(
        procedures = graph.procedures.len(),
        stages = graph.stages.len(),
        options = graph.options.len(),
        "procedure graph compiled"
    );
    Ok(graph)
}

struct Compiler<'a> {
    buttons: HashMap<i64, &'a ButtonDef>,
    graph: ProcedureGraph,
}

impl Compiler<'_> {
    fn add_procedure(&mut self, procedure: &ProcedureDef) -> Result<(), CompileError> {
        let procedure_id = procedure.id.to_string();
        if !procedure.stages.iter().any(|s| procedure.is_root(s)) {
            return Err(CompileError::StageNotFound {
                procedure: procedure.id,
                stage: procedure.root_stage_id,
            });
        }

        let mut stages = Vec::with_capacity(procedure.stages.len());
        for stage in &procedure.stages {
            stages.push(self.add_stage(procedure, &procedure_id, stage)?);
        }

        self.graph.procedures.push(Procedure {
            id: procedure_id,
            title: procedure.title.clone(),
            root_stage_id: procedure.root_stage_id.to_string(),
            stages,
        });
        Ok(())
    }

    fn add_stage(
        &mut self,
        procedure: &ProcedureDef,
        procedure_id: &str,
        stage: &StageDef,
    ) -> Result<StageIdx, CompileError> {
        let stage_id = stage.id.to_string();
        let key = stage_key(procedure_id, &stage_id);
        if self.graph.stages_by_key.contains_key(&key) {
            return Err(CompileError::DuplicateKey(key));
        }

        let mut rows = Vec::with_capacity(stage.options.len() + 1);
        for row in &stage.options {
            let mut indices = Vec::with_capacity(row.len());
            for option in row {
                let spec = OptionSpec {
                    id: option.id.to_string(),
                    kind: OptionKind::Declared,
                    button: option.button_id,
                    next_stage_id: option.next_stage_id,
                };
                indices.push(self.add_option(procedure_id, &stage_id, spec)?);
            }
            rows.push(indices);
        }

        if !procedure.is_root(stage) {
            let mut navigation = Vec::with_capacity(2);
            for spec in navigation_options(procedure, stage) {
                navigation.push(self.add_option(procedure_id, &stage_id, spec)?);
            }
            if !navigation.is_empty() {
                rows.push(navigation);
            }
        }

        let layouts = self.build_layouts(&rows);
        let idx = StageIdx(self.graph.stages.len());
        self.graph.stages.push(Stage {
            key: key.clone(),
            procedure_id: procedure_id.to_string(),
            id: stage_id,
            title: stage.title.clone(),
            previous_stage_id: stage.previous_stage_id.map(|id| id.to_string()),
            text: stage.text.clone(),
            mode: TextMode::Plain,
            rows,
            layouts,
        });
        self.graph.stages_by_key.insert(key, idx);
        Ok(idx)
    }

    fn add_option(
        &mut self,
        procedure_id: &str,
        stage_id: &str,
        spec: OptionSpec,
    ) -> Result<OptionIdx, CompileError> {
        let key = option_key(procedure_id, stage_id, &spec.id);
        if self.graph.options_by_key.contains_key(&key) {
            return Err(CompileError::DuplicateKey(key));
        }

        let text = self.button_text(spec.button)?;
        let idx = OptionIdx(self.graph.options.len());
        self.graph.options.push(StageOption {
            key: key.clone(),
            procedure_id: procedure_id.to_string(),
            stage_id: stage_id.to_string(),
            id: spec.id,
            kind: spec.kind,
            text,
            next_stage_id: spec.next_stage_id.map(|id| id.to_string()),
        });
        self.graph.options_by_key.insert(key, idx);
        Ok(idx)
    }

    fn button_text(&self, button: i64) -> Result<LanguageText, CompileError> {
        self.buttons
            .get(&button)
            .map(|b| b.text.clone())
            .ok_or(CompileError::ButtonNotFound(button))
    }

    /// One layout per language any option is labelled in; rows left empty
    /// for a language are dropped.
    fn build_layouts(&self, rows: &[Vec<OptionIdx>]) -> BTreeMap<String, ButtonLayout> {
        let languages: BTreeSet<&str> = rows
            .iter()
            .flatten()
            .flat_map(|idx| self.graph.option_at(*idx).text.keys())
            .map(String::as_str)
            .collect();

        languages
            .into_iter()
            .map(|language| {
                let rows = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|idx| self.graph.option_at(*idx))
                            .filter_map(|option| {
                                option.text.get(language).map(|label| InteractiveButton {
                                    text: label.clone(),
                                    payload: CallbackPayload::new(option.key.as_str(), language)
                                        .encode(),
                                })
                            })
                            .collect::<Vec<_>>()
                    })
                    .filter(|row| !row.is_empty())
                    .collect();
                (language.to_string(), ButtonLayout { rows })
            })
            .collect()
    }
}

struct OptionSpec {
    id: String,
    kind: OptionKind,
    button: i64,
    next_stage_id: Option<i64>,
}

/// Navigation options appended to a non-root stage, previous first
fn navigation_options(procedure: &ProcedureDef, stage: &StageDef) -> Vec<OptionSpec> {
    let mut specs = Vec::with_capacity(2);

    if let Some(button) = procedure.to_previous_button() {
        if !stage.remove_to_previous_button {
            specs.push(OptionSpec {
                id: TO_PREVIOUS_OPTION_ID.to_string(),
                kind: OptionKind::ToPrevious,
                button,
                next_stage_id: stage.previous_stage_id,
            });
        }
    }

    if let Some(button) = procedure.to_root_button() {
        if !stage.remove_to_root_button {
            specs.push(OptionSpec {
                id: TO_ROOT_OPTION_ID.to_string(),
                kind: OptionKind::ToRoot,
                button,
                next_stage_id: Some(procedure.root_stage_id),
            });
        }
    }

    specs
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
