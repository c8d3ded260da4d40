// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `procd check`: summary of a compiled procedure graph

use ep_adapters::TransportAdapter;
use ep_engine::{OptionKind, ProcedureEngine};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub languages: Vec<String>,
    pub procedures: Vec<ProcedureSummary>,
    pub handlers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureSummary {
    pub id: String,
    pub title: Option<String>,
    pub root_stage: String,
    pub stages: usize,
    /// Options declared in the document
    pub options: usize,
    /// Synthesized navigation options
    pub navigation: usize,
}

impl Summary {
    pub fn of<T: TransportAdapter>(engine: &ProcedureEngine<T>) -> Self {
        let graph = engine.graph();
        let procedures = graph
            .procedures()
            .iter()
            .map(|procedure| {
                let (declared, navigation) = graph
                    .options()
                    .filter(|o| o.procedure_id == procedure.id)
                    .fold((0, 0), |(declared, navigation), o| match o.kind {
                        OptionKind::Declared => (declared + 1, navigation),
                        OptionKind::ToPrevious | OptionKind::ToRoot => (declared, navigation + 1),
                    });
                ProcedureSummary {
                    id: procedure.id.clone(),
                    title: procedure.title.clone(),
                    root_stage: procedure.root_stage_id.clone(),
                    stages: procedure.stages.len(),
                    options: declared,
                    navigation,
                }
            })
            .collect();

        Self {
            languages: engine.supported_languages().to_vec(),
            procedures,
            handlers: engine.handler_count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "languages: {}", self.languages.join(", "))?;
        writeln!(f, "procedures: {}", self.procedures.len())?;
        for p in &self.procedures {
            write!(f, "  {}", p.id)?;
            if let Some(title) = &p.title {
                write!(f, " ({})", title)?;
            }
            writeln!(
                f,
                ": {} stages, {} options, {} navigation, root {}",
                p.stages, p.options, p.navigation, p.root_stage
            )?;
        }
        write!(f, "handlers: {}", self.handlers)
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
