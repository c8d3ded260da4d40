// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic validation for procedure documents.
//!
//! Checks run in a fixed order and stop at the first violation:
//! - ID presence and uniqueness (later checks rely on IDs existing)
//! - Supported language titles
//! - Text completeness for every supported language
//! - Reference integrity (stages, buttons)
//! - Navigation button consistency
//! - Conversion to the validated document (required back-references and labels)

use crate::document::{ButtonDef, OptionDef, ProcedureDef, ProcedureDocument, StageDef};
use crate::raw::{LanguageText, RawButton, RawConfig, RawOption, RawProcedure, RawStage};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest accepted language title
pub const MAX_LANGUAGE_TITLE_LEN: usize = 10;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("constant regex pattern is valid"));

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Procedure,
    Stage,
    Option,
    Button,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Procedure => "procedure",
            EntityKind::Stage => "stage",
            EntityKind::Option => "option",
            EntityKind::Button => "button",
        })
    }
}

/// Owning procedure/stage of the entity an error refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub procedure: Option<i64>,
    pub stage: Option<i64>,
}

impl Scope {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn procedure(procedure: i64) -> Self {
        Self {
            procedure: Some(procedure),
            stage: None,
        }
    }

    pub fn stage(procedure: i64, stage: i64) -> Self {
        Self {
            procedure: Some(procedure),
            stage: Some(stage),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.stage, self.procedure) {
            (Some(stage), Some(procedure)) => {
                write!(f, " in stage {}, procedure {}", stage, procedure)
            }
            (None, Some(procedure)) => write!(f, " in procedure {}", procedure),
            _ => Ok(()),
        }
    }
}

/// A configuration invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no ID specified for {kind}{scope}")]
    MissingId { kind: EntityKind, scope: Scope },

    #[error("duplicate ID for {kind} detected: {id}{scope}")]
    DuplicateId {
        kind: EntityKind,
        id: i64,
        scope: Scope,
    },

    #[error("invalid language title '{language}': {reason}")]
    InvalidLanguageTitle { language: String, reason: String },

    #[error("duplicate language detected (case-insensitive): '{0}'")]
    DuplicateLanguage(String),

    #[error("{kind} {id}{scope} is missing text for language: {language}")]
    MissingTextForLanguage {
        kind: EntityKind,
        id: i64,
        scope: Scope,
        language: String,
    },

    #[error("{field} {} does not exist in procedure {procedure}", display_ref(.stage))]
    StageNotFound {
        field: &'static str,
        stage: Option<i64>,
        procedure: i64,
    },

    #[error("{field} {button} does not exist{scope}")]
    ButtonNotFound {
        field: &'static str,
        button: i64,
        scope: Scope,
    },

    #[error("addToRootButton is true but toRootButtonId is not set in procedure {procedure}")]
    MissingRootButtonReference { procedure: i64 },

    #[error(
        "addToPreviousButton is true but toPreviousButtonId is not set in procedure {procedure}"
    )]
    MissingPreviousButtonReference { procedure: i64 },

    #[error("stage {stage} in procedure {procedure} is not root and has no previousStageId")]
    NoPreviousStageSpecified { procedure: i64, stage: i64 },

    #[error("option {option} in stage {stage}, procedure {procedure} has no buttonId")]
    NoButtonSpecifiedForOption {
        procedure: i64,
        stage: i64,
        option: i64,
    },
}

fn display_ref(id: &Option<i64>) -> String {
    id.map_or_else(|| "<none>".to_string(), |id| id.to_string())
}

/// Validate a parsed document and convert it into its validated form.
pub fn validate_config(raw: &RawConfig) -> Result<ProcedureDocument, ConfigError> {
    let mut validator = Validator::new(raw);
    validator.validate_ids()?;
    validator.validate_supported_languages()?;
    validator.validate_texts()?;
    validator.validate_references()?;
    validator.validate_navigation_buttons()?;
    validator.into_document()
}

struct Validator<'a> {
    config: &'a RawConfig,
    procedure_ids: HashSet<i64>,
    stage_ids: HashSet<(i64, i64)>,
    option_ids: HashSet<(i64, i64, i64)>,
    button_ids: HashSet<i64>,
}

impl<'a> Validator<'a> {
    fn new(config: &'a RawConfig) -> Self {
        Self {
            config,
            procedure_ids: HashSet::new(),
            stage_ids: HashSet::new(),
            option_ids: HashSet::new(),
            button_ids: HashSet::new(),
        }
    }

    fn validate_ids(&mut self) -> Result<(), ConfigError> {
        for procedure in &self.config.procedures {
            let procedure_id = require_id(procedure.id, EntityKind::Procedure, Scope::global())?;
            if !self.procedure_ids.insert(procedure_id) {
                return Err(duplicate(EntityKind::Procedure, procedure_id, Scope::global()));
            }

            for stage in &procedure.stages {
                let scope = Scope::procedure(procedure_id);
                let stage_id = require_id(stage.id, EntityKind::Stage, scope)?;
                if !self.stage_ids.insert((procedure_id, stage_id)) {
                    return Err(duplicate(EntityKind::Stage, stage_id, scope));
                }

                for option in stage.all_options() {
                    let scope = Scope::stage(procedure_id, stage_id);
                    let option_id = require_id(option.id, EntityKind::Option, scope)?;
                    if !self.option_ids.insert((procedure_id, stage_id, option_id)) {
                        return Err(duplicate(EntityKind::Option, option_id, scope));
                    }
                }
            }
        }

        for button in &self.config.buttons {
            let button_id = require_id(button.id, EntityKind::Button, Scope::global())?;
            if !self.button_ids.insert(button_id) {
                return Err(duplicate(EntityKind::Button, button_id, Scope::global()));
            }
        }

        Ok(())
    }

    fn validate_supported_languages(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for language in &self.config.supported_languages {
            if !LANGUAGE_PATTERN.is_match(language) {
                return Err(ConfigError::InvalidLanguageTitle {
                    language: language.clone(),
                    reason: "only English letters and numbers are allowed".to_string(),
                });
            }

            if language.chars().count() > MAX_LANGUAGE_TITLE_LEN {
                return Err(ConfigError::InvalidLanguageTitle {
                    language: language.clone(),
                    reason: format!(
                        "exceeds the maximum length of {} characters",
                        MAX_LANGUAGE_TITLE_LEN
                    ),
                });
            }

            if !seen.insert(language.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateLanguage(language.clone()));
            }
        }

        Ok(())
    }

    fn validate_texts(&self) -> Result<(), ConfigError> {
        for procedure in &self.config.procedures {
            let procedure_id = procedure.id.unwrap_or_default();
            for stage in &procedure.stages {
                self.validate_text(
                    &stage.text,
                    EntityKind::Stage,
                    stage.id.unwrap_or_default(),
                    Scope::procedure(procedure_id),
                )?;
            }
        }

        for button in &self.config.buttons {
            self.validate_text(
                &button.text,
                EntityKind::Button,
                button.id.unwrap_or_default(),
                Scope::global(),
            )?;
        }

        Ok(())
    }

    fn validate_text(
        &self,
        text: &LanguageText,
        kind: EntityKind,
        id: i64,
        scope: Scope,
    ) -> Result<(), ConfigError> {
        match self
            .config
            .supported_languages
            .iter()
            .find(|language| !text.contains_key(language.as_str()))
        {
            Some(language) => Err(ConfigError::MissingTextForLanguage {
                kind,
                id,
                scope,
                language: language.clone(),
            }),
            None => Ok(()),
        }
    }

    fn validate_references(&self) -> Result<(), ConfigError> {
        for procedure in &self.config.procedures {
            let procedure_id = procedure.id.unwrap_or_default();
            let scope = Scope::procedure(procedure_id);

            if !procedure
                .root_stage_id
                .is_some_and(|stage| self.has_stage(procedure_id, stage))
            {
                return Err(ConfigError::StageNotFound {
                    field: "rootStageId",
                    stage: procedure.root_stage_id,
                    procedure: procedure_id,
                });
            }

            self.check_button(procedure.to_root_button_id, "toRootButtonId", scope)?;
            self.check_button(procedure.to_previous_button_id, "toPreviousButtonId", scope)?;

            for stage in &procedure.stages {
                self.check_stage(stage.previous_stage_id, "previousStageId", procedure_id)?;

                let scope = Scope::stage(procedure_id, stage.id.unwrap_or_default());
                for option in stage.all_options() {
                    self.check_button(option.button_id, "buttonId", scope)?;
                    self.check_stage(option.next_stage_id, "nextStageId", procedure_id)?;
                }
            }
        }

        Ok(())
    }

    fn has_stage(&self, procedure: i64, stage: i64) -> bool {
        self.stage_ids.contains(&(procedure, stage))
    }

    /// Absent references are allowed here; required ones are checked later
    fn check_stage(
        &self,
        stage: Option<i64>,
        field: &'static str,
        procedure: i64,
    ) -> Result<(), ConfigError> {
        match stage {
            Some(id) if !self.has_stage(procedure, id) => Err(ConfigError::StageNotFound {
                field,
                stage,
                procedure,
            }),
            _ => Ok(()),
        }
    }

    fn check_button(
        &self,
        button: Option<i64>,
        field: &'static str,
        scope: Scope,
    ) -> Result<(), ConfigError> {
        match button {
            Some(id) if !self.button_ids.contains(&id) => Err(ConfigError::ButtonNotFound {
                field,
                button: id,
                scope,
            }),
            _ => Ok(()),
        }
    }

    fn validate_navigation_buttons(&self) -> Result<(), ConfigError> {
        for procedure in &self.config.procedures {
            let procedure_id = procedure.id.unwrap_or_default();
            if procedure.add_to_root_button && procedure.to_root_button_id.is_none() {
                return Err(ConfigError::MissingRootButtonReference {
                    procedure: procedure_id,
                });
            }
            if procedure.add_to_previous_button && procedure.to_previous_button_id.is_none() {
                return Err(ConfigError::MissingPreviousButtonReference {
                    procedure: procedure_id,
                });
            }
        }
        Ok(())
    }

    /// Final pass: re-asserts IDs and converts to the validated document.
    fn into_document(self) -> Result<ProcedureDocument, ConfigError> {
        let procedures = self
            .config
            .procedures
            .iter()
            .map(convert_procedure)
            .collect::<Result<Vec<_>, _>>()?;

        let buttons = self
            .config
            .buttons
            .iter()
            .map(convert_button)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProcedureDocument {
            supported_languages: self.config.supported_languages.clone(),
            buttons,
            procedures,
        })
    }
}

fn require_id(id: Option<i64>, kind: EntityKind, scope: Scope) -> Result<i64, ConfigError> {
    id.ok_or(ConfigError::MissingId { kind, scope })
}

fn duplicate(kind: EntityKind, id: i64, scope: Scope) -> ConfigError {
    ConfigError::DuplicateId { kind, id, scope }
}

fn convert_procedure(procedure: &RawProcedure) -> Result<ProcedureDef, ConfigError> {
    let id = require_id(procedure.id, EntityKind::Procedure, Scope::global())?;
    let root_stage_id = procedure
        .root_stage_id
        .ok_or(ConfigError::StageNotFound {
            field: "rootStageId",
            stage: None,
            procedure: id,
        })?;

    let stages = procedure
        .stages
        .iter()
        .map(|stage| convert_stage(id, root_stage_id, stage))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProcedureDef {
        id,
        title: procedure.title.clone(),
        root_stage_id,
        add_to_root_button: procedure.add_to_root_button,
        add_to_previous_button: procedure.add_to_previous_button,
        to_root_button_id: procedure.to_root_button_id,
        to_previous_button_id: procedure.to_previous_button_id,
        stages,
    })
}

fn convert_stage(
    procedure: i64,
    root_stage_id: i64,
    stage: &RawStage,
) -> Result<StageDef, ConfigError> {
    let id = require_id(stage.id, EntityKind::Stage, Scope::procedure(procedure))?;
    if stage.previous_stage_id.is_none() && id != root_stage_id {
        return Err(ConfigError::NoPreviousStageSpecified {
            procedure,
            stage: id,
        });
    }

    let options = stage
        .options
        .iter()
        .map(|row| {
            row.iter()
                .map(|option| convert_option(procedure, id, option))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StageDef {
        id,
        title: stage.title.clone(),
        previous_stage_id: stage.previous_stage_id,
        remove_to_root_button: stage.remove_to_root_button,
        remove_to_previous_button: stage.remove_to_previous_button,
        text: stage.text.clone(),
        options,
    })
}

fn convert_option(procedure: i64, stage: i64, option: &RawOption) -> Result<OptionDef, ConfigError> {
    let id = require_id(option.id, EntityKind::Option, Scope::stage(procedure, stage))?;
    let button_id = option
        .button_id
        .ok_or(ConfigError::NoButtonSpecifiedForOption {
            procedure,
            stage,
            option: id,
        })?;

    Ok(OptionDef {
        id,
        button_id,
        next_stage_id: option.next_stage_id,
    })
}

fn convert_button(button: &RawButton) -> Result<ButtonDef, ConfigError> {
    Ok(ButtonDef {
        id: require_id(button.id, EntityKind::Button, Scope::global())?,
        title: button.title.clone(),
        text: button.text.clone(),
    })
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
