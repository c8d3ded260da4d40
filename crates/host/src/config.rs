// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration (`procd.toml`)
//!
//! ```toml
//! procedures = "procedures.json"
//! log_level = "debug"
//!
//! [start]
//! procedure = "1"
//! stage = "1"
//!
//! [[handlers]]
//! procedure = "1"
//! stage = "1"
//! option = "2"
//! action = "reply"
//! text = "pong"
//! stay = true
//! ```

use ep_engine::RuntimeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from host setup
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid host config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no procedure document configured (set `procedures` or pass --procedures)")]
    MissingProcedures,
    #[error("reply handler for option {option} in stage {stage}, procedure {procedure} has no text")]
    ReplyWithoutText {
        procedure: String,
        stage: String,
        option: String,
    },
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    /// Procedure document, relative to the config file
    pub procedures: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub start: StartConfig,
    #[serde(default)]
    pub handlers: Vec<HandlerEntry>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            procedures: None,
            log_level: default_log_level(),
            log_path: None,
            start: StartConfig::default(),
            handlers: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Stage shown by the start commands
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub procedure: String,
    pub stage: String,
    /// Reply to messages that are not a start command
    pub fallback_text: String,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            procedure: "0".to_string(),
            stage: "0".to_string(),
            fallback_text: "What?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerAction {
    /// Record the click in the log
    #[default]
    Log,
    /// Send `text` to the chat as a new message
    Reply,
}

/// One row of the handler registration table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HandlerEntry {
    pub procedure: String,
    pub stage: String,
    pub option: String,
    #[serde(default)]
    pub action: HandlerAction,
    pub text: Option<String>,
    /// Keep the current stage displayed after the handler ran
    #[serde(default)]
    pub stay: bool,
}

impl HostConfig {
    pub fn parse(content: &str) -> Result<Self, HostError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file; relative paths inside it resolve against its directory
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let content = std::fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.procedures = config.procedures.map(|p| base.join(p));
        config.log_path = config.log_path.map(|p| base.join(p));
        Ok(config)
    }

    pub fn procedures_path(&self) -> Result<&Path, HostError> {
        self.procedures
            .as_deref()
            .ok_or(HostError::MissingProcedures)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
