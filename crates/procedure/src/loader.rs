// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse-then-validate entry points

use crate::document::ProcedureDocument;
use crate::parser::{parse_config, ParseError};
use crate::validator::{validate_config, ConfigError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a procedure document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed procedure document: {0}")]
    Malformed(#[from] ParseError),
    #[error("invalid procedure config: {0}")]
    Invalid(#[from] ConfigError),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse and validate a procedure document
pub fn load_document(content: &str) -> Result<ProcedureDocument, LoadError> {
    let raw = parse_config(content)?;
    let document = validate_config(&raw)?;
    tracing::debug!(
        languages = document.supported_languages.len(),
        buttons = document.buttons.len(),
        procedures = document.procedures.len(),
        "procedure document validated"
    );
    Ok(document)
}

/// Read, parse and validate a procedure document file
pub fn load_document_file(path: &Path) -> Result<ProcedureDocument, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_document(&content)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
