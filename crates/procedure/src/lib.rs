// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Procedure document parsing and validation
//!
//! ```text
//! JSON → parser → RawConfig → validator → ProcedureDocument
//! ```

mod document;
mod loader;
mod parser;
mod raw;
mod validator;

pub use document::{ButtonDef, OptionDef, ProcedureDef, ProcedureDocument, StageDef};
pub use loader::{load_document, load_document_file, LoadError};
pub use parser::{parse_config, ParseError};
pub use raw::{LanguageText, RawButton, RawConfig, RawOption, RawProcedure, RawStage};
pub use validator::{validate_config, ConfigError, EntityKind, Scope, MAX_LANGUAGE_TITLE_LEN};
