// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Procedure document parsing (syntactic layer)
//!
//! Property names match case-insensitively, unknown properties are ignored,
//! and `//` / `/* */` comments plus trailing commas are accepted. No business
//! rule is checked here; see [`crate::validate_config`].

use crate::raw::{LanguageText, RawButton, RawConfig, RawOption, RawProcedure, RawStage};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur during document parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("procedure document is empty")]
    Empty,
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

type Object = Map<String, Value>;

/// Parse a procedure document from JSON content
pub fn parse_config(content: &str) -> Result<RawConfig, ParseError> {
    let cleaned = strip_trailing_commas(&strip_comments(content));
    if cleaned.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let raw: Value = serde_json::from_str(&cleaned)?;
    let root = match &raw {
        Value::Null => return Err(ParseError::Empty),
        Value::Object(map) => map,
        _ => {
            return Err(ParseError::InvalidFormat(
                "root must be an object".to_string(),
            ))
        }
    };

    let supported_languages = array_field(root, "supportedLanguages", "$")?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str().map(String::from).ok_or_else(|| {
                ParseError::InvalidFormat(format!("supportedLanguages[{}]: expected string", i))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let buttons = array_field(root, "buttons", "$")?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_button(v, &format!("buttons[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let procedures = array_field(root, "procedures", "$")?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_procedure(v, &format!("procedures[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawConfig {
        supported_languages,
        buttons,
        procedures,
    })
}

fn parse_button(value: &Value, path: &str) -> Result<RawButton, ParseError> {
    let obj = object(value, path)?;
    Ok(RawButton {
        id: int_field(obj, "id", path)?,
        title: string_field(obj, "title", path)?,
        text: text_field(obj, "text", path)?,
    })
}

fn parse_procedure(value: &Value, path: &str) -> Result<RawProcedure, ParseError> {
    let obj = object(value, path)?;

    let stages = array_field(obj, "stages", path)?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_stage(v, &format!("{}.stages[{}]", path, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawProcedure {
        id: int_field(obj, "id", path)?,
        title: string_field(obj, "title", path)?,
        root_stage_id: int_field(obj, "rootStageId", path)?,
        add_to_root_button: bool_field(obj, "addToRootButton", path)?,
        add_to_previous_button: bool_field(obj, "addToPreviousButton", path)?,
        to_root_button_id: int_field(obj, "toRootButtonId", path)?,
        to_previous_button_id: int_field(obj, "toPreviousButtonId", path)?,
        stages,
    })
}

fn parse_stage(value: &Value, path: &str) -> Result<RawStage, ParseError> {
    let obj = object(value, path)?;

    let mut options = Vec::new();
    for (r, row) in array_field(obj, "options", path)?.iter().enumerate() {
        let row_path = format!("{}.options[{}]", path, r);
        let cells = row.as_array().ok_or_else(|| {
            ParseError::InvalidFormat(format!("{}: expected array of options", row_path))
        })?;
        let row = cells
            .iter()
            .enumerate()
            .map(|(c, v)| parse_option(v, &format!("{}[{}]", row_path, c)))
            .collect::<Result<Vec<_>, _>>()?;
        options.push(row);
    }

    Ok(RawStage {
        id: int_field(obj, "id", path)?,
        title: string_field(obj, "title", path)?,
        previous_stage_id: int_field(obj, "previousStageId", path)?,
        remove_to_root_button: bool_field(obj, "removeToRootButton", path)?,
        remove_to_previous_button: bool_field(obj, "removeToPreviousButton", path)?,
        text: text_field(obj, "text", path)?,
        options,
    })
}

fn parse_option(value: &Value, path: &str) -> Result<RawOption, ParseError> {
    let obj = object(value, path)?;
    Ok(RawOption {
        id: int_field(obj, "id", path)?,
        button_id: int_field(obj, "buttonId", path)?,
        next_stage_id: int_field(obj, "nextStageId", path)?,
    })
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::InvalidFormat(format!("{} must be an object", path)))
}

/// Case-insensitive property lookup; `null` counts as absent
fn field<'a>(obj: &'a Object, name: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
        .filter(|v| !v.is_null())
}

fn int_field(obj: &Object, name: &str, path: &str) -> Result<Option<i64>, ParseError> {
    match field(obj, name) {
        None => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            ParseError::InvalidFormat(format!("{}.{}: expected integer", path, name))
        }),
    }
}

fn bool_field(obj: &Object, name: &str, path: &str) -> Result<bool, ParseError> {
    match field(obj, name) {
        None => Ok(false),
        Some(v) => v.as_bool().ok_or_else(|| {
            ParseError::InvalidFormat(format!("{}.{}: expected boolean", path, name))
        }),
    }
}

fn string_field(obj: &Object, name: &str, path: &str) -> Result<Option<String>, ParseError> {
    match field(obj, name) {
        None => Ok(None),
        Some(v) => v.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
            ParseError::InvalidFormat(format!("{}.{}: expected string", path, name))
        }),
    }
}

fn array_field<'a>(obj: &'a Object, name: &str, path: &str) -> Result<&'a [Value], ParseError> {
    match field(obj, name) {
        None => Ok(&[]),
        Some(v) => v.as_array().map(Vec::as_slice).ok_or_else(|| {
            ParseError::InvalidFormat(format!("{}.{}: expected array", path, name))
        }),
    }
}

/// Language keys are data, so their case is preserved
fn text_field(obj: &Object, name: &str, path: &str) -> Result<LanguageText, ParseError> {
    let Some(value) = field(obj, name) else {
        return Ok(LanguageText::new());
    };
    let map = value.as_object().ok_or_else(|| {
        ParseError::InvalidFormat(format!("{}.{}: expected language map", path, name))
    })?;

    map.iter()
        .map(|(lang, text)| {
            text.as_str()
                .map(|t| (lang.clone(), t.to_string()))
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "{}.{}.{}: expected string",
                        path, name, lang
                    ))
                })
        })
        .collect()
}

/// Remove `//` and `/* */` comments outside string literals.
///
/// Newlines inside comments are kept so JSON error positions stay accurate.
fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let lookahead = chars.peek().copied();
        match (c, lookahead) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Drop commas directly followed (modulo whitespace) by `}` or `]`
fn strip_trailing_commas(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' if content[i + 1..].trim_start().starts_with(['}', ']']) => {}
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
