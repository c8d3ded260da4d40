// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque key derivation
//!
//! Keys identify stages and options both in the compiled graph and inside
//! the callback payload of every rendered button, so they must be short,
//! deterministic and safe to embed in transport payloads.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Joins key parts before hashing. Parts are numeric IDs or reserved
/// alphabetic option IDs, neither of which can contain `|`.
pub const KEY_SEPARATOR: &str = "||";

/// Derive an opaque key from an ordered sequence of parts.
///
/// SHA-256 over the joined parts, encoded as unpadded URL-safe base64
/// (43 characters). An empty sequence yields an empty key.
pub fn generate_key<S: AsRef<str>>(parts: &[S]) -> String {
    if parts.is_empty() {
        return String::new();
    }

    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(KEY_SEPARATOR.as_bytes());
        }
        hasher.update(part.as_ref().as_bytes());
    }

    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Key of a stage within its procedure
pub fn stage_key(procedure_id: &str, stage_id: &str) -> String {
    generate_key(&[procedure_id, stage_id])
}

/// Key of an option within its stage and procedure
pub fn option_key(procedure_id: &str, stage_id: &str, option_id: &str) -> String {
    generate_key(&[procedure_id, stage_id, option_id])
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
