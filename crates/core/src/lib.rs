// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ep-core: shared vocabulary for the procedure engine
//!
//! This crate provides:
//! - Deterministic opaque keys for stages and options
//! - The two-line callback payload carried by rendered buttons
//! - Button layout and text mode value types handed to transports
//! - Inbound updates delivered by the messaging transport

pub mod key;
pub mod markup;
pub mod payload;
pub mod update;

pub use key::{generate_key, option_key, stage_key, KEY_SEPARATOR};
pub use markup::{ButtonLayout, InteractiveButton, TextMode};
pub use payload::{CallbackPayload, PAYLOAD_SEPARATOR};
pub use update::{MessageRef, Update};
