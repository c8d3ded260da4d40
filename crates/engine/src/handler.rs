// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Option click handlers

use async_trait::async_trait;
use ep_core::Update;
use std::future::Future;
use thiserror::Error;

/// Which option was clicked, and in which language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickDetails {
    pub language: String,
    pub procedure_id: String,
    pub stage_id: String,
    pub option_id: String,
}

/// What the engine should do after a handler ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerResult {
    /// Keep the current message even if the option has a next stage
    pub avoid_moving_next_stage: bool,
}

impl HandlerResult {
    /// Continue to the option's next stage, if any
    pub fn proceed() -> Self {
        Self::default()
    }

    /// Stay on the current stage
    pub fn stay() -> Self {
        Self {
            avoid_moving_next_stage: true,
        }
    }
}

/// Failure reported by a user handler
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HandlerError(Box<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Code run when an option is clicked, before any stage transition.
///
/// `T` is the transport the engine was built with; handlers use it to send
/// their own messages.
#[async_trait]
pub trait OptionHandler<T>: Send + Sync {
    async fn on_click(
        &self,
        transport: &T,
        update: &Update,
        details: &ClickDetails,
    ) -> Result<HandlerResult, HandlerError>;
}

/// Handler backed by an async closure, see [`handler_fn`]
#[derive(Clone)]
pub struct HandlerFn<F>(F);

/// Turn an async closure into an [`OptionHandler`].
///
/// The closure receives owned copies of the transport, update and details.
pub fn handler_fn<T, F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(T, Update, ClickDetails) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HandlerResult, HandlerError>> + Send + 'static,
{
    HandlerFn(f)
}

#[async_trait]
impl<T, F, Fut> OptionHandler<T> for HandlerFn<F>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T, Update, ClickDetails) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HandlerResult, HandlerError>> + Send + 'static,
{
    async fn on_click(
        &self,
        transport: &T,
        update: &Update,
        details: &ClickDetails,
    ) -> Result<HandlerResult, HandlerError> {
        (self.0)(transport.clone(), update.clone(), details.clone()).await
    }
}
