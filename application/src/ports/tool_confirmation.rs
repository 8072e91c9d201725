//! Tool confirmation port
//!
//! Asks a human whether an AI-originated call may run.
//!
//! # Contract
//!
//! `confirm` blocks the calling path until a human answers. There is no
//! timeout. The implementation owns the hop to whatever task or thread can
//! present UI; the gateway simply awaits the answer.
//!
//! ```text
//! worker (gateway)                 UI owner
//!      │  confirm(...)                │
//!      │─────── request ─────────────▶│  render dialog
//!      │                              │  read answer
//!      │◀────── ToolUserDecision ─────│
//!      ▼                              │
//! ```
//!
//! An `Err` is treated by the gateway exactly like deny-once.
//!
//! # Built-in Implementations
//!
//! - [`AutoDenyConfirmation`]: always deny once (non-interactive runs)
//! - [`AutoAllowConfirmation`]: always allow once (trusted automation)
//!
//! For interactive use, see `ChannelConfirmationHandler` in the
//! presentation layer.

use async_trait::async_trait;
use insight_bridge_domain::{ToolContext, ToolDescriptor, ToolRequest, ToolUserDecision};
use thiserror::Error;

/// Failure to obtain an answer (not a denial by the user)
#[derive(Debug, Clone, Error)]
pub enum ConfirmationError {
    /// The UI side is gone (channel closed, dialog owner shut down)
    #[error("Confirmation UI is not available")]
    Unavailable,
    /// The request reached the UI but no answer came back
    #[error("Confirmation was abandoned")]
    Abandoned,
    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for human confirmation of tool calls
#[async_trait]
pub trait ToolConfirmationHandler: Send + Sync {
    async fn confirm(
        &self,
        descriptor: &ToolDescriptor,
        request: &ToolRequest,
        context: &ToolContext,
    ) -> Result<ToolUserDecision, ConfirmationError>;
}

/// Denies every call once. Nothing is remembered.
pub struct AutoDenyConfirmation;

#[async_trait]
impl ToolConfirmationHandler for AutoDenyConfirmation {
    async fn confirm(
        &self,
        descriptor: &ToolDescriptor,
        _request: &ToolRequest,
        _context: &ToolContext,
    ) -> Result<ToolUserDecision, ConfirmationError> {
        tracing::info!(tool = %descriptor.id, "Auto-denying tool confirmation");
        Ok(ToolUserDecision::deny_once())
    }
}

/// Allows every call once. Nothing is remembered.
pub struct AutoAllowConfirmation;

#[async_trait]
impl ToolConfirmationHandler for AutoAllowConfirmation {
    async fn confirm(
        &self,
        descriptor: &ToolDescriptor,
        _request: &ToolRequest,
        _context: &ToolContext,
    ) -> Result<ToolUserDecision, ConfirmationError> {
        tracing::info!(tool = %descriptor.id, "Auto-allowing tool confirmation");
        Ok(ToolUserDecision::allow_once())
    }
}
