//! Tool domain module
//!
//! This module defines the core abstractions of the **Tool Gateway**: how an
//! AI agent or a user invokes IDE capabilities in a policy-gated manner.
//!
//! # Overview
//!
//! Every tool publishes a [`ToolDescriptor`], is invoked with a
//! [`ToolRequest`] inside a [`ToolContext`], and produces a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolRequest  │───▶│ Tool         │───▶│ ToolResult   │
//! │ (invocation) │    │ (capability) │    │ OK/DENIED/   │
//! └──────────────┘    └──────┬───────┘    │ ERROR        │
//!                            │            └──────────────┘
//!                            └─ describe() → ToolDescriptor
//! ```
//!
//! # Policy
//!
//! Whether a call may run is decided by [`resolve_policy`]:
//!
//! | Origin | Stored override | Risk | Decision |
//! |--------|-----------------|------|----------|
//! | USER | any | any | ALWAYS |
//! | AI | present | any | stored value |
//! | AI | absent | SAFE | ALWAYS |
//! | AI | absent | other | ASK |
//!
//! # Errors
//!
//! - [`ToolError`]: raised by a tool, converted to ERROR by the gateway
//! - [`GatewayError`]: every non-OK terminal state of a gateway call
//!
//! # Architecture
//!
//! - **Domain** (this module): values, the [`Tool`] trait, pure policy rules
//! - **Application** (`ToolGateway`, ports): orchestration and collaborators
//! - **Infrastructure**: registry, preference stores, concrete tools

pub mod context;
pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

pub use context::ToolContext;
pub use entities::{
    ToolCapability, ToolDescriptor, ToolOrigin, ToolRequest, ToolRiskLevel, ToolSchema,
};
pub use error::{GatewayError, ToolError};
pub use policy::{ToolPolicyDecision, ToolUserDecision, resolve_policy};
pub use traits::Tool;
pub use value_objects::{ToolResult, ToolStatus};
