//! Domain layer for insight-bridge
//!
//! This crate contains the value types, the [`Tool`] contract and the pure
//! policy rules of the tool gateway. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Tool**: a named, schema-described capability an agent or user can invoke
//! - **Origin**: USER (manual, pre-trusted) or AI (agent-initiated, policy-gated)
//! - **Policy decision**: ALWAYS / ASK / NEVER
//! - **Ranking**: integer used to pick among implementations sharing an id

pub mod config;
pub mod core;
pub mod tool;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use tool::{
    GatewayError, Tool, ToolCapability, ToolContext, ToolDescriptor, ToolError, ToolOrigin,
    ToolPolicyDecision, ToolRequest, ToolResult, ToolRiskLevel, ToolSchema, ToolStatus,
    ToolUserDecision, resolve_policy,
};
