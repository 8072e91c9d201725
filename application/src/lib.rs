//! Application layer for insight-bridge
//!
//! This crate contains the tool gateway use case and the port definitions
//! its collaborators implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    preference_store::{PreferenceError, PreferenceStore},
    tool_audit_log::{NoToolAuditLog, ToolAuditEvent, ToolAuditLog},
    tool_confirmation::{
        AutoAllowConfirmation, AutoDenyConfirmation, ConfirmationError, ToolConfirmationHandler,
    },
    tool_policy::{DefaultPolicyEvaluator, ToolPolicyEvaluator},
    tool_registry::ToolRegistry,
    workbench::{EditorLocation, TextSelection, Workbench, WorkbenchError, WorkbenchSelection},
};
pub use use_cases::tool_gateway::ToolGateway;
