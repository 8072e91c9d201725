//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod preference_store;
pub mod tool_audit_log;
pub mod tool_confirmation;
pub mod tool_policy;
pub mod tool_registry;
pub mod workbench;
