//! Infrastructure layer for insight-bridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the service tool registry and the built-in
//! tools, preference stores, the workbench adapter, the JSONL audit log,
//! and configuration file loading.

pub mod config;
pub mod logging;
pub mod preferences;
pub mod tools;
pub mod workbench;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use logging::JsonlToolAuditLog;
pub use preferences::{FilePreferenceStore, InMemoryPreferenceStore, ToolPolicyStore};
pub use tools::{
    BASELINE_RANKING, BaselineToolActivator, CompositeActivator, IdeToolActivator,
    ServiceToolRegistry, ToolActivator,
};
pub use workbench::HeadlessWorkbench;
