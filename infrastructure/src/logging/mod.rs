//! Logging infrastructure: structured tool audit records.
//!
//! Provides [`JsonlToolAuditLog`], a JSONL file writer that implements
//! the [`ToolAuditLog`](insight_bridge_application::ToolAuditLog) port.

mod jsonl_audit_log;

pub use jsonl_audit_log::JsonlToolAuditLog;
