//! Port for structured tool audit records.
//!
//! Defines the [`ToolAuditLog`] trait for recording the outcome of every
//! gateway call (who asked, which policy applied, whether a human was asked,
//! how it ended) in a machine-readable form.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! diagnostic messages, while this port keeps a durable trail of decisions.

use serde::Serialize;

use insight_bridge_domain::{ToolOrigin, ToolPolicyDecision, ToolStatus};

/// One finished gateway call
#[derive(Debug, Clone, Serialize)]
pub struct ToolAuditEvent {
    pub tool_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    pub origin: ToolOrigin,
    /// Absent when the call ended before policy evaluation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<ToolPolicyDecision>,
    pub confirmation_requested: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remembered: Option<ToolPolicyDecision>,
    pub status: ToolStatus,
    pub summary: String,
    pub duration_ms: u64,
}

/// Port for recording audit events.
///
/// `record` is synchronous and non-fallible; failures are the
/// implementation's to log and swallow.
pub trait ToolAuditLog: Send + Sync {
    fn record(&self, event: &ToolAuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoToolAuditLog;

impl ToolAuditLog for NoToolAuditLog {
    fn record(&self, _event: &ToolAuditEvent) {}
}
