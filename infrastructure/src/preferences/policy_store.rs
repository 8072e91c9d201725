//! Persisted tool policies
//!
//! One preference entry per tool id (`tools.policy.<id>` to
//! `ALWAYS|ASK|NEVER`) plus the `tools.manualExecutionEnabled` flag that
//! gates running a tool directly as a user.

use std::sync::Arc;

use insight_bridge_application::ports::preference_store::PreferenceStore;
use insight_bridge_application::ports::tool_policy::ToolPolicyEvaluator;
use insight_bridge_domain::{ToolDescriptor, ToolOrigin, ToolPolicyDecision, resolve_policy};
use tracing::{debug, warn};

pub const POLICY_KEY_PREFIX: &str = "tools.policy.";
pub const MANUAL_EXECUTION_KEY: &str = "tools.manualExecutionEnabled";

/// Policy evaluator backed by a [`PreferenceStore`]
///
/// Every write is flushed immediately; a failed flush is logged and the
/// in-memory value still applies for the rest of the process.
pub struct ToolPolicyStore {
    preferences: Arc<dyn PreferenceStore>,
}

impl ToolPolicyStore {
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self { preferences }
    }

    fn key(tool_id: &str) -> String {
        format!("{}{}", POLICY_KEY_PREFIX, tool_id)
    }

    /// Stored override for a tool. Unrecognized values count as absent.
    pub fn policy(&self, tool_id: &str) -> Option<ToolPolicyDecision> {
        let raw = self.preferences.get(&Self::key(tool_id))?;
        match raw.parse() {
            Ok(decision) => Some(decision),
            Err(_) => {
                debug!(tool = tool_id, value = %raw, "Ignoring unrecognized stored policy");
                None
            }
        }
    }

    /// Store an override, or clear it with `None`
    pub fn set_policy(&self, tool_id: &str, decision: Option<ToolPolicyDecision>) {
        let key = Self::key(tool_id);
        match decision {
            Some(decision) => self.preferences.put(&key, decision.as_str()),
            None => self.preferences.remove(&key),
        }
        self.flush();
    }

    /// All valid stored overrides, sorted by tool id
    pub fn overrides(&self) -> Vec<(String, ToolPolicyDecision)> {
        self.preferences
            .keys_with_prefix(POLICY_KEY_PREFIX)
            .into_iter()
            .filter_map(|key| {
                let tool_id = key.strip_prefix(POLICY_KEY_PREFIX)?.to_string();
                let decision = self.policy(&tool_id)?;
                Some((tool_id, decision))
            })
            .collect()
    }

    pub fn is_manual_execution_enabled(&self) -> bool {
        self.preferences.get_bool(MANUAL_EXECUTION_KEY, false)
    }

    pub fn set_manual_execution_enabled(&self, enabled: bool) {
        self.preferences.put_bool(MANUAL_EXECUTION_KEY, enabled);
        self.flush();
    }

    fn flush(&self) {
        if let Err(e) = self.preferences.flush() {
            warn!(error = %e, "Failed to persist tool policies");
        }
    }
}

impl ToolPolicyEvaluator for ToolPolicyStore {
    fn get_policy(
        &self,
        tool_id: &str,
        descriptor: &ToolDescriptor,
        origin: ToolOrigin,
    ) -> ToolPolicyDecision {
        // USER short-circuits before the store is consulted
        if origin == ToolOrigin::User {
            return ToolPolicyDecision::Always;
        }
        resolve_policy(origin, self.policy(tool_id), descriptor)
    }

    fn remember(&self, tool_id: &str, decision: ToolPolicyDecision) {
        self.set_policy(tool_id, Some(decision));
    }
}
