//! Tool policy evaluator port
//!
//! Maps a (tool id, descriptor, origin) triple to a
//! [`ToolPolicyDecision`]. Implementations are expected to follow
//! [`resolve_policy`](insight_bridge_domain::resolve_policy) and never fail.

use insight_bridge_domain::{ToolDescriptor, ToolOrigin, ToolPolicyDecision, resolve_policy};

/// Port for policy evaluation and remembered decisions
pub trait ToolPolicyEvaluator: Send + Sync {
    fn get_policy(
        &self,
        tool_id: &str,
        descriptor: &ToolDescriptor,
        origin: ToolOrigin,
    ) -> ToolPolicyDecision;

    /// Persist a decision a human asked to remember
    ///
    /// Read-only evaluators ignore it.
    fn remember(&self, _tool_id: &str, _decision: ToolPolicyDecision) {}
}

/// Evaluator without stored overrides: origin and risk level only
pub struct DefaultPolicyEvaluator;

impl ToolPolicyEvaluator for DefaultPolicyEvaluator {
    fn get_policy(
        &self,
        _tool_id: &str,
        descriptor: &ToolDescriptor,
        origin: ToolOrigin,
    ) -> ToolPolicyDecision {
        resolve_policy(origin, None, descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_bridge_domain::{ToolCapability, ToolRiskLevel};

    #[test]
    fn test_default_evaluator() {
        let caution =
            ToolDescriptor::new("ide.openFile", "Open file", ToolCapability::Read, ToolRiskLevel::Caution);
        let evaluator = DefaultPolicyEvaluator;
        assert_eq!(
            evaluator.get_policy("ide.openFile", &caution, ToolOrigin::Ai),
            ToolPolicyDecision::Ask
        );
        assert_eq!(
            evaluator.get_policy("ide.openFile", &caution, ToolOrigin::User),
            ToolPolicyDecision::Always
        );
    }
}
