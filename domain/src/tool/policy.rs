//! Tool policy rules
//!
//! A [`ToolPolicyDecision`] is the trust level that governs a single call.
//! [`resolve_policy`] is the pure decision chain shared by every evaluator:
//!
//! ```text
//! origin == USER ──────────────▶ ALWAYS
//! stored override present ─────▶ stored value
//! descriptor risk SAFE ────────▶ ALWAYS
//! otherwise ───────────────────▶ ASK
//! ```
//!
//! A [`ToolUserDecision`] is what a human answers when asked; the "remember"
//! variants carry the policy to store so the question is not asked again.

use serde::{Deserialize, Serialize};

use super::entities::{ToolDescriptor, ToolOrigin};

/// Resolved trust level for a (tool, origin) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolPolicyDecision {
    /// Run without asking
    Always,
    /// Ask a human before running an AI-originated call
    Ask,
    /// Never run, and do not advertise to AI planners
    Never,
}

impl ToolPolicyDecision {
    pub const ALL: [ToolPolicyDecision; 3] = [
        ToolPolicyDecision::Always,
        ToolPolicyDecision::Ask,
        ToolPolicyDecision::Never,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ToolPolicyDecision::Always => "ALWAYS",
            ToolPolicyDecision::Ask => "ASK",
            ToolPolicyDecision::Never => "NEVER",
        }
    }
}

impl std::fmt::Display for ToolPolicyDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolPolicyDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALWAYS" => Ok(ToolPolicyDecision::Always),
            "ASK" => Ok(ToolPolicyDecision::Ask),
            "NEVER" => Ok(ToolPolicyDecision::Never),
            other => Err(format!("Unknown tool policy: {}", other)),
        }
    }
}

/// Answer given by a human to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolUserDecision {
    allowed: bool,
    remember: Option<ToolPolicyDecision>,
}

impl ToolUserDecision {
    pub fn allow_once() -> Self {
        Self {
            allowed: true,
            remember: None,
        }
    }

    pub fn deny_once() -> Self {
        Self {
            allowed: false,
            remember: None,
        }
    }

    pub fn allow_and_remember_always() -> Self {
        Self {
            allowed: true,
            remember: Some(ToolPolicyDecision::Always),
        }
    }

    pub fn deny_and_remember_never() -> Self {
        Self {
            allowed: false,
            remember: Some(ToolPolicyDecision::Never),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Policy to persist for the tool, if the human asked to remember
    pub fn remember_as(&self) -> Option<ToolPolicyDecision> {
        self.remember
    }
}

impl Default for ToolUserDecision {
    fn default() -> Self {
        Self::deny_once()
    }
}

/// Decide the policy for a call
pub fn resolve_policy(
    origin: ToolOrigin,
    stored: Option<ToolPolicyDecision>,
    descriptor: &ToolDescriptor,
) -> ToolPolicyDecision {
    if origin == ToolOrigin::User {
        return ToolPolicyDecision::Always;
    }
    if let Some(stored) = stored {
        return stored;
    }
    if descriptor.risk_level.is_safe() {
        ToolPolicyDecision::Always
    } else {
        ToolPolicyDecision::Ask
    }
}
