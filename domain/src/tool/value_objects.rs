//! Tool domain value objects: the outcome of a gateway call
//!
//! Every path through the gateway ends in a [`ToolResult`]. The status says
//! which of the three terminal states was reached:
//!
//! | Status | Summary | Payload | Diagnostics |
//! |--------|---------|---------|-------------|
//! | `OK` | yes | tool output | - |
//! | `DENIED` | yes | - | - |
//! | `ERROR` | yes | - | optional, for logs |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal state of a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolStatus {
    Ok,
    Denied,
    Error,
}

impl ToolStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ToolStatus::Ok => "OK",
            ToolStatus::Denied => "DENIED",
            ToolStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a tool call, whatever the outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub status: ToolStatus,
    /// One line suitable for direct display
    pub summary: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl ToolResult {
    pub fn ok(summary: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            status: ToolStatus::Ok,
            summary: summary.into(),
            payload,
            diagnostics: None,
        }
    }

    pub fn denied(summary: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Denied,
            summary: summary.into(),
            payload: Map::new(),
            diagnostics: None,
        }
    }

    pub fn error(summary: impl Into<String>, diagnostics: Option<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            summary: summary.into(),
            payload: Map::new(),
            diagnostics,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ToolStatus::Ok
    }

    pub fn is_denied(&self) -> bool {
        self.status == ToolStatus::Denied
    }

    pub fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }
}
