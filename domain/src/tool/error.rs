//! Tool and gateway error taxonomy
//!
//! [`ToolError`] is what a tool may return from `execute`; [`GatewayError`]
//! names every non-OK terminal state of a gateway call. Both convert into a
//! [`ToolResult`] so nothing escapes the gateway as an error.

use thiserror::Error;

use super::value_objects::{ToolResult, ToolStatus};

/// Failure raised inside a tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Canceled")]
    Cancelled,

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

impl ToolError {
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        ToolError::Io {
            message: message.into(),
            source,
        }
    }

    /// Variant name, used to label diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::MissingArgument(_) => "MissingArgument",
            ToolError::InvalidArgument(_) => "InvalidArgument",
            ToolError::NotFound(_) => "NotFound",
            ToolError::Io { .. } => "Io",
            ToolError::Cancelled => "Cancelled",
            ToolError::Unavailable(_) => "Unavailable",
            ToolError::Failed(_) => "Failed",
        }
    }

    /// Kind and message, plus the I/O cause when there is one
    pub fn diagnostics(&self) -> String {
        match self {
            ToolError::Io { source, .. } => format!("{}: {}: {}", self.kind(), self, source),
            _ => format!("{}: {}", self.kind(), self),
        }
    }

    /// Encode the failure as an ERROR result
    ///
    /// I/O failures keep the underlying error as diagnostics.
    pub fn into_result(self) -> ToolResult {
        let diagnostics = match &self {
            ToolError::Io { source, .. } => Some(source.to_string()),
            _ => None,
        };
        ToolResult::error(self.to_string(), diagnostics)
    }
}

/// Non-OK terminal states of a gateway call
///
/// The `Display` text is the summary shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Tool request is missing toolId")]
    MissingToolId,

    #[error("Tool not found: {id}")]
    ToolNotFound { id: String },

    #[error("Tool is not allowed by policy: {name}")]
    PolicyDenied { name: String },

    #[error("Tool requires confirmation, but no confirmation handler is available")]
    ConfirmationUnavailable { name: String },

    #[error("Tool execution was denied by user: {name}")]
    UserDenied { name: String },

    #[error("Tool failed: {name}")]
    ExecutionFault { name: String, diagnostics: String },
}

impl GatewayError {
    pub fn status(&self) -> ToolStatus {
        match self {
            GatewayError::MissingToolId
            | GatewayError::ToolNotFound { .. }
            | GatewayError::ExecutionFault { .. } => ToolStatus::Error,
            GatewayError::PolicyDenied { .. }
            | GatewayError::ConfirmationUnavailable { .. }
            | GatewayError::UserDenied { .. } => ToolStatus::Denied,
        }
    }

    /// Stable machine-readable code, used in audit records
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::MissingToolId => "MISSING_TOOL_ID",
            GatewayError::ToolNotFound { .. } => "TOOL_NOT_FOUND",
            GatewayError::PolicyDenied { .. } => "POLICY_DENIED",
            GatewayError::ConfirmationUnavailable { .. } => "CONFIRMATION_UNAVAILABLE",
            GatewayError::UserDenied { .. } => "USER_DENIED",
            GatewayError::ExecutionFault { .. } => "EXECUTION_FAULT",
        }
    }
}

impl From<GatewayError> for ToolResult {
    fn from(error: GatewayError) -> Self {
        let summary = error.to_string();
        match error {
            GatewayError::ExecutionFault { diagnostics, .. } => {
                ToolResult::error(summary, Some(diagnostics))
            }
            other if other.status() == ToolStatus::Denied => ToolResult::denied(summary),
            _ => ToolResult::error(summary, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_name_the_fault_kind() {
        assert_eq!(
            ToolError::Failed("disk on fire".to_string()).diagnostics(),
            "Failed: disk on fire"
        );
        assert_eq!(ToolError::Cancelled.diagnostics(), "Cancelled: Canceled");

        let io = ToolError::io(
            "Failed to read: a.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.diagnostics(), "Io: Failed to read: a.txt: denied");
    }

    #[test]
    fn test_gateway_messages() {
        assert_eq!(
            GatewayError::MissingToolId.to_string(),
            "Tool request is missing toolId"
        );
        assert_eq!(
            GatewayError::ToolNotFound {
                id: "x.y".to_string()
            }
            .to_string(),
            "Tool not found: x.y"
        );
        assert_eq!(
            GatewayError::UserDenied {
                name: "Open file".to_string()
            }
            .to_string(),
            "Tool execution was denied by user: Open file"
        );
    }

    #[test]
    fn test_denials_become_denied_results() {
        let result: ToolResult = GatewayError::PolicyDenied {
            name: "Open file".to_string(),
        }
        .into();
        assert!(result.is_denied());
        assert_eq!(result.summary, "Tool is not allowed by policy: Open file");

        let result: ToolResult = GatewayError::ConfirmationUnavailable {
            name: "Open file".to_string(),
        }
        .into();
        assert!(result.is_denied());
    }

    #[test]
    fn test_fault_keeps_diagnostics() {
        let result: ToolResult = GatewayError::ExecutionFault {
            name: "Read workspace file".to_string(),
            diagnostics: "disk on fire".to_string(),
        }
        .into();
        assert!(result.is_error());
        assert_eq!(result.summary, "Tool failed: Read workspace file");
        assert_eq!(result.diagnostics.as_deref(), Some("disk on fire"));
    }

    #[test]
    fn test_tool_error_into_result() {
        let result = ToolError::MissingArgument("path".to_string()).into_result();
        assert!(result.is_error());
        assert_eq!(result.summary, "Missing argument: path");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let result = ToolError::io("Failed to read: /p/a.txt", io).into_result();
        assert_eq!(result.summary, "Failed to read: /p/a.txt");
        assert_eq!(result.diagnostics.as_deref(), Some("denied"));

        assert_eq!(ToolError::Cancelled.into_result().summary, "Canceled");
    }
}
