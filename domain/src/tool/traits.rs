//! The tool contract
//!
//! Every capability the gateway can dispatch to implements [`Tool`]. Concrete
//! tools live in the infrastructure layer and are registered into a registry
//! under their id; several implementations may share an id, in which case the
//! registry picks one by ranking.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::context::ToolContext;
use super::entities::{ToolDescriptor, ToolRequest};
use super::error::ToolError;
use super::value_objects::ToolResult;

/// A named, schema-described capability
///
/// Implementations should encode expected failures (missing arguments,
/// unreadable files) as ERROR results. Returning `Err` is tolerated and
/// treated by the gateway as an execution fault.
///
/// Long-running tools poll `cancel` and return early when it fires.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable identifier, e.g. `workspace.readFile`
    fn id(&self) -> &str;

    /// Metadata for display and policy defaulting
    fn describe(&self) -> ToolDescriptor;

    /// Whether the tool can run in the given context
    fn supports(&self, _context: &ToolContext) -> bool {
        true
    }

    async fn execute(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolCapability, ToolRiskLevel};
    use serde_json::Map;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn id(&self) -> &str {
            "test.echo"
        }

        fn describe(&self) -> ToolDescriptor {
            ToolDescriptor::new("test.echo", "Echo", ToolCapability::Read, ToolRiskLevel::Safe)
        }

        async fn execute(
            &self,
            request: &ToolRequest,
            _context: &ToolContext,
            cancel: &CancellationToken,
        ) -> Result<ToolResult, ToolError> {
            if cancel.is_cancelled() {
                return Err(ToolError::Cancelled);
            }
            Ok(ToolResult::ok(
                format!("Echoed {} argument(s)", request.arguments().len()),
                request.arguments().clone(),
            ))
        }
    }

    #[tokio::test]
    async fn test_default_supports_and_execute() {
        let tool = Echo;
        let ctx = ToolContext::new();
        assert!(tool.supports(&ctx));

        let request = ToolRequest::new("test.echo").with_arg("a", 1);
        let result = tool
            .execute(&request, &ctx, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.summary, "Echoed 1 argument(s)");
        assert_eq!(result.payload, {
            let mut m = Map::new();
            m.insert("a".to_string(), 1.into());
            m
        });
    }

    #[tokio::test]
    async fn test_cancelled_token() {
        let token = CancellationToken::new();
        token.cancel();
        let err = Echo
            .execute(&ToolRequest::new("test.echo"), &ToolContext::new(), &token)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Cancelled));
    }
}
