//! Tool Gateway use case.
//!
//! The single entry point through which AI agents and users run tools. The
//! gateway resolves the best implementation, evaluates the trust policy,
//! asks a human when required, and runs the tool. Every outcome, including
//! panics inside a tool, comes back as a [`ToolResult`].
//!
//! # Call Flow
//!
//! ```text
//! REQUESTED
//!    │ blank tool id ─────────────────────────────▶ ERROR
//!    ▼
//! RESOLVED
//!    │ no supporting tool ────────────────────────▶ ERROR
//!    ▼
//! POLICY_EVALUATED
//!    │ NEVER ─────────────────────────────────────▶ DENIED
//!    │ ASK + AI ──▶ CONFIRM_PENDING
//!    │                 │ no handler / denied ──────▶ DENIED
//!    │                 ▼ allowed
//!    ▼ ALWAYS
//! EXECUTING
//!    │ Err / panic ───────────────────────────────▶ ERROR
//!    ▼
//!   OK
//! ```
//!
//! Steps never overlap or reorder: the confirmation answer is in hand before
//! `execute` is called. There are no retries.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use insight_bridge_domain::{
    GatewayError, Tool, ToolContext, ToolDescriptor, ToolOrigin, ToolPolicyDecision, ToolRequest,
    ToolResult,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ports::tool_audit_log::{NoToolAuditLog, ToolAuditEvent, ToolAuditLog};
use crate::ports::tool_confirmation::ToolConfirmationHandler;
use crate::ports::tool_policy::ToolPolicyEvaluator;
use crate::ports::tool_registry::ToolRegistry;

/// What happened along the way, for the audit record
#[derive(Debug, Default)]
struct CallTrace {
    policy: Option<ToolPolicyDecision>,
    confirmation_requested: bool,
    remembered: Option<ToolPolicyDecision>,
}

/// Policy-gated tool dispatcher.
///
/// The policy evaluator and the confirmation handler are optional: without
/// an evaluator every tool is treated as ASK, and without a handler an ASK
/// for an AI caller is denied.
#[derive(Clone)]
pub struct ToolGateway {
    registry: Arc<dyn ToolRegistry>,
    policy: Option<Arc<dyn ToolPolicyEvaluator>>,
    confirmation: Option<Arc<dyn ToolConfirmationHandler>>,
    audit_log: Arc<dyn ToolAuditLog>,
}

impl ToolGateway {
    pub fn new(registry: Arc<dyn ToolRegistry>) -> Self {
        Self {
            registry,
            policy: None,
            confirmation: None,
            audit_log: Arc::new(NoToolAuditLog),
        }
    }

    pub fn with_policy_evaluator(mut self, policy: Arc<dyn ToolPolicyEvaluator>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_confirmation_handler(
        mut self,
        confirmation: Arc<dyn ToolConfirmationHandler>,
    ) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    pub fn with_audit_log(mut self, audit_log: Arc<dyn ToolAuditLog>) -> Self {
        self.audit_log = audit_log;
        self
    }

    /// Policy for a descriptor and origin. ASK when no evaluator is set.
    pub fn evaluate_policy(
        &self,
        descriptor: &ToolDescriptor,
        origin: ToolOrigin,
    ) -> ToolPolicyDecision {
        match &self.policy {
            Some(policy) => policy.get_policy(&descriptor.id, descriptor, origin),
            None => ToolPolicyDecision::Ask,
        }
    }

    /// Tools an AI planner may see: everything not NEVER for an AI caller
    pub fn list_advertised_tools(&self, context: &ToolContext) -> Vec<ToolDescriptor> {
        self.registry
            .list_all_tools(context)
            .into_iter()
            .filter(|d| self.evaluate_policy(d, ToolOrigin::Ai) != ToolPolicyDecision::Never)
            .collect()
    }

    /// Every supported tool with its policy for an AI caller, NEVER included
    pub fn list_tools_with_policy(
        &self,
        context: &ToolContext,
    ) -> Vec<(ToolDescriptor, ToolPolicyDecision)> {
        self.registry
            .list_all_tools(context)
            .into_iter()
            .map(|d| {
                let policy = self.evaluate_policy(&d, ToolOrigin::Ai);
                (d, policy)
            })
            .collect()
    }

    pub async fn execute_tool(&self, request: &ToolRequest, context: &ToolContext) -> ToolResult {
        self.execute_tool_with_cancel(request, context, CancellationToken::new())
            .await
    }

    /// Run a request to completion
    ///
    /// `cancel` is handed to the tool; the gateway itself never cancels.
    pub async fn execute_tool_with_cancel(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: CancellationToken,
    ) -> ToolResult {
        let started = Instant::now();
        let mut trace = CallTrace::default();

        let result = match self.run(request, context, &cancel, &mut trace).await {
            Ok(result) => result,
            Err(error) => {
                debug!(tool = request.tool_id(), code = error.code(), "Gateway terminal state");
                ToolResult::from(error)
            }
        };

        info!(
            tool = request.tool_id(),
            origin = %request.origin(),
            status = %result.status,
            "{}",
            result.summary
        );

        self.audit_log.record(&ToolAuditEvent {
            tool_id: request.tool_id().to_string(),
            call_id: request.call_id().map(str::to_string),
            origin: request.origin(),
            policy: trace.policy,
            confirmation_requested: trace.confirmation_requested,
            remembered: trace.remembered,
            status: result.status,
            summary: result.summary.clone(),
            duration_ms: started.elapsed().as_millis() as u64,
        });

        result
    }

    /// Synchronous wrapper for callers outside any async runtime
    ///
    /// Must not be called from within a tokio runtime.
    pub fn execute_tool_blocking(&self, request: &ToolRequest, context: &ToolContext) -> ToolResult {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build();

        match rt {
            Ok(rt) => rt.block_on(self.execute_tool(request, context)),
            Err(e) => ToolResult::error(
                format!("Failed to create runtime: {}", e),
                Some(e.to_string()),
            ),
        }
    }

    async fn run(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: &CancellationToken,
        trace: &mut CallTrace,
    ) -> Result<ToolResult, GatewayError> {
        let tool_id = request.tool_id().trim();
        if tool_id.is_empty() {
            return Err(GatewayError::MissingToolId);
        }

        let tool = self
            .registry
            .resolve_best_tool(tool_id, context)
            .ok_or_else(|| GatewayError::ToolNotFound {
                id: tool_id.to_string(),
            })?;
        let descriptor = tool.describe();
        debug!(tool = %descriptor.id, "Resolved tool");

        let policy = self.evaluate_policy(&descriptor, request.origin());
        trace.policy = Some(policy);
        debug!(tool = %descriptor.id, origin = %request.origin(), %policy, "Evaluated policy");

        match policy {
            ToolPolicyDecision::Never => {
                return Err(GatewayError::PolicyDenied {
                    name: descriptor.display_name.clone(),
                });
            }
            ToolPolicyDecision::Ask if request.origin() == ToolOrigin::Ai => {
                self.confirm(&descriptor, request, context, trace).await?;
            }
            _ => {}
        }

        self.invoke(tool.as_ref(), &descriptor, request, context, cancel)
            .await
    }

    async fn confirm(
        &self,
        descriptor: &ToolDescriptor,
        request: &ToolRequest,
        context: &ToolContext,
        trace: &mut CallTrace,
    ) -> Result<(), GatewayError> {
        let Some(handler) = &self.confirmation else {
            warn!(tool = %descriptor.id, "Confirmation required but no handler is configured");
            return Err(GatewayError::ConfirmationUnavailable {
                name: descriptor.display_name.clone(),
            });
        };

        trace.confirmation_requested = true;
        debug!(tool = %descriptor.id, "Awaiting confirmation");

        let decision = match handler.confirm(descriptor, request, context).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!(tool = %descriptor.id, error = %e, "Confirmation failed, treating as deny");
                return Err(GatewayError::UserDenied {
                    name: descriptor.display_name.clone(),
                });
            }
        };

        if let Some(remember) = decision.remember_as() {
            match &self.policy {
                Some(policy) => {
                    policy.remember(&descriptor.id, remember);
                    trace.remembered = Some(remember);
                    info!(tool = %descriptor.id, policy = %remember, "Remembered tool policy");
                }
                None => warn!(
                    tool = %descriptor.id,
                    policy = %remember,
                    "No policy evaluator configured, decision not remembered"
                ),
            }
        }

        if decision.is_allowed() {
            Ok(())
        } else {
            Err(GatewayError::UserDenied {
                name: descriptor.display_name.clone(),
            })
        }
    }

    async fn invoke(
        &self,
        tool: &dyn Tool,
        descriptor: &ToolDescriptor,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, GatewayError> {
        debug!(tool = %descriptor.id, "Executing tool");

        let outcome = AssertUnwindSafe(tool.execute(request, context, cancel))
            .catch_unwind()
            .await;

        let diagnostics = match outcome {
            Ok(Ok(result)) => return Ok(result),
            Ok(Err(e)) => e.diagnostics(),
            Err(panic) => format!("panic: {}", panic_message(&panic)),
        };

        warn!(tool = %descriptor.id, error = %diagnostics, "Tool execution fault");
        Err(GatewayError::ExecutionFault {
            name: descriptor.display_name.clone(),
            diagnostics,
        })
    }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_confirmation::ConfirmationError;
    use async_trait::async_trait;
    use insight_bridge_domain::{
        ToolCapability, ToolError, ToolRiskLevel, ToolStatus, ToolUserDecision, resolve_policy,
    };
    use serde_json::Map;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test doubles ====================

    enum Behavior {
        Succeed,
        Fail,
        Panic,
    }

    struct CountingTool {
        id: &'static str,
        name: &'static str,
        risk: ToolRiskLevel,
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl CountingTool {
        fn new(id: &'static str, name: &'static str, risk: ToolRiskLevel) -> Arc<Self> {
            Self::with_behavior(id, name, risk, Behavior::Succeed)
        }

        fn with_behavior(
            id: &'static str,
            name: &'static str,
            risk: ToolRiskLevel,
            behavior: Behavior,
        ) -> Arc<Self> {
            Arc::new(Self {
                id,
                name,
                risk,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Tool for CountingTool {
        fn id(&self) -> &str {
            self.id
        }

        fn describe(&self) -> ToolDescriptor {
            ToolDescriptor::new(self.id, self.name, ToolCapability::Read, self.risk)
                .with_category("Test")
        }

        async fn execute(
            &self,
            _request: &ToolRequest,
            _context: &ToolContext,
            _cancel: &CancellationToken,
        ) -> Result<ToolResult, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => Ok(ToolResult::ok(format!("Ran {}", self.name), Map::new())),
                Behavior::Fail => Err(ToolError::Failed("disk on fire".to_string())),
                Behavior::Panic => panic!("tool exploded"),
            }
        }
    }

    struct StaticRegistry {
        tools: Vec<Arc<dyn Tool>>,
    }

    impl ToolRegistry for StaticRegistry {
        fn list_all_tools(&self, context: &ToolContext) -> Vec<ToolDescriptor> {
            let mut all: Vec<ToolDescriptor> = self
                .tools
                .iter()
                .filter(|t| t.supports(context))
                .map(|t| t.describe())
                .collect();
            all.sort_by_key(|d| d.sort_key());
            all
        }

        fn resolve_best_tool(&self, tool_id: &str, context: &ToolContext) -> Option<Arc<dyn Tool>> {
            self.tools
                .iter()
                .find(|t| t.id() == tool_id && t.supports(context))
                .cloned()
        }
    }

    #[derive(Default)]
    struct MemoryPolicy {
        stored: Mutex<HashMap<String, ToolPolicyDecision>>,
    }

    impl MemoryPolicy {
        fn with(tool_id: &str, decision: ToolPolicyDecision) -> Arc<Self> {
            let policy = Self::default();
            policy.remember(tool_id, decision);
            Arc::new(policy)
        }
    }

    impl ToolPolicyEvaluator for MemoryPolicy {
        fn get_policy(
            &self,
            tool_id: &str,
            descriptor: &ToolDescriptor,
            origin: ToolOrigin,
        ) -> ToolPolicyDecision {
            let stored = self.stored.lock().unwrap().get(tool_id).copied();
            resolve_policy(origin, stored, descriptor)
        }

        fn remember(&self, tool_id: &str, decision: ToolPolicyDecision) {
            self.stored
                .lock()
                .unwrap()
                .insert(tool_id.to_string(), decision);
        }
    }

    struct ScriptedConfirmation {
        answers: Mutex<VecDeque<Result<ToolUserDecision, ConfirmationError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedConfirmation {
        fn answering(
            answers: Vec<Result<ToolUserDecision, ConfirmationError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ToolConfirmationHandler for ScriptedConfirmation {
        async fn confirm(
            &self,
            _descriptor: &ToolDescriptor,
            _request: &ToolRequest,
            _context: &ToolContext,
        ) -> Result<ToolUserDecision, ConfirmationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(ToolUserDecision::deny_once()))
        }
    }

    #[derive(Default)]
    struct RecordingAudit {
        events: Mutex<Vec<ToolAuditEvent>>,
    }

    impl ToolAuditLog for RecordingAudit {
        fn record(&self, event: &ToolAuditEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn registry(tools: Vec<Arc<dyn Tool>>) -> Arc<StaticRegistry> {
        Arc::new(StaticRegistry { tools })
    }

    fn ai(tool_id: &str) -> ToolRequest {
        ToolRequest::new(tool_id).with_call_id("call-1")
    }

    fn user(tool_id: &str) -> ToolRequest {
        ToolRequest::new(tool_id).with_origin(ToolOrigin::User)
    }

    // ==================== Resolution ====================

    #[tokio::test]
    async fn test_missing_tool_id() {
        let gateway = ToolGateway::new(registry(vec![]));
        let result = gateway.execute_tool(&ai("  "), &ToolContext::new()).await;

        assert_eq!(result.status, ToolStatus::Error);
        assert_eq!(result.summary, "Tool request is missing toolId");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_naming_id() {
        let gateway = ToolGateway::new(registry(vec![]));
        let result = gateway
            .execute_tool(&ai("workspace.nothing"), &ToolContext::new())
            .await;

        assert_eq!(result.status, ToolStatus::Error);
        assert!(result.summary.contains("workspace.nothing"));
    }

    // ==================== Policy ====================

    #[tokio::test]
    async fn test_user_origin_never_confirms() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let confirm = ScriptedConfirmation::answering(vec![]);

        for stored in ToolPolicyDecision::ALL {
            let gateway = ToolGateway::new(registry(vec![tool.clone()]))
                .with_policy_evaluator(MemoryPolicy::with("ide.openFile", stored))
                .with_confirmation_handler(confirm.clone());
            let result = gateway
                .execute_tool(&user("ide.openFile"), &ToolContext::new())
                .await;
            assert!(result.is_ok(), "stored {stored} should not block a user call");
        }

        assert_eq!(confirm.calls(), 0);
        assert_eq!(tool.calls(), 3);
    }

    #[tokio::test]
    async fn test_never_policy_denies_without_execute() {
        let tool = CountingTool::new("workspace.readFile", "Read workspace file", ToolRiskLevel::Safe);
        let confirm = ScriptedConfirmation::answering(vec![]);
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(MemoryPolicy::with(
                "workspace.readFile",
                ToolPolicyDecision::Never,
            ))
            .with_confirmation_handler(confirm.clone());

        let result = gateway
            .execute_tool(&ai("workspace.readFile"), &ToolContext::new())
            .await;

        assert_eq!(result.status, ToolStatus::Denied);
        assert_eq!(
            result.summary,
            "Tool is not allowed by policy: Read workspace file"
        );
        assert_eq!(tool.calls(), 0);
        assert_eq!(confirm.calls(), 0);
    }

    #[tokio::test]
    async fn test_safe_tool_runs_without_confirmation() {
        let tool = CountingTool::new("workspace.readFile", "Read workspace file", ToolRiskLevel::Safe);
        let confirm = ScriptedConfirmation::answering(vec![]);
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()))
            .with_confirmation_handler(confirm.clone());

        let result = gateway
            .execute_tool(&ai("workspace.readFile"), &ToolContext::new())
            .await;

        assert!(result.is_ok());
        assert_eq!(tool.calls(), 1);
        assert_eq!(confirm.calls(), 0);
    }

    #[tokio::test]
    async fn test_risky_tool_confirms_exactly_once() {
        for (answer, expect_run) in [
            (ToolUserDecision::allow_once(), true),
            (ToolUserDecision::deny_once(), false),
        ] {
            let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
            let confirm = ScriptedConfirmation::answering(vec![Ok(answer)]);
            let gateway = ToolGateway::new(registry(vec![tool.clone()]))
                .with_policy_evaluator(Arc::new(MemoryPolicy::default()))
                .with_confirmation_handler(confirm.clone());

            let result = gateway
                .execute_tool(&ai("ide.openFile"), &ToolContext::new())
                .await;

            assert_eq!(confirm.calls(), 1);
            assert_eq!(tool.calls(), usize::from(expect_run));
            if !expect_run {
                assert_eq!(result.status, ToolStatus::Denied);
                assert_eq!(result.summary, "Tool execution was denied by user: Open file");
            }
        }
    }

    #[tokio::test]
    async fn test_allow_and_remember_skips_next_confirmation() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let policy = Arc::new(MemoryPolicy::default());
        let confirm =
            ScriptedConfirmation::answering(vec![Ok(ToolUserDecision::allow_and_remember_always())]);
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(policy.clone())
            .with_confirmation_handler(confirm.clone());
        let ctx = ToolContext::new();

        assert!(gateway.execute_tool(&ai("ide.openFile"), &ctx).await.is_ok());
        assert!(gateway.execute_tool(&ai("ide.openFile"), &ctx).await.is_ok());

        assert_eq!(confirm.calls(), 1);
        assert_eq!(tool.calls(), 2);
        assert_eq!(
            policy.get_policy("ide.openFile", &tool.describe(), ToolOrigin::Ai),
            ToolPolicyDecision::Always
        );
    }

    #[tokio::test]
    async fn test_read_file_and_open_file_scenario() {
        let read = CountingTool::new("workspace.readFile", "Read workspace file", ToolRiskLevel::Safe);
        let open = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let confirm =
            ScriptedConfirmation::answering(vec![Ok(ToolUserDecision::deny_and_remember_never())]);
        let gateway = ToolGateway::new(registry(vec![read.clone(), open.clone()]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()))
            .with_confirmation_handler(confirm.clone());
        let ctx = ToolContext::new();

        let result = gateway.execute_tool(&ai("workspace.readFile"), &ctx).await;
        assert!(result.is_ok());
        assert_eq!(confirm.calls(), 0);

        let result = gateway.execute_tool(&ai("ide.openFile"), &ctx).await;
        assert_eq!(result.status, ToolStatus::Denied);
        assert_eq!(confirm.calls(), 1);

        let result = gateway.execute_tool(&ai("ide.openFile"), &ctx).await;
        assert_eq!(result.status, ToolStatus::Denied);
        assert_eq!(result.summary, "Tool is not allowed by policy: Open file");
        assert_eq!(confirm.calls(), 1);
        assert_eq!(open.calls(), 0);

        // NEVER also hides the tool from planners
        let advertised: Vec<String> = gateway
            .list_advertised_tools(&ctx)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(advertised, vec!["workspace.readFile"]);
    }

    #[tokio::test]
    async fn test_ask_without_handler_is_denied() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()));

        let result = gateway
            .execute_tool(&ai("ide.openFile"), &ToolContext::new())
            .await;

        assert_eq!(result.status, ToolStatus::Denied);
        assert_eq!(
            result.summary,
            "Tool requires confirmation, but no confirmation handler is available"
        );
        assert_eq!(tool.calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmation_error_counts_as_deny() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let confirm = ScriptedConfirmation::answering(vec![Err(ConfirmationError::Abandoned)]);
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()))
            .with_confirmation_handler(confirm);

        let result = gateway
            .execute_tool(&ai("ide.openFile"), &ToolContext::new())
            .await;

        assert_eq!(result.status, ToolStatus::Denied);
        assert_eq!(tool.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_evaluator_asks_even_for_safe_tools() {
        let tool = CountingTool::new("workspace.readFile", "Read workspace file", ToolRiskLevel::Safe);
        let confirm = ScriptedConfirmation::answering(vec![Ok(ToolUserDecision::allow_once())]);
        let gateway =
            ToolGateway::new(registry(vec![tool.clone()])).with_confirmation_handler(confirm.clone());

        let result = gateway
            .execute_tool(&ai("workspace.readFile"), &ToolContext::new())
            .await;

        assert!(result.is_ok());
        assert_eq!(confirm.calls(), 1);
        assert_eq!(gateway.list_advertised_tools(&ToolContext::new()).len(), 1);
    }

    // ==================== Faults ====================

    #[tokio::test]
    async fn test_tool_error_becomes_execution_fault() {
        let tool = CountingTool::with_behavior(
            "workspace.readFile",
            "Read workspace file",
            ToolRiskLevel::Safe,
            Behavior::Fail,
        );
        let gateway = ToolGateway::new(registry(vec![tool]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()));

        let result = gateway
            .execute_tool(&ai("workspace.readFile"), &ToolContext::new())
            .await;

        assert_eq!(result.status, ToolStatus::Error);
        assert_eq!(result.summary, "Tool failed: Read workspace file");
        assert_eq!(result.diagnostics.as_deref(), Some("Failed: disk on fire"));
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let tool = CountingTool::with_behavior(
            "workspace.readFile",
            "Read workspace file",
            ToolRiskLevel::Safe,
            Behavior::Panic,
        );
        let gateway = ToolGateway::new(registry(vec![tool]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()));

        let result = gateway
            .execute_tool(&ai("workspace.readFile"), &ToolContext::new())
            .await;

        assert_eq!(result.status, ToolStatus::Error);
        assert!(result.summary.contains("Read workspace file"));
        let diagnostics = result.diagnostics.unwrap();
        assert!(diagnostics.starts_with("panic: "));
        assert!(diagnostics.contains("tool exploded"));
    }

    // ==================== Listing and audit ====================

    #[tokio::test]
    async fn test_advertised_listing_is_stable() {
        let a = CountingTool::new("b.tool", "beta", ToolRiskLevel::Safe);
        let b = CountingTool::new("a.tool", "Alpha", ToolRiskLevel::Caution);
        let gateway = ToolGateway::new(registry(vec![a, b]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()));
        let ctx = ToolContext::new();

        let first = gateway.list_advertised_tools(&ctx);
        let second = gateway.list_advertised_tools(&ctx);
        assert_eq!(first, second);
        assert_eq!(first[0].display_name, "Alpha");
    }

    #[tokio::test]
    async fn test_cloned_gateway_shares_collaborators() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let policy = Arc::new(MemoryPolicy::default());
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(policy.clone());
        let worker = gateway.clone();

        policy.remember("ide.openFile", ToolPolicyDecision::Always);
        let result = worker
            .execute_tool(&ai("ide.openFile"), &ToolContext::new())
            .await;
        assert!(result.is_ok());

        policy.remember("ide.openFile", ToolPolicyDecision::Never);
        let result = gateway
            .execute_tool(&ai("ide.openFile"), &ToolContext::new())
            .await;
        assert_eq!(result.status, ToolStatus::Denied);
        assert_eq!(tool.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_tools_with_policy_includes_never() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let gateway = ToolGateway::new(registry(vec![tool]))
            .with_policy_evaluator(MemoryPolicy::with("ide.openFile", ToolPolicyDecision::Never));

        let all = gateway.list_tools_with_policy(&ToolContext::new());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].1, ToolPolicyDecision::Never);
        assert!(gateway.list_advertised_tools(&ToolContext::new()).is_empty());
    }

    #[tokio::test]
    async fn test_audit_records_each_call() {
        let tool = CountingTool::new("ide.openFile", "Open file", ToolRiskLevel::Caution);
        let audit = Arc::new(RecordingAudit::default());
        let confirm =
            ScriptedConfirmation::answering(vec![Ok(ToolUserDecision::allow_and_remember_always())]);
        let gateway = ToolGateway::new(registry(vec![tool]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()))
            .with_confirmation_handler(confirm)
            .with_audit_log(audit.clone());

        gateway
            .execute_tool(&ai("ide.openFile"), &ToolContext::new())
            .await;
        gateway
            .execute_tool(&ai("missing.tool"), &ToolContext::new())
            .await;

        let events = audit.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].policy, Some(ToolPolicyDecision::Ask));
        assert!(events[0].confirmation_requested);
        assert_eq!(events[0].remembered, Some(ToolPolicyDecision::Always));
        assert_eq!(events[0].call_id.as_deref(), Some("call-1"));
        assert_eq!(events[1].status, ToolStatus::Error);
        assert!(events[1].policy.is_none());
    }

    #[test]
    fn test_execute_tool_blocking() {
        let tool = CountingTool::new("workspace.readFile", "Read workspace file", ToolRiskLevel::Safe);
        let gateway = ToolGateway::new(registry(vec![tool.clone()]))
            .with_policy_evaluator(Arc::new(MemoryPolicy::default()));

        let result = gateway.execute_tool_blocking(&ai("workspace.readFile"), &ToolContext::new());
        assert!(result.is_ok());
        assert_eq!(tool.calls(), 1);
    }
}
