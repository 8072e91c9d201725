//! `ide.openFile`: open a workspace file in an editor

use std::sync::Arc;

use async_trait::async_trait;
use insight_bridge_application::{EditorLocation, Workbench};
use insight_bridge_domain::{
    Tool, ToolCapability, ToolContext, ToolDescriptor, ToolError, ToolRequest, ToolResult,
    ToolRiskLevel, ToolSchema,
};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::IDE_CATEGORY;

pub const OPEN_FILE: &str = "ide.openFile";

pub struct OpenFileTool {
    workbench: Arc<dyn Workbench>,
}

impl OpenFileTool {
    pub fn new(workbench: Arc<dyn Workbench>) -> Self {
        Self { workbench }
    }

    async fn open(
        &self,
        file: &str,
        request: &ToolRequest,
        context: &ToolContext,
    ) -> Result<(), String> {
        let resolved = context
            .resolve_workspace_path(file)
            .map_err(|e| e.to_string())?;
        if !resolved.is_file() {
            return Err(format!("Workspace file not found: {}", file));
        }

        let position = |key: &str| {
            request
                .get_i64(key)
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
        };
        let location = EditorLocation::new(file).at(position("line"), position("column"));
        self.workbench
            .open_editor(&location)
            .await
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Tool for OpenFileTool {
    fn id(&self) -> &str {
        OPEN_FILE
    }

    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            OPEN_FILE,
            "Open file",
            ToolCapability::Read,
            ToolRiskLevel::Caution,
        )
        .with_description("Opens a workspace file in the IDE")
        .with_category(IDE_CATEGORY)
        .with_input_schema(
            ToolSchema::new("Input")
                .with_field("file", "Workspace-relative path")
                .with_field("line", "Optional 1-based line")
                .with_field("column", "Optional 1-based column"),
        )
        .with_output_schema(
            ToolSchema::new("Output")
                .with_field("opened", "true if opened")
                .with_field("file", "Workspace-relative path"),
        )
        .with_example_arguments(r#"{ "file": "/target-platform/pom.xml", "line": 1, "column": 1 }"#)
    }

    fn supports(&self, _context: &ToolContext) -> bool {
        self.workbench.is_attached()
    }

    async fn execute(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        _cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        let Some(file) = request.get_non_blank("file") else {
            return Ok(ToolError::MissingArgument("file".to_string()).into_result());
        };

        if let Err(diagnostics) = self.open(&file, request, context).await {
            tracing::debug!(file = %file, error = %diagnostics, "Open editor failed");
            return Ok(ToolResult::error("Failed to open editor", Some(diagnostics)));
        }

        let mut payload = Map::new();
        payload.insert("file".to_string(), Value::String(file.clone()));
        payload.insert("opened".to_string(), Value::Bool(true));
        Ok(ToolResult::ok(format!("Opened {}", file), payload))
    }
}
