//! `workspace.readFile`: read a workspace file as UTF-8 text

use std::fs::File;
use std::io::Read;

use async_trait::async_trait;
use insight_bridge_domain::{
    Tool, ToolCapability, ToolContext, ToolDescriptor, ToolError, ToolRequest, ToolResult,
    ToolRiskLevel, ToolSchema,
};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::WORKSPACE_CATEGORY;

pub const READ_FILE: &str = "workspace.readFile";

const DEFAULT_MAX_BYTES: i64 = 20_000;

#[derive(Debug, Default)]
pub struct ReadFileTool;

impl ReadFileTool {
    fn read(&self, request: &ToolRequest, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let path = request
            .get_non_blank("path")
            .ok_or_else(|| ToolError::MissingArgument("path".to_string()))?;
        let max_bytes = match request.get_i64_or("maxBytes", DEFAULT_MAX_BYTES) {
            n if n > 0 => n as u64,
            _ => DEFAULT_MAX_BYTES as u64,
        };

        let resolved = context
            .resolve_workspace_path(&path)
            .map_err(|e| ToolError::InvalidArgument(e.to_string()))?;
        if !resolved.is_file() {
            return Err(ToolError::NotFound(format!(
                "Workspace file not found: {}",
                path
            )));
        }

        let file = File::open(&resolved)
            .map_err(|e| ToolError::io(format!("Failed to read: {}", path), e))?;
        // One extra byte tells whether the file is longer than the cap
        let mut bytes = Vec::new();
        file.take(max_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| ToolError::io(format!("Failed to read: {}", path), e))?;

        let truncated = bytes.len() as u64 > max_bytes;
        bytes.truncate(max_bytes as usize);
        let content = decode_prefix(&bytes);

        tracing::debug!(path = %path, bytes = bytes.len(), truncated, "Read workspace file");

        let mut payload = Map::new();
        payload.insert("path".to_string(), Value::String(path.clone()));
        payload.insert("content".to_string(), Value::String(content));
        payload.insert("truncated".to_string(), Value::Bool(truncated));

        let mut summary = format!("Read {}", path);
        if truncated {
            summary.push_str(" (truncated)");
        }
        Ok(ToolResult::ok(summary, payload))
    }
}

/// Decode UTF-8, dropping a multi-byte sequence cut at the end
fn decode_prefix(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) if e.error_len().is_none() => {
            String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned()
        }
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn id(&self) -> &str {
        READ_FILE
    }

    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            READ_FILE,
            "Read workspace file",
            ToolCapability::Read,
            ToolRiskLevel::Safe,
        )
        .with_description("Reads a file from the workspace")
        .with_category(WORKSPACE_CATEGORY)
        .with_input_schema(
            ToolSchema::new("Input as JSON map")
                .with_field("path", "Workspace-relative path, e.g. /project/folder/file.txt")
                .with_field("maxBytes", "Max bytes to read (default 20000)"),
        )
        .with_output_schema(
            ToolSchema::new("Output as JSON map")
                .with_field("path", "Workspace-relative path")
                .with_field("content", "UTF-8 content")
                .with_field("truncated", "true if content was truncated"),
        )
        .with_example_arguments(r#"{ "path": "/target-platform/pom.xml", "maxBytes": 20000 }"#)
    }

    fn supports(&self, context: &ToolContext) -> bool {
        context.has_workspace()
    }

    async fn execute(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        _cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        Ok(self
            .read(request, context)
            .unwrap_or_else(ToolError::into_result))
    }
}
