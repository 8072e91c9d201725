//! `ide.selection.get`: read the current selection

use std::sync::Arc;

use async_trait::async_trait;
use insight_bridge_application::{Workbench, WorkbenchError, WorkbenchSelection};
use insight_bridge_domain::core::string::truncate_chars;
use insight_bridge_domain::{
    Tool, ToolCapability, ToolContext, ToolDescriptor, ToolError, ToolRequest, ToolResult,
    ToolRiskLevel, ToolSchema,
};
use serde_json::{Map, Value, json};
use tokio_util::sync::CancellationToken;

use super::IDE_CATEGORY;

pub const GET_SELECTION: &str = "ide.selection.get";

const DEFAULT_MAX_CHARS: i64 = 2000;
const MAX_STRUCTURED_ITEMS: usize = 50;

pub struct GetSelectionTool {
    workbench: Arc<dyn Workbench>,
}

impl GetSelectionTool {
    pub fn new(workbench: Arc<dyn Workbench>) -> Self {
        Self { workbench }
    }
}

fn selection_payload(selection: WorkbenchSelection, max_chars: usize) -> Map<String, Value> {
    let mut payload = Map::new();
    match selection {
        WorkbenchSelection::Structured(items) if !items.is_empty() => {
            let items: Vec<String> = items.into_iter().take(MAX_STRUCTURED_ITEMS).collect();
            payload.insert("kind".to_string(), json!("structured"));
            payload.insert("items".to_string(), json!(items));
        }
        WorkbenchSelection::Text(text) => {
            let (kept, truncated) = truncate_chars(&text.text, max_chars);
            payload.insert("kind".to_string(), json!("text"));
            if let Some(file) = text.file {
                payload.insert("file".to_string(), json!(file));
            }
            payload.insert("offset".to_string(), json!(text.offset));
            payload.insert("length".to_string(), json!(text.length));
            payload.insert("startLine".to_string(), json!(text.start_line));
            payload.insert("endLine".to_string(), json!(text.end_line));
            payload.insert("text".to_string(), json!(kept));
            payload.insert("truncated".to_string(), json!(truncated));
        }
        _ => {
            payload.insert("kind".to_string(), json!("none"));
        }
    }
    payload
}

#[async_trait]
impl Tool for GetSelectionTool {
    fn id(&self) -> &str {
        GET_SELECTION
    }

    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            GET_SELECTION,
            "Get current selection",
            ToolCapability::Read,
            ToolRiskLevel::Caution,
        )
        .with_description(
            "Returns the current selection (Project Explorer selection and/or editor selection)",
        )
        .with_category(IDE_CATEGORY)
        .with_input_schema(ToolSchema::new("Input").with_field(
            "maxChars",
            "Max characters to return if selection text is available (default 2000)",
        ))
        .with_output_schema(
            ToolSchema::new("Output")
                .with_field("kind", "none|structured|text")
                .with_field("items", "For structured selection: resource paths")
                .with_field("file", "For editor: active editor file path")
                .with_field("offset", "For text selection")
                .with_field("length", "For text selection")
                .with_field("startLine", "For text selection")
                .with_field("endLine", "For text selection"),
        )
        .with_example_arguments(r#"{ "maxChars": 2000 }"#)
    }

    fn supports(&self, _context: &ToolContext) -> bool {
        self.workbench.is_attached()
    }

    async fn execute(
        &self,
        request: &ToolRequest,
        _context: &ToolContext,
        _cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        let max_chars = match request.get_i64_or("maxChars", DEFAULT_MAX_CHARS) {
            n if n >= 0 => n as usize,
            _ => DEFAULT_MAX_CHARS as usize,
        };

        let selection = match self.workbench.selection().await {
            Ok(selection) => selection,
            Err(WorkbenchError::NoActiveWindow) => WorkbenchSelection::None,
            Err(e) => {
                return Ok(ToolResult::error(
                    "Failed to read selection",
                    Some(e.to_string()),
                ));
            }
        };

        Ok(ToolResult::ok(
            "Selection read",
            selection_payload(selection, max_chars),
        ))
    }
}
