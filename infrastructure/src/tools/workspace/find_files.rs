//! `workspace.findFiles`: locate files by name

use async_trait::async_trait;
use insight_bridge_domain::{
    Tool, ToolCapability, ToolContext, ToolDescriptor, ToolError, ToolRequest, ToolResult,
    ToolRiskLevel, ToolSchema,
};
use regex::Regex;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::{FileGlobFilter, WORKSPACE_CATEGORY, file_name, workspace_files, workspace_root};

pub const FIND_FILES: &str = "workspace.findFiles";

const DEFAULT_MAX_RESULTS: i64 = 200;

/// How a file name is compared against `namePattern`
enum NameMatcher {
    /// The whole name must match
    Regex(Regex),
    Substring(String),
}

impl NameMatcher {
    fn parse(pattern: &str, is_regex: bool) -> Result<Self, ToolError> {
        if !is_regex {
            return Ok(NameMatcher::Substring(pattern.to_string()));
        }
        Regex::new(&format!("^(?:{})$", pattern))
            .map(NameMatcher::Regex)
            .map_err(|e| ToolError::InvalidArgument(format!("namePattern: {}", e)))
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Regex(re) => re.is_match(name),
            NameMatcher::Substring(needle) => name.contains(needle.as_str()),
        }
    }
}

#[derive(Debug, Default)]
pub struct FindFilesTool;

impl FindFilesTool {
    fn find(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        let pattern = request
            .get_non_blank("namePattern")
            .ok_or_else(|| ToolError::MissingArgument("namePattern".to_string()))?;
        let matcher = NameMatcher::parse(&pattern, request.get_bool_or("isRegex", false))?;
        let globs = FileGlobFilter::from_globs(&request.get_string_list("fileGlobs"));
        let max_results = match request.get_i64_or("maxResults", DEFAULT_MAX_RESULTS) {
            n if n > 0 => n as usize,
            _ => DEFAULT_MAX_RESULTS as usize,
        };

        let root = workspace_root(context)?;
        let mut files = Vec::new();
        let mut truncated = false;

        for path in workspace_files(root)? {
            if cancel.is_cancelled() {
                return Err(ToolError::Cancelled);
            }
            let name = file_name(&path);
            if !matcher.matches(&name) {
                continue;
            }
            let Some(portable) = context.to_workspace_path(&path) else {
                continue;
            };
            if !globs.accept(&portable, &name) {
                continue;
            }
            files.push(Value::String(portable));
            if files.len() >= max_results {
                truncated = true;
                break;
            }
        }

        tracing::debug!(pattern = %pattern, found = files.len(), truncated, "Find files done");

        let mut summary = format!("Found {} file(s)", files.len());
        if truncated {
            summary.push_str(" (truncated)");
        }
        let mut payload = Map::new();
        payload.insert("files".to_string(), Value::Array(files));
        payload.insert("truncated".to_string(), Value::Bool(truncated));
        Ok(ToolResult::ok(summary, payload))
    }
}

#[async_trait]
impl Tool for FindFilesTool {
    fn id(&self) -> &str {
        FIND_FILES
    }

    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            FIND_FILES,
            "Find files in workspace",
            ToolCapability::Read,
            ToolRiskLevel::Safe,
        )
        .with_description("Finds files by name (regex or substring) in the workspace")
        .with_category(WORKSPACE_CATEGORY)
        .with_input_schema(
            ToolSchema::new("Input")
                .with_field(
                    "namePattern",
                    "File name pattern. If isRegex=true: regex on the whole name; else substring",
                )
                .with_field("isRegex", "true to interpret namePattern as regex (default false)")
                .with_field("fileGlobs", "Optional file globs like **/*.java")
                .with_field("maxResults", "Max results (default 200)"),
        )
        .with_output_schema(
            ToolSchema::new("Output")
                .with_field("files", "Workspace-relative paths")
                .with_field("truncated", "true if maxResults was hit"),
        )
        .with_example_arguments(r#"{ "namePattern": ".*\\.NSN", "isRegex": true, "maxResults": 200 }"#)
    }

    fn supports(&self, context: &ToolContext) -> bool {
        context.has_workspace()
    }

    async fn execute(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        Ok(self
            .find(request, context, cancel)
            .unwrap_or_else(ToolError::into_result))
    }
}

#[cfg(test)]
mod tests {
    use super::super::workspace_fixture;
    use super::*;

    fn fixture() -> tempfile::TempDir {
        workspace_fixture(&[
            ("lib/PGM1.NSN", "x"),
            ("lib/PGM2.NSN", "x"),
            ("lib/notes.txt", "x"),
            ("app/src/Main.java", "x"),
            ("app/.settings/PGM3.NSN", "x"),
        ])
    }

    async fn run(request: ToolRequest, ctx: &ToolContext) -> ToolResult {
        FindFilesTool
            .execute(&request, ctx, &CancellationToken::new())
            .await
            .unwrap()
    }

    fn files(result: &ToolResult) -> Vec<&str> {
        result.payload["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_regex_matches_whole_name() {
        let dir = fixture();
        let ctx = ToolContext::new().with_workspace_root(dir.path());

        let result = run(
            ToolRequest::new(FIND_FILES)
                .with_arg("namePattern", r".*\.NSN")
                .with_arg("isRegex", true),
            &ctx,
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(files(&result), vec!["/lib/PGM1.NSN", "/lib/PGM2.NSN"]);
        assert_eq!(result.summary, "Found 2 file(s)");

        // Partial regex matches do not count
        let partial = run(
            ToolRequest::new(FIND_FILES)
                .with_arg("namePattern", "PGM")
                .with_arg("isRegex", true),
            &ctx,
        )
        .await;
        assert!(files(&partial).is_empty());
    }

    #[tokio::test]
    async fn test_substring_and_truncation() {
        let dir = fixture();
        let ctx = ToolContext::new().with_workspace_root(dir.path());

        let result = run(
            ToolRequest::new(FIND_FILES)
                .with_arg("namePattern", "PGM")
                .with_arg("maxResults", 1),
            &ctx,
        )
        .await;

        assert_eq!(files(&result), vec!["/lib/PGM1.NSN"]);
        assert_eq!(result.payload["truncated"], true);
        assert_eq!(result.summary, "Found 1 file(s) (truncated)");
    }

    #[tokio::test]
    async fn test_file_globs_filter() {
        let dir = fixture();
        let ctx = ToolContext::new().with_workspace_root(dir.path());

        let result = run(
            ToolRequest::new(FIND_FILES)
                .with_arg("namePattern", "a")
                .with_arg("fileGlobs", serde_json::json!(["**/*.java"])),
            &ctx,
        )
        .await;
        assert_eq!(files(&result), vec!["/app/src/Main.java"]);
    }

    #[tokio::test]
    async fn test_errors() {
        let dir = fixture();
        let ctx = ToolContext::new().with_workspace_root(dir.path());

        let missing = run(ToolRequest::new(FIND_FILES), &ctx).await;
        assert_eq!(missing.summary, "Missing argument: namePattern");

        let invalid = run(
            ToolRequest::new(FIND_FILES)
                .with_arg("namePattern", "(")
                .with_arg("isRegex", true),
            &ctx,
        )
        .await;
        assert!(invalid.is_error());
        assert!(invalid.summary.starts_with("Invalid argument: namePattern"));
    }

    #[tokio::test]
    async fn test_cancelled() {
        let dir = fixture();
        let ctx = ToolContext::new().with_workspace_root(dir.path());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = FindFilesTool
            .execute(
                &ToolRequest::new(FIND_FILES).with_arg("namePattern", "PGM"),
                &ctx,
                &cancel,
            )
            .await
            .unwrap();
        assert!(result.is_error());
        assert_eq!(result.summary, "Canceled");
    }
}
