//! `workspace.searchText`: grep-like search over workspace files
//!
//! Each match reports its position as a 1-based line and a 1-based character
//! column, the matched text, the whole line, and up to `contextLines` lines
//! before and after. Files that cannot be read are skipped; invalid UTF-8 is
//! replaced rather than rejected.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use insight_bridge_domain::{
    Tool, ToolCapability, ToolContext, ToolDescriptor, ToolError, ToolRequest, ToolResult,
    ToolRiskLevel, ToolSchema,
};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value, json};
use tokio_util::sync::CancellationToken;

use super::{FileGlobFilter, WORKSPACE_CATEGORY, file_name, workspace_files, workspace_root};

pub const SEARCH_TEXT: &str = "workspace.searchText";

const DEFAULT_MAX_RESULTS: i64 = 200;
const DEFAULT_MAX_FILES: i64 = 5000;
const DEFAULT_CONTEXT_LINES: i64 = 1;
const MAX_CONTEXT_LINES: i64 = 3;

/// Parsed search arguments
struct SearchOptions {
    query: String,
    pattern: Regex,
    globs: FileGlobFilter,
    max_results: usize,
    max_files: usize,
    context_lines: usize,
}

impl SearchOptions {
    fn from_request(request: &ToolRequest) -> Result<Self, ToolError> {
        let query = request
            .get_non_blank("query")
            .ok_or_else(|| ToolError::MissingArgument("query".to_string()))?;
        let is_regex = request.get_bool_or("isRegex", false);
        let case_sensitive = request.get_bool_or("caseSensitive", false);

        let source = if is_regex {
            query.clone()
        } else {
            regex::escape(&query)
        };
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(!case_sensitive)
            .multi_line(true)
            .build()
            .map_err(|e| ToolError::InvalidArgument(format!("query: {}", e)))?;

        Ok(Self {
            query,
            pattern,
            globs: FileGlobFilter::from_globs(&request.get_string_list("fileGlobs")),
            max_results: positive_or(
                request.get_i64_or("maxResults", DEFAULT_MAX_RESULTS),
                DEFAULT_MAX_RESULTS,
            ),
            max_files: positive_or(
                request.get_i64_or("maxFiles", DEFAULT_MAX_FILES),
                DEFAULT_MAX_FILES,
            ),
            context_lines: request
                .get_i64_or("contextLines", DEFAULT_CONTEXT_LINES)
                .clamp(0, MAX_CONTEXT_LINES) as usize,
        })
    }
}

fn positive_or(value: i64, default: i64) -> usize {
    if value > 0 { value as usize } else { default as usize }
}

/// One hit inside a file
#[derive(Debug, Clone, PartialEq)]
struct TextMatch {
    file: String,
    line: usize,
    column: usize,
    match_text: String,
    line_text: String,
    before: Vec<String>,
    after: Vec<String>,
}

impl TextMatch {
    fn to_value(&self) -> Value {
        json!({
            "file": self.file,
            "line": self.line,
            "column": self.column,
            "matchText": self.match_text,
            "lineText": self.line_text,
            "before": self.before,
            "after": self.after,
        })
    }
}

/// Search `content` line by line, appending hits until `limit` is reached
///
/// Returns `false` once the limit cut the scan short.
fn scan_content(
    file: &str,
    content: &str,
    pattern: &Regex,
    context_lines: usize,
    limit: usize,
    matches: &mut Vec<TextMatch>,
) -> bool {
    let lines: Vec<&str> = content.lines().collect();
    for (index, line) in lines.iter().enumerate() {
        for found in pattern.find_iter(line).filter(|m| !m.is_empty()) {
            if matches.len() >= limit {
                return false;
            }
            let before_start = index.saturating_sub(context_lines);
            let after_end = (index + 1 + context_lines).min(lines.len());
            matches.push(TextMatch {
                file: file.to_string(),
                line: index + 1,
                column: line[..found.start()].chars().count() + 1,
                match_text: found.as_str().to_string(),
                line_text: line.to_string(),
                before: lines[before_start..index].iter().map(|l| l.to_string()).collect(),
                after: lines[index + 1..after_end].iter().map(|l| l.to_string()).collect(),
            });
        }
    }
    true
}

fn read_lossy(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "Skipping unreadable file");
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchTextTool;

impl SearchTextTool {
    fn search(
        &self,
        request: &ToolRequest,
        context: &ToolContext,
        cancel: &CancellationToken,
    ) -> Result<ToolResult, ToolError> {
        let started = Instant::now();
        let options = SearchOptions::from_request(request)?;
        let root = workspace_root(context)?;

        let mut matches = Vec::new();
        let mut files_scanned = 0usize;
        let mut truncated = false;

        for path in workspace_files(root)? {
            if cancel.is_cancelled() {
                return Err(ToolError::Cancelled);
            }
            let name = file_name(&path);
            let Some(portable) = context.to_workspace_path(&path) else {
                continue;
            };
            if !options.globs.accept(&portable, &name) {
                continue;
            }
            if files_scanned >= options.max_files {
                truncated = true;
                break;
            }
            files_scanned += 1;

            let Some(content) = read_lossy(&path) else {
                continue;
            };
            let complete = scan_content(
                &portable,
                &content,
                &options.pattern,
                options.context_lines,
                options.max_results,
                &mut matches,
            );
            if !complete || matches.len() >= options.max_results {
                truncated = true;
                break;
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(
            query = %options.query,
            matches = matches.len(),
            files_scanned,
            duration_ms,
            truncated,
            "Text search done"
        );

        let mut summary = format!("Found {} match(es)", matches.len());
        if truncated {
            summary.push_str(" (truncated)");
        }
        let mut payload = Map::new();
        payload.insert(
            "matches".to_string(),
            Value::Array(matches.iter().map(TextMatch::to_value).collect()),
        );
        payload.insert("truncated".to_string(), Value::Bool(truncated));
        payload.insert(
            "stats".to_string(),
            json!({ "filesScanned": files_scanned, "durationMs": duration_ms }),
        );
        Ok(ToolResult::ok(summary, payload))
    }
}

#[async_trait]
impl Tool for SearchTextTool {
    fn id(&self) -> &str {
        SEARCH_TEXT
    }

    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            SEARCH_TEXT,
            "Search text in workspace",
            ToolCapability::Read,
            ToolRiskLevel::Safe,
        )
        .with_description(
            "Searches workspace files for plain text or regex and returns structured matches",
        )
        .with_category(WORKSPACE_CATEGORY)
        .with_input_schema(
            ToolSchema::new("Input")
                .with_field("query", "Text or regex to search for")
                .with_field("isRegex", "true to interpret query as regex (default false)")
                .with_field("caseSensitive", "Case sensitive search (default false)")
                .with_field("fileGlobs", "Optional file globs like **/*.NSN")
                .with_field("maxResults", "Max matches (default 200)")
                .with_field("maxFiles", "Max files to scan (default 5000)")
                .with_field("contextLines", "Lines of context before/after (default 1, max 3)"),
        )
        .with_output_schema(
            ToolSchema::new("Output")
                .with_field("matches", "List of matches")
                .with_field("truncated", "true if limits were hit")
                .with_field("stats", "filesScanned, durationMs"),
        )
        .with_example_arguments(
            r#"{ "query": "CALL\\s+MYPROG", "isRegex": true, "caseSensitive": false, "fileGlobs": ["**/*.NSN", "**/*.NSP", "**/*.java", "**/*.xml"], "maxResults": 200, "maxFiles": 5000, "contextLines": 1 }"#,
        )
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
            .search(request, context, cancel)
            .unwrap_or_else(ToolError::into_result))
    }
}
