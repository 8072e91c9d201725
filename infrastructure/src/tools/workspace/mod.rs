//! Baseline workspace tools
//!
//! Read-only tools over the workspace directory, registered at
//! [`BASELINE_RANKING`] so richer implementations can replace them.
//!
//! | Tool | Display name |
//! |------|--------------|
//! | `workspace.readFile` | Read workspace file |
//! | `workspace.findFiles` | Find files in workspace |
//! | `workspace.searchText` | Search text in workspace |
//!
//! All three are category "Workspace", capability READ, risk SAFE, and are
//! only supported when the context has a workspace root.

mod find_files;
mod read_file;
mod search_text;

pub use find_files::{FIND_FILES, FindFilesTool};
pub use read_file::{READ_FILE, ReadFileTool};
pub use search_text::{SEARCH_TEXT, SearchTextTool};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::{MatchOptions, Pattern};
use insight_bridge_domain::{ToolContext, ToolError};

use super::registry::{ActivationError, BASELINE_RANKING, ServiceToolRegistry, ToolActivator};

pub const WORKSPACE_CATEGORY: &str = "Workspace";

/// Registers the baseline workspace tools
#[derive(Debug, Default)]
pub struct BaselineToolActivator;

impl BaselineToolActivator {
    pub fn new() -> Self {
        Self
    }
}

impl ToolActivator for BaselineToolActivator {
    fn name(&self) -> &str {
        "baseline"
    }

    fn activate(&self, registry: &ServiceToolRegistry) -> Result<(), ActivationError> {
        registry.register(Arc::new(ReadFileTool), BASELINE_RANKING);
        registry.register(Arc::new(FindFilesTool), BASELINE_RANKING);
        registry.register(Arc::new(SearchTextTool), BASELINE_RANKING);
        Ok(())
    }
}

fn workspace_root(context: &ToolContext) -> Result<&Path, ToolError> {
    context
        .workspace_root
        .as_deref()
        .ok_or_else(|| ToolError::Unavailable("No workspace root is available".to_string()))
}

/// Every visible file below `root`, in sorted traversal order
///
/// Dot-files and dot-directories (`.git`, `.metadata`) are skipped.
fn workspace_files(root: &Path) -> Result<impl Iterator<Item = PathBuf>, ToolError> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };
    let pattern = format!("{}/**/*", Pattern::escape(&root.to_string_lossy()));
    let paths = glob::glob_with(&pattern, options)
        .map_err(|e| ToolError::Failed(format!("Failed to scan workspace: {}", e)))?;

    let root = root.to_path_buf();
    Ok(paths
        .filter_map(Result::ok)
        .filter(move |p| !is_hidden(&root, p))
        .filter(|p| p.is_file()))
}

fn is_hidden(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .map(|relative| {
            relative
                .components()
                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        })
        .unwrap_or(false)
}

/// File filter built from globs such as `**/*.java`
///
/// A file passes if any glob matches its workspace path or its name. Globs
/// the matcher rejects fall back to suffix matching on `*.ext`.
#[derive(Debug, Default)]
struct FileGlobFilter {
    patterns: Vec<Pattern>,
    suffixes: Vec<String>,
}

impl FileGlobFilter {
    fn from_globs(globs: &[String]) -> Self {
        let mut filter = Self::default();
        for glob in globs.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
            match Pattern::new(glob.trim_start_matches('/')) {
                Ok(pattern) => filter.patterns.push(pattern),
                Err(_) => {
                    if let Some(star) = glob.rfind("*.")
                        && star + 2 < glob.len()
                    {
                        filter.suffixes.push(glob[star + 1..].to_string());
                    }
                }
            }
        }
        filter
    }

    fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.suffixes.is_empty()
    }

    fn accept(&self, workspace_path: &str, name: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let relative = workspace_path.trim_start_matches('/');
        self.patterns
            .iter()
            .any(|p| p.matches(relative) || p.matches(name))
            || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
fn workspace_fixture(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, content).unwrap();
    }
    dir
}
