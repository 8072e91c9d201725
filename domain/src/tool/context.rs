//! Execution context handed to tools

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// Read-only snapshot of the environment a call runs in
///
/// Built by the caller for each invocation and only borrowed by the gateway.
/// Workspace paths are portable (`/project/dir/file.txt`), always relative to
/// [`ToolContext::workspace_root`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContext {
    pub workspace_root: Option<PathBuf>,
    pub active_project: Option<String>,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn with_active_project(mut self, project: impl Into<String>) -> Self {
        self.active_project = Some(project.into());
        self
    }

    pub fn has_workspace(&self) -> bool {
        self.workspace_root.is_some()
    }

    /// Map a portable workspace path to a file-system path below the root
    ///
    /// Leading slashes are ignored. `.` segments are dropped; `..` segments
    /// and absolute prefixes are rejected so a path cannot leave the root.
    pub fn resolve_workspace_path(&self, portable: &str) -> Result<PathBuf, DomainError> {
        let root = self
            .workspace_root
            .as_ref()
            .ok_or(DomainError::NoWorkspace)?;

        let trimmed = portable.trim().trim_start_matches(['/', '\\']);
        let mut resolved = root.clone();
        for component in Path::new(trimmed).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::PathOutsideWorkspace(portable.to_string()));
                }
            }
        }
        Ok(resolved)
    }

    /// Inverse of [`ToolContext::resolve_workspace_path`]
    ///
    /// Returns `None` for paths that are not below the workspace root.
    pub fn to_workspace_path(&self, path: &Path) -> Option<String> {
        let root = self.workspace_root.as_ref()?;
        let relative = path.strip_prefix(root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(format!("/{}", parts.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_workspace_path() {
        let ctx = ToolContext::new().with_workspace_root("/ws");
        assert_eq!(
            ctx.resolve_workspace_path("/proj/src/a.txt").unwrap(),
            PathBuf::from("/ws/proj/src/a.txt")
        );
        assert_eq!(
            ctx.resolve_workspace_path("proj/./a.txt").unwrap(),
            PathBuf::from("/ws/proj/a.txt")
        );
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let ctx = ToolContext::new().with_workspace_root("/ws");
        let err = ctx.resolve_workspace_path("/proj/../../etc/passwd").unwrap_err();
        assert!(matches!(err, DomainError::PathOutsideWorkspace(_)));
    }

    #[test]
    fn test_resolve_without_workspace() {
        let ctx = ToolContext::new();
        assert!(matches!(
            ctx.resolve_workspace_path("/a"),
            Err(DomainError::NoWorkspace)
        ));
    }

    #[test]
    fn test_to_workspace_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ToolContext::new().with_workspace_root(dir.path());
        let file = dir.path().join("proj").join("a.txt");
        assert_eq!(ctx.to_workspace_path(&file).as_deref(), Some("/proj/a.txt"));
        assert!(ctx.to_workspace_path(Path::new("/elsewhere/a.txt")).is_none());
    }
}
