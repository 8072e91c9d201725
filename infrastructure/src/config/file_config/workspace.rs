//! Workspace configuration from TOML (`[workspace]` section)
//!
//! ```toml
//! [workspace]
//! root = "~/workspace"
//! active_project = "target-platform"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigIssue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    /// Workspace root directory; `~/` is expanded
    pub root: Option<PathBuf>,
    /// Project name reported in the tool context
    pub active_project: Option<String>,
}

impl FileWorkspaceConfig {
    /// Root with a leading `~/` expanded to the home directory
    pub fn resolved_root(&self) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        match root.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(root.clone()),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if let Some(root) = self.resolved_root()
            && !root.is_dir()
        {
            issues.push(ConfigIssue::warning(
                "workspace.root",
                format!(
                    "workspace.root: '{}' is not a directory, workspace tools will fail",
                    root.display()
                ),
            ));
        }
        if let Some(project) = &self.active_project
            && project.trim().is_empty()
        {
            issues.push(ConfigIssue::warning(
                "workspace.active_project",
                "workspace.active_project: empty project name is ignored",
            ));
        }
        issues
    }
}
