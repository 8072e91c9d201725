//! Tools configuration from TOML (`[tools]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [tools]
//! baseline = true     # workspace.readFile, workspace.findFiles, workspace.searchText
//! ide = true          # ide.openFile, ide.selection.get
//! audit_log = "~/.local/share/insight-bridge/tool-calls.jsonl"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigIssue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    /// Register the baseline workspace tools
    pub baseline: bool,
    /// Register the IDE tools
    pub ide: bool,
    /// JSONL file that receives one line per gateway call
    pub audit_log: Option<PathBuf>,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            baseline: true,
            ide: true,
            audit_log: None,
        }
    }
}

impl FileToolsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.baseline && !self.ide {
            issues.push(ConfigIssue::warning(
                "tools",
                "tools: both baseline and ide are disabled, no tools will be available",
            ));
        }
        if let Some(path) = &self.audit_log
            && path.as_os_str().is_empty()
        {
            issues.push(ConfigIssue::warning(
                "tools.audit_log",
                "tools.audit_log: empty path, audit logging is disabled",
            ));
        }
        issues
    }
}
