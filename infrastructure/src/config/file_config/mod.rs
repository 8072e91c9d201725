//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod preferences;
mod tools;
mod workspace;

pub use output::FileOutputConfig;
pub use preferences::FilePreferencesConfig;
pub use tools::FileToolsConfig;
pub use workspace::FileWorkspaceConfig;

use serde::{Deserialize, Serialize};

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value is ignored or a fallback is used
    Warning,
    /// The configuration cannot be used as is
    Error,
}

/// A problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key, e.g. `workspace.root`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Workspace root and active project
    pub workspace: FileWorkspaceConfig,
    /// Which tool sets to register, audit log location
    pub tools: FileToolsConfig,
    /// Preference file location
    pub preferences: FilePreferencesConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.workspace.validate());
        issues.extend(self.tools.validate());
        issues.extend(self.preferences.validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_bridge_domain::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[workspace]
root = "/home/dev/workspace"
active_project = "target-platform"

[tools]
ide = false
audit_log = "/tmp/tool-calls.jsonl"

[preferences]
path = "/tmp/prefs.toml"

[output]
format = "json"
color = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.workspace.root,
            Some(PathBuf::from("/home/dev/workspace"))
        );
        assert_eq!(
            config.workspace.active_project.as_deref(),
            Some("target-platform")
        );
        assert!(config.tools.baseline);
        assert!(!config.tools.ide);
        assert_eq!(
            config.tools.audit_log,
            Some(PathBuf::from("/tmp/tool-calls.jsonl"))
        );
        assert_eq!(config.preferences.path, Some(PathBuf::from("/tmp/prefs.toml")));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[tools]\nbaseline = false\n").unwrap();
        assert!(!config.tools.baseline);
        // Defaults should apply
        assert!(config.tools.ide);
        assert!(config.workspace.root.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_collects_issues() {
        let mut config = FileConfig::default();
        config.workspace.active_project = Some("  ".to_string());
        config.tools.baseline = false;
        config.tools.ide = false;

        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["workspace.active_project", "tools"]);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }
}
