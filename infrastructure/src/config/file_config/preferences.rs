//! Preferences configuration from TOML (`[preferences]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigIssue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePreferencesConfig {
    /// Preference file; defaults to `$XDG_CONFIG_HOME/insight-bridge/preferences.toml`
    pub path: Option<PathBuf>,
}

impl FilePreferencesConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        match &self.path {
            Some(path) if path.is_dir() => vec![ConfigIssue::error(
                "preferences.path",
                format!("preferences.path: '{}' is a directory", path.display()),
            )],
            _ => Vec::new(),
        }
    }
}
