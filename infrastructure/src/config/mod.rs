//! Configuration file loading for insight-bridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `INSIGHT_BRIDGE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./insight-bridge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/insight-bridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileOutputConfig, FilePreferencesConfig, FileToolsConfig,
    FileWorkspaceConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
