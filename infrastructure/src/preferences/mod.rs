//! Preference stores and the persisted tool policy
//!
//! - [`FilePreferenceStore`]: TOML file, survives restarts
//! - [`InMemoryPreferenceStore`]: process-local, for tests and `--no-config`
//! - [`ToolPolicyStore`]: policy overrides and the manual-execution flag on
//!   top of either store

mod file;
mod memory;
mod policy_store;

pub use file::FilePreferenceStore;
pub use memory::InMemoryPreferenceStore;
pub use policy_store::{MANUAL_EXECUTION_KEY, POLICY_KEY_PREFIX, ToolPolicyStore};
