//! In-memory preference store

use std::collections::BTreeMap;
use std::sync::RwLock;

use insight_bridge_application::ports::preference_store::{PreferenceError, PreferenceStore};

/// Preference store that lives only as long as the process
///
/// Used by tests and by `--no-config` runs that must not touch disk.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        match self.values.read() {
            Ok(values) => values
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn flush(&self) -> Result<(), PreferenceError> {
        Ok(())
    }
}
