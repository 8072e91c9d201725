//! Preference store port
//!
//! A flat, durable key-value store for string values. Policy overrides and
//! the manual-execution flag live here. Reads may happen concurrently; a
//! write to a key replaces whatever was there (last writer wins).

use thiserror::Error;

/// Errors raised when persisting preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to write preferences to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read preferences from {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to encode preferences: {0}")]
    Encode(String),
}

/// Port for durable key-value preferences
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn put(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// All keys starting with `prefix`, sorted
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    /// Make pending writes durable
    fn flush(&self) -> Result<(), PreferenceError>;

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            None => default,
        }
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.put(key, if value { "true" } else { "false" });
    }
}
