//! TOML-file preference store
//!
//! Keys are stored flat and quoted:
//!
//! ```toml
//! "tools.manualExecutionEnabled" = "true"
//! "tools.policy.ide.openFile" = "NEVER"
//! ```
//!
//! Hand-written files may also use nested tables; they are flattened into
//! dotted keys on load, and non-string scalars are stringified.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use insight_bridge_application::ports::preference_store::{PreferenceError, PreferenceStore};
use tracing::debug;

/// Durable preference store backed by a TOML file
///
/// The file is read once at [`FilePreferenceStore::open`]; writes stay in
/// memory until [`PreferenceStore::flush`], which replaces the file through a
/// temporary sibling. Flushes are serialized, so the file always ends up
/// holding the latest snapshot.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
    flush_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Open the store, loading existing values if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = if path.exists() {
            Self::load(&path)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = values.len(), "Opened preference store");

        Ok(Self {
            path,
            values: RwLock::new(values),
            flush_lock: Mutex::new(()),
        })
    }

    /// Default location: `$XDG_CONFIG_HOME/insight-bridge/preferences.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("insight-bridge").join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, PreferenceError> {
        let text = std::fs::read_to_string(path).map_err(|e| PreferenceError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let table: toml::Table = toml::from_str(&text).map_err(|e| PreferenceError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut values = BTreeMap::new();
        flatten("", &table, &mut values);
        Ok(values)
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(inner) => flatten(&full, inner, out),
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            toml::Value::Array(_) => {
                debug!(key = %full, "Ignoring array preference value");
            }
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
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
        // Held across snapshot, write and rename
        let _guard = match self.flush_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let snapshot = match self.values.read() {
            Ok(values) => values.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let text = toml::to_string(&snapshot).map_err(|e| PreferenceError::Encode(e.to_string()))?;

        let write_err = |source: std::io::Error| PreferenceError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, text).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), entries = snapshot.len(), "Flushed preferences");
        Ok(())
    }
}
