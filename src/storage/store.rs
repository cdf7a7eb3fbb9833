// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Persistence for saved configurations.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::model::SavedConfiguration;
use crate::error::Result;

/// Key under which the configuration list is persisted.
pub const STORAGE_KEY: &str = "quantum_configurations";

/// Blob store holding the whole configuration list.
pub trait ConfigurationStore: Send + Sync {
    /// Load every stored configuration. Unreadable data loads as empty.
    fn load(&self) -> Vec<SavedConfiguration>;

    /// Replace the stored list.
    fn save(&self, configurations: &[SavedConfiguration]) -> Result<()>;

    /// Remove the stored list entirely.
    fn clear(&self) -> Result<()>;
}

/// Store backed by `<dir>/quantum_configurations.json`.
///
/// All operations are blocking filesystem calls.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationStore for JsonFileStore {
    fn load(&self) -> Vec<SavedConfiguration> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved configurations yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read saved configurations");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(configs) => configs,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Saved configurations are malformed, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, configurations: &[SavedConfiguration]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(configurations)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = configurations.len(), "Saved configurations");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store for tests and `--ephemeral` servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    configurations: Mutex<Vec<SavedConfiguration>>,
}

impl ConfigurationStore for MemoryStore {
    fn load(&self) -> Vec<SavedConfiguration> {
        self.configurations.lock().clone()
    }

    fn save(&self, configurations: &[SavedConfiguration]) -> Result<()> {
        *self.configurations.lock() = configurations.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.configurations.lock().clear();
        Ok(())
    }
}

impl<S: ConfigurationStore + ?Sized> ConfigurationStore for Box<S> {
    fn load(&self) -> Vec<SavedConfiguration> {
        (**self).load()
    }

    fn save(&self, configurations: &[SavedConfiguration]) -> Result<()> {
        (**self).save(configurations)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use tempfile::TempDir;

    fn sample(name: &str) -> SavedConfiguration {
        SavedConfiguration::new(name, Circuit::new(2, name).unwrap())
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_empty());
        assert!(store.path().ends_with("quantum_configurations.json"));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        let configs = vec![sample("a"), sample("b")];

        store.save(&configs).unwrap();
        assert_eq!(store.load(), configs);

        store.clear().unwrap();
        assert!(store.load().is_empty());
        store.clear().unwrap();
    }

    #[test]
    fn test_json_store_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        store.save(&[sample("x")]).unwrap();
        assert_eq!(store.load().len(), 1);
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }
}
