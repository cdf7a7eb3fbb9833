// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Library of saved circuit configurations.
//!
//! [`ConfigurationLibrary`] keeps the working list in memory and writes the
//! whole list through its [`ConfigurationStore`] after every change.

pub mod model;
pub mod store;

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

pub use model::{
    new_configuration_id, CameraSettings, LibraryStatistics, RenderSettings, SavedConfiguration,
    Theme, Vec3, VisualizationConfig, VisualizationType,
};
pub use store::{ConfigurationStore, JsonFileStore, MemoryStore, STORAGE_KEY};

use crate::error::{Error, Result, ValidationError};

/// In-memory configuration list synchronized with a store.
pub struct ConfigurationLibrary<S> {
    store: S,
    configurations: Vec<SavedConfiguration>,
}

impl<S: ConfigurationStore> ConfigurationLibrary<S> {
    /// Open a library, loading whatever the store holds.
    pub fn open(store: S) -> Self {
        let configurations = store.load();
        info!(count = configurations.len(), "Loaded saved configurations");
        Self {
            store,
            configurations,
        }
    }

    /// Insert or update by id. Updates refresh `updated_at`.
    pub fn save_configuration(
        &mut self,
        mut config: SavedConfiguration,
    ) -> Result<SavedConfiguration> {
        config.circuit.validate()?;

        let mut next = self.configurations.clone();
        match next.iter().position(|c| c.id == config.id) {
            Some(index) => {
                config.updated_at = Utc::now();
                debug!(id = %config.id, "Updating saved configuration");
                next[index] = config.clone();
            }
            None => {
                debug!(id = %config.id, "Adding saved configuration");
                next.push(config.clone());
            }
        }

        self.commit(next)?;
        Ok(config)
    }

    pub fn get(&self, id: &str) -> Option<&SavedConfiguration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if !self.configurations.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        let next = self
            .configurations
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    pub fn all(&self) -> &[SavedConfiguration] {
        &self.configurations
    }

    /// Case-insensitive search over name, description and tags.
    pub fn search(&self, query: &str) -> Vec<&SavedConfiguration> {
        let needle = query.to_lowercase();
        self.configurations
            .iter()
            .filter(|c| c.matches(&needle))
            .collect()
    }

    /// Pretty JSON for one configuration.
    pub fn export_configuration(&self, id: &str) -> Result<String> {
        let config = self
            .get(id)
            .ok_or_else(|| Error::ConfigurationNotFound(id.to_string()))?;
        Ok(serde_json::to_string_pretty(config)?)
    }

    /// Parse and store a configuration under a fresh id and timestamps.
    pub fn import_configuration(&mut self, json: &str) -> Result<SavedConfiguration> {
        let mut config: SavedConfiguration = serde_json::from_str(json)
            .map_err(|e| {
                debug!(error = %e, "Rejected configuration import");
                invalid_format()
            })?;
        config.circuit.validate().map_err(|_| invalid_format())?;

        let now = Utc::now();
        config.id = new_configuration_id();
        config.created_at = now;
        config.updated_at = now;

        info!(id = %config.id, name = %config.name, "Imported configuration");
        self.save_configuration(config)
    }

    /// Pretty JSON array of every configuration.
    pub fn export_all(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.configurations)?)
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.configurations.clear();
        info!("Cleared all saved configurations");
        Ok(())
    }

    pub fn statistics(&self) -> LibraryStatistics {
        let total = self.configurations.len();
        let mut qubits = 0usize;
        let mut gates: BTreeMap<String, usize> = BTreeMap::new();

        for config in &self.configurations {
            qubits += config.circuit.qubits;
            for gate in &config.circuit.gates {
                *gates.entry(gate.gate_id.clone()).or_insert(0) += 1;
            }
        }

        LibraryStatistics {
            total_configurations: total,
            total_circuits: total,
            average_qubits: if total > 0 {
                qubits as f64 / total as f64
            } else {
                0.0
            },
            most_used_gates: gates,
        }
    }

    /// Persist `next` and publish it only once the store accepted it.
    fn commit(&mut self, next: Vec<SavedConfiguration>) -> Result<()> {
        self.store.save(&next)?;
        self.configurations = next;
        Ok(())
    }
}

fn invalid_format() -> Error {
    ValidationError::Field {
        field: "configuration".into(),
        message: "Invalid configuration format".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use tempfile::TempDir;

    fn bell(name: &str) -> SavedConfiguration {
        let mut circuit = Circuit::new(2, name).unwrap();
        circuit.add_gate("h", vec![0], vec![]).unwrap();
        circuit.add_gate("cx", vec![1], vec![0]).unwrap();
        SavedConfiguration::new(name, circuit)
    }

    fn library() -> ConfigurationLibrary<MemoryStore> {
        ConfigurationLibrary::open(MemoryStore::default())
    }

    /// Store that accepts reads but rejects every write.
    struct ReadOnlyStore {
        seed: Vec<SavedConfiguration>,
    }

    impl ConfigurationStore for ReadOnlyStore {
        fn load(&self) -> Vec<SavedConfiguration> {
            self.seed.clone()
        }

        fn save(&self, _configurations: &[SavedConfiguration]) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn clear(&self) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_save_inserts_then_updates() {
        let mut lib = library();
        let config = bell("Bell");
        let saved = lib.save_configuration(config.clone()).unwrap();
        assert_eq!(saved.updated_at, config.updated_at);
        assert_eq!(lib.all().len(), 1);

        let mut edited = saved.clone();
        edited.name = "Bell pair".into();
        let updated = lib.save_configuration(edited).unwrap();
        assert_eq!(lib.all().len(), 1);
        assert_eq!(lib.get(&config.id).unwrap().name, "Bell pair");
        assert!(updated.updated_at >= saved.updated_at);
    }

    #[test]
    fn test_save_rejects_invalid_circuit() {
        let mut lib = library();
        let mut config = bell("bad");
        config.circuit.qubits = 1;
        assert!(lib.save_configuration(config).is_err());
        assert!(lib.all().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_library_unchanged() {
        let existing = bell("existing");
        let mut lib = ConfigurationLibrary::open(ReadOnlyStore {
            seed: vec![existing.clone()],
        });

        let err = lib.save_configuration(bell("new")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(lib.all().len(), 1);

        let mut renamed = existing.clone();
        renamed.name = "renamed".into();
        assert!(lib.save_configuration(renamed).is_err());
        assert_eq!(lib.get(&existing.id).unwrap().name, "existing");

        assert!(lib.delete(&existing.id).is_err());
        assert!(lib.get(&existing.id).is_some());

        assert!(lib.import_configuration(&serde_json::to_string(&existing).unwrap()).is_err());
        assert!(lib.clear_all().is_err());
        assert_eq!(lib.all(), [existing].as_slice());
    }

    #[test]
    fn test_delete() {
        let mut lib = library();
        let config = lib.save_configuration(bell("a")).unwrap();
        assert!(lib.delete(&config.id).unwrap());
        assert!(!lib.delete(&config.id).unwrap());
        assert!(lib.get(&config.id).is_none());
    }

    #[test]
    fn test_search() {
        let mut lib = library();
        let mut tagged = bell("Teleport");
        tagged.tags = vec!["Protocol".into()];
        lib.save_configuration(tagged).unwrap();
        lib.save_configuration(bell("Bell State")).unwrap();

        assert_eq!(lib.search("bell").len(), 1);
        assert_eq!(lib.search("PROTOCOL").len(), 1);
        assert_eq!(lib.search("").len(), 2);
        assert!(lib.search("grover").is_empty());
    }

    #[test]
    fn test_export_and_import() {
        let mut lib = library();
        let original = lib.save_configuration(bell("Bell")).unwrap();

        let json = lib.export_configuration(&original.id).unwrap();
        assert!(json.contains('\n'));

        let imported = lib.import_configuration(&json).unwrap();
        assert_ne!(imported.id, original.id);
        assert!(imported.id.starts_with("config_"));
        assert_eq!(imported.circuit.gates, original.circuit.gates);
        assert_eq!(lib.all().len(), 2);
    }

    #[test]
    fn test_export_unknown_id() {
        let lib = library();
        let err = lib.export_configuration("missing").unwrap_err();
        assert!(matches!(err, Error::ConfigurationNotFound(ref id) if id == "missing"));
    }

    #[test]
    fn test_import_malformed() {
        let mut lib = library();
        let err = lib.import_configuration("{\"name\": 3}").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration format"));
        assert!(lib.all().is_empty());
    }

    #[test]
    fn test_export_all_and_clear() {
        let mut lib = library();
        lib.save_configuration(bell("a")).unwrap();
        lib.save_configuration(bell("b")).unwrap();

        let all: Vec<SavedConfiguration> = serde_json::from_str(&lib.export_all().unwrap()).unwrap();
        assert_eq!(all.len(), 2);

        lib.clear_all().unwrap();
        assert!(lib.all().is_empty());
    }

    #[test]
    fn test_statistics() {
        let mut lib = library();
        assert_eq!(lib.statistics().average_qubits, 0.0);

        lib.save_configuration(bell("a")).unwrap();
        let mut wide = bell("b");
        wide.circuit.add_qubit();
        wide.circuit.add_qubit();
        lib.save_configuration(wide).unwrap();

        let stats = lib.statistics();
        assert_eq!(stats.total_configurations, 2);
        assert_eq!(stats.total_circuits, 2);
        assert_eq!(stats.average_qubits, 3.0);
        assert_eq!(stats.most_used_gates.get("h"), Some(&2));
        assert_eq!(stats.most_used_gates.get("cx"), Some(&2));
    }

    #[test]
    fn test_persists_through_file_store() {
        let dir = TempDir::new().unwrap();
        let id = {
            let mut lib = ConfigurationLibrary::open(JsonFileStore::new(dir.path()));
            lib.save_configuration(bell("kept")).unwrap().id
        };

        let reopened = ConfigurationLibrary::open(JsonFileStore::new(dir.path()));
        assert_eq!(reopened.get(&id).unwrap().name, "kept");
    }

    #[test]
    fn test_boxed_store() {
        let store: Box<dyn ConfigurationStore> = Box::new(MemoryStore::default());
        let mut lib = ConfigurationLibrary::open(store);
        lib.save_configuration(bell("boxed")).unwrap();
        assert_eq!(lib.all().len(), 1);
    }
}
