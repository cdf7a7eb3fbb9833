// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend registry.
//!
//! Holds every backend a run can be routed to, keyed by name. The first
//! backend registered becomes the default unless another is chosen with
//! [`BackendRegistry::set_default`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::{BackendType, CircuitBackend};
use crate::config::ResourceLimits;
use crate::error::{BackendError, Error, Result};

/// Thread-safe set of named backends.
///
/// # Example
///
/// ```ignore
/// use quantum_docs::backend::{BackendRegistry, MockBackend};
///
/// let registry = BackendRegistry::default();
/// registry.register(Arc::new(MockBackend::instant()));
/// let backend = registry.get_or_default(None)?;
/// ```
pub struct BackendRegistry {
    backends: RwLock<HashMap<String, Arc<dyn CircuitBackend>>>,
    default_backend: RwLock<Option<String>>,
    limits: ResourceLimits,
}

impl BackendRegistry {
    /// Create a registry with specific resource limits.
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            backends: RwLock::new(HashMap::new()),
            default_backend: RwLock::new(None),
            limits,
        }
    }

    /// Register a backend, replacing any backend of the same name.
    pub fn register(&self, backend: Arc<dyn CircuitBackend>) {
        let name = backend.name().to_string();
        info!(backend = %name, kind = %backend.backend_type(), "Registering backend");

        self.backends.write().insert(name.clone(), backend);

        let mut default = self.default_backend.write();
        if default.is_none() {
            debug!(backend = %name, "Setting as default backend");
            *default = Some(name);
        }
    }

    /// Set the default backend.
    pub fn set_default(&self, name: &str) -> Result<()> {
        if !self.backends.read().contains_key(name) {
            return Err(Error::Backend(BackendError::NotFound(name.to_string())));
        }

        *self.default_backend.write() = Some(name.to_string());
        info!(backend = %name, "Set as default backend");
        Ok(())
    }

    /// Get a backend by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn CircuitBackend>> {
        self.backends
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Backend(BackendError::NotFound(name.to_string())))
    }

    /// Get the default backend.
    pub fn get_default(&self) -> Result<Arc<dyn CircuitBackend>> {
        let default = self.default_backend.read().clone();
        match default {
            Some(name) => self.get(&name),
            None => Err(Error::Backend(BackendError::NotFound(
                "No default backend configured".to_string(),
            ))),
        }
    }

    /// Get a backend by name, or the default if name is None.
    pub fn get_or_default(&self, name: Option<&str>) -> Result<Arc<dyn CircuitBackend>> {
        match name {
            Some(n) => self.get(n),
            None => self.get_default(),
        }
    }

    /// Registered backend names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Registered backends with their types, sorted by name.
    pub fn list_with_types(&self) -> Vec<(String, BackendType)> {
        let mut entries: Vec<(String, BackendType)> = self
            .backends
            .read()
            .iter()
            .map(|(name, backend)| (name.clone(), backend.backend_type()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.backends.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unregister a backend. Clears the default if it pointed at `name`.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn CircuitBackend>> {
        let removed = self.backends.write().remove(name);

        if removed.is_some() {
            info!(backend = %name, "Unregistered backend");

            let mut default = self.default_backend.write();
            if default.as_deref() == Some(name) {
                warn!(backend = %name, "Unregistered default backend");
                *default = None;
            }
        }

        removed
    }

    /// Global resource limits.
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn default_backend_name(&self) -> Option<String> {
        self.default_backend.read().clone()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_limits(ResourceLimits::default())
    }
}
