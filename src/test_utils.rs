// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test backends.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::r#trait::{
    BackendInfo, BackendType, CircuitBackend, HealthStatus, SimulationRequest, SimulationResult,
};
use crate::config::ResourceLimits;
use crate::error::BackendError;

/// Backend that puts every shot on the all-zeros state.
pub struct FixedBackend {
    pub name: String,
    pub backend_type: BackendType,
    pub limits: ResourceLimits,
}

impl FixedBackend {
    pub fn new(name: &str, backend_type: BackendType) -> Self {
        Self {
            name: name.to_string(),
            backend_type,
            limits: ResourceLimits::default(),
        }
    }

    pub fn shared(name: &str) -> Arc<dyn CircuitBackend> {
        Arc::new(Self::new(name, BackendType::Mock))
    }
}

#[async_trait]
impl CircuitBackend for FixedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        self.backend_type
    }

    async fn run(&self, request: SimulationRequest) -> Result<SimulationResult, BackendError> {
        let zeros = "0".repeat(request.circuit.qubits);
        let mut counts = BTreeMap::new();
        counts.insert(zeros.clone(), request.shots);
        let mut probabilities = BTreeMap::new();
        probabilities.insert(zeros, 1.0);
        Ok(SimulationResult {
            circuit_id: request.circuit.id,
            counts,
            probabilities,
            shots: request.shots,
            execution_time: 0.0,
            statevector: None,
            bloch_sphere: None,
        })
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        Ok(BackendInfo {
            name: self.name.clone(),
            backend_type: self.backend_type,
            supported_gates: vec!["x".to_string()],
            supports_state_vector: false,
            software_version: "1.0.0-fixed".to_string(),
            limits: self.limits.clone(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus::Healthy)
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}

/// Backend that always returns errors.
pub struct FailingBackend {
    pub name: String,
    pub limits: ResourceLimits,
}

impl FailingBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            limits: ResourceLimits::default(),
        }
    }
}

#[async_trait]
impl CircuitBackend for FailingBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Remote
    }

    async fn run(&self, _request: SimulationRequest) -> Result<SimulationResult, BackendError> {
        Err(BackendError::ExecutionFailed(
            "backend execution failure".to_string(),
        ))
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        Err(BackendError::Unavailable("backend unavailable".to_string()))
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Err(BackendError::Unavailable("backend unavailable".to_string()))
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}

/// Backend that reports degraded health.
pub struct DegradedBackend {
    pub name: String,
    pub limits: ResourceLimits,
}

impl DegradedBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            limits: ResourceLimits::default(),
        }
    }
}

#[async_trait]
impl CircuitBackend for DegradedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Remote
    }

    async fn run(&self, request: SimulationRequest) -> Result<SimulationResult, BackendError> {
        FixedBackend::new(&self.name, BackendType::Remote)
            .run(request)
            .await
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        Ok(BackendInfo {
            name: self.name.clone(),
            backend_type: BackendType::Remote,
            supported_gates: Vec::new(),
            supports_state_vector: false,
            software_version: "0.1.0-degraded".to_string(),
            limits: self.limits.clone(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus::Degraded)
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}
