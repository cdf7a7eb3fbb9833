// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-process mock backend.
//!
//! Wraps the heuristic engine in [`super::distribution`] behind the
//! [`CircuitBackend`] trait. Results arrive after a fixed artificial delay
//! standing in for the latency of a real numerical backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::distribution;
use super::r#trait::{
    BackendInfo, BackendType, CircuitBackend, HealthStatus, SimulationRequest, SimulationResult,
};
use crate::circuit::list_gates;
use crate::config::{ResourceLimits, SimulationConfig};
use crate::error::BackendError;
use crate::validation::validate_simulation_request;

/// Registry name of the mock backend.
pub const MOCK_BACKEND_NAME: &str = "mock";

/// Heuristic backend with artificial latency.
#[derive(Debug, Clone)]
pub struct MockBackend {
    name: String,
    latency: Duration,
    limits: ResourceLimits,
}

impl MockBackend {
    /// Create a mock backend.
    pub fn new(latency: Duration, limits: ResourceLimits) -> Self {
        Self {
            name: MOCK_BACKEND_NAME.to_string(),
            latency,
            limits,
        }
    }

    /// Create a mock backend from simulation settings.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            Duration::from_millis(config.latency_ms),
            config.limits.clone(),
        )
    }

    /// Mock backend that answers immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, ResourceLimits::default())
    }

    /// Configured artificial latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

#[async_trait]
impl CircuitBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Mock
    }

    #[instrument(skip(self, request), fields(circuit_id = %request.circuit.id, shots = request.shots))]
    async fn run(&self, request: SimulationRequest) -> Result<SimulationResult, BackendError> {
        validate_simulation_request(request.shots, request.circuit.qubits, &self.limits)
            .map_err(|e| BackendError::InvalidRequest(e.to_string()))?;

        let started = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let dist = distribution::run(&request.circuit, request.shots)
            .map_err(|e| BackendError::InvalidRequest(e.to_string()))?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        debug!(
            outcomes = dist.counts.len(),
            elapsed_ms, "Mock run complete"
        );

        Ok(SimulationResult::from_distribution(
            request.circuit.id,
            dist,
            elapsed_ms,
        ))
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        Ok(BackendInfo {
            name: self.name.clone(),
            backend_type: BackendType::Mock,
            supported_gates: list_gates().iter().map(|g| g.id.to_string()).collect(),
            supports_state_vector: false,
            software_version: env!("CARGO_PKG_VERSION").to_string(),
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
