// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Circuit backend trait definition.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::bloch::BlochSphereData;
use crate::circuit::Circuit;
use crate::config::ResourceLimits;
use crate::error::BackendError;

use super::distribution::OutcomeDistribution;

/// Kind of backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Heuristic in-process stand-in
    Mock,
    /// External numerical backend reached over HTTP
    Remote,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Mock => write!(f, "mock"),
            BackendType::Remote => write!(f, "remote"),
        }
    }
}

/// Health status of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational
    Healthy,
    /// Backend is operational but with degraded performance
    Degraded,
    /// Backend is not available
    Unavailable,
}

/// Complex amplitude on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexNumber {
    pub real: f64,
    pub imaginary: f64,
}

/// Result of running a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub circuit_id: String,
    pub counts: BTreeMap<String, u32>,
    pub probabilities: BTreeMap<String, f64>,
    pub shots: u32,
    /// Wall-clock execution time in milliseconds
    pub execution_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statevector: Option<Vec<ComplexNumber>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloch_sphere: Option<BlochSphereData>,
}

impl SimulationResult {
    /// Build a result from a distribution.
    pub fn from_distribution(
        circuit_id: impl Into<String>,
        distribution: OutcomeDistribution,
        execution_time: f64,
    ) -> Self {
        let probabilities = distribution.probabilities();
        Self {
            circuit_id: circuit_id.into(),
            counts: distribution.counts,
            probabilities,
            shots: distribution.shots,
            execution_time,
            statevector: None,
            bloch_sphere: None,
        }
    }
}

/// Static information about a backend.
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    /// Backend name
    pub name: String,
    /// Type of backend
    pub backend_type: BackendType,
    /// Gate ids the backend understands
    pub supported_gates: Vec<String>,
    /// Whether state vector output is supported
    pub supports_state_vector: bool,
    /// Software version
    pub software_version: String,
    /// Resource limits
    #[serde(skip)]
    pub limits: ResourceLimits,
}

/// Request to run a circuit.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    /// Circuit snapshot
    pub circuit: Circuit,
    /// Number of shots
    pub shots: u32,
}

/// The trait that all circuit backends implement.
#[async_trait]
pub trait CircuitBackend: Send + Sync {
    /// Get the backend name.
    fn name(&self) -> &str;

    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Run a circuit and return outcome counts.
    async fn run(&self, request: SimulationRequest) -> Result<SimulationResult, BackendError>;

    /// Get backend information.
    async fn info(&self) -> Result<BackendInfo, BackendError>;

    /// Check backend health.
    async fn health_check(&self) -> Result<HealthStatus, BackendError>;

    /// Get resource limits.
    fn resource_limits(&self) -> &ResourceLimits;
}
