// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Remote numerical backend.
//!
//! Sends the Qiskit rendering of a circuit to an external simulation service
//! and returns the counts it reports.
//!
//! # Requirements
//!
//! - Base URL (via config or `QDOCS_REMOTE_URL`)
//! - Optional bearer token (via config or `QDOCS_REMOTE_TOKEN`)
//!
//! # Usage
//!
//! ```ignore
//! use quantum_docs::backend::remote::RemoteBackend;
//! use quantum_docs::config::{RemoteConfig, ResourceLimits};
//!
//! let backend = RemoteBackend::new(&RemoteConfig::default(), ResourceLimits::default())?;
//! ```

pub mod client;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};

use self::client::{ReqwestClient, RemoteSimulateRequest, SimulationClient};
use super::r#trait::{
    BackendInfo, BackendType, CircuitBackend, HealthStatus, SimulationRequest, SimulationResult,
};
use crate::circuit::list_gates;
use crate::config::{RemoteConfig, ResourceLimits};
use crate::error::BackendError;
use crate::export::to_qiskit;
use crate::validation::validate_simulation_request;

/// Registry name of the remote backend.
pub const REMOTE_BACKEND_NAME: &str = "remote";

/// Backend that delegates to an external simulation service.
pub struct RemoteBackend {
    name: String,
    client: Arc<dyn SimulationClient>,
    limits: ResourceLimits,
}

impl RemoteBackend {
    /// Create a remote backend with the production HTTP client.
    pub fn new(config: &RemoteConfig, limits: ResourceLimits) -> Result<Self, BackendError> {
        let client = ReqwestClient::from_config(config)?;
        info!(base_url = %config.base_url, "Initializing remote backend");
        Ok(Self::with_client(Arc::new(client), limits))
    }

    /// Create a remote backend around any client.
    pub fn with_client(client: Arc<dyn SimulationClient>, limits: ResourceLimits) -> Self {
        Self {
            name: REMOTE_BACKEND_NAME.to_string(),
            client,
            limits,
        }
    }
}

#[async_trait]
impl CircuitBackend for RemoteBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Remote
    }

    #[instrument(skip(self, request), fields(circuit_id = %request.circuit.id, shots = request.shots))]
    async fn run(&self, request: SimulationRequest) -> Result<SimulationResult, BackendError> {
        validate_simulation_request(request.shots, request.circuit.qubits, &self.limits)
            .map_err(|e| BackendError::InvalidRequest(e.to_string()))?;

        let payload = RemoteSimulateRequest {
            code: to_qiskit(&request.circuit),
            shots: request.shots,
        };

        let started = Instant::now();
        let response = self.client.simulate(&payload).await?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let total: u64 = response.counts.values().map(|&c| c as u64).sum();
        if total == 0 {
            return Err(BackendError::ExecutionFailed(
                "Remote backend returned no counts".to_string(),
            ));
        }
        if total != request.shots as u64 {
            warn!(
                requested = request.shots,
                reported = total,
                "Remote shot total differs from request"
            );
        }

        let probabilities = response.probabilities.unwrap_or_else(|| {
            response
                .counts
                .iter()
                .map(|(state, &count)| (state.clone(), count as f64 / total as f64))
                .collect()
        });

        debug!(outcomes = response.counts.len(), elapsed_ms, "Remote run complete");

        Ok(SimulationResult {
            circuit_id: request.circuit.id,
            counts: response.counts,
            probabilities,
            shots: request.shots,
            execution_time: elapsed_ms,
            statevector: response.statevector,
            bloch_sphere: None,
        })
    }

    async fn info(&self) -> Result<BackendInfo, BackendError> {
        Ok(BackendInfo {
            name: self.name.clone(),
            backend_type: BackendType::Remote,
            supported_gates: list_gates().iter().map(|g| g.id.to_string()).collect(),
            supports_state_vector: true,
            software_version: "qiskit".to_string(),
            limits: self.limits.clone(),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, BackendError> {
        match self.client.health_check().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => {
                warn!("Remote health check returned non-success");
                Ok(HealthStatus::Degraded)
            }
            Err(e) => {
                error!(error = %e, "Remote health check failed");
                Ok(HealthStatus::Unavailable)
            }
        }
    }

    fn resource_limits(&self) -> &ResourceLimits {
        &self.limits
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use parking_lot::Mutex;

    use super::client::RemoteSimulateResponse;
    use super::*;
    use crate::circuit::Circuit;

    /// Records submitted programs and answers with fixed counts.
    struct FakeClient {
        counts: BTreeMap<String, u32>,
        healthy: Option<bool>,
        submitted: Mutex<Vec<RemoteSimulateRequest>>,
    }

    impl FakeClient {
        fn new(counts: &[(&str, u32)], healthy: Option<bool>) -> Arc<Self> {
            Arc::new(Self {
                counts: counts.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
                healthy,
                submitted: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SimulationClient for FakeClient {
        async fn simulate(
            &self,
            request: &RemoteSimulateRequest,
        ) -> Result<RemoteSimulateResponse, BackendError> {
            self.submitted.lock().push(request.clone());
            Ok(RemoteSimulateResponse {
                counts: self.counts.clone(),
                probabilities: None,
                statevector: None,
            })
        }

        async fn health_check(&self) -> Result<bool, BackendError> {
            self.healthy
                .ok_or_else(|| BackendError::Http("connection refused".to_string()))
        }
    }

    fn bell() -> Circuit {
        let mut c = Circuit::new(2, "Bell").unwrap();
        c.add_gate("h", vec![0], vec![]).unwrap();
        c.add_gate("cx", vec![1], vec![0]).unwrap();
        c
    }

    #[tokio::test]
    async fn test_run_sends_qiskit_program() {
        let fake = FakeClient::new(&[("00", 512), ("11", 512)], Some(true));
        let backend = RemoteBackend::with_client(fake.clone(), ResourceLimits::default());

        let result = backend
            .run(SimulationRequest {
                circuit: bell(),
                shots: 1024,
            })
            .await
            .unwrap();

        assert_eq!(result.counts.get("11"), Some(&512));
        assert_eq!(result.probabilities.get("00"), Some(&0.5));

        let submitted = fake.submitted.lock();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].shots, 1024);
        assert!(submitted[0].code.contains("qc.h(0)"));
        assert!(submitted[0].code.contains("qc.cx(0, 1)"));
    }

    #[tokio::test]
    async fn test_run_rejects_empty_counts() {
        let fake = FakeClient::new(&[], Some(true));
        let backend = RemoteBackend::with_client(fake, ResourceLimits::default());
        let err = backend
            .run(SimulationRequest {
                circuit: bell(),
                shots: 10,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_run_validates_before_sending() {
        let fake = FakeClient::new(&[("00", 1)], Some(true));
        let backend = RemoteBackend::with_client(fake.clone(), ResourceLimits::default());
        let result = backend
            .run(SimulationRequest {
                circuit: bell(),
                shots: 0,
            })
            .await;
        assert!(result.is_err());
        assert!(fake.submitted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_health_mapping() {
        let backend = |healthy| {
            RemoteBackend::with_client(FakeClient::new(&[], healthy), ResourceLimits::default())
        };

        let healthy = backend(Some(true));
        let degraded = backend(Some(false));
        let down = backend(None);

        assert_eq!(healthy.health_check().await.unwrap(), HealthStatus::Healthy);
        assert_eq!(degraded.health_check().await.unwrap(), HealthStatus::Degraded);
        assert_eq!(down.health_check().await.unwrap(), HealthStatus::Unavailable);
    }

    #[test]
    fn test_new_from_default_config() {
        let backend = RemoteBackend::new(&RemoteConfig::default(), ResourceLimits::default()).unwrap();
        assert_eq!(backend.name(), REMOTE_BACKEND_NAME);
        assert_eq!(backend.backend_type(), BackendType::Remote);
    }
}
