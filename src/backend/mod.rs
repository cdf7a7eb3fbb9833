// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Circuit execution backends.
//!
//! This module provides the [`CircuitBackend`] trait and its implementations:
//!
//! - [`mock::MockBackend`]: in-process heuristic engine with artificial latency
//! - `remote::RemoteBackend`: external simulation service (requires `remote` feature)

pub mod distribution;
pub mod mock;
#[cfg(feature = "remote")]
pub mod remote;
pub mod registry;
pub mod r#trait;

pub use distribution::{DistributionShape, OutcomeDistribution};
pub use mock::MockBackend;
pub use r#trait::{
    BackendInfo, BackendType, CircuitBackend, ComplexNumber, HealthStatus, SimulationRequest,
    SimulationResult,
};
pub use registry::BackendRegistry;
