// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for simulation requests.

use crate::config::ResourceLimits;
use crate::error::{Result, ValidationError};

/// Validate the parameters of a simulation run.
pub fn validate_simulation_request(
    shots: u32,
    num_qubits: usize,
    limits: &ResourceLimits,
) -> Result<()> {
    if shots == 0 {
        return Err(ValidationError::Field {
            field: "shots".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    if shots > limits.max_shots {
        return Err(ValidationError::ResourceLimit {
            resource: "shots".into(),
            limit: limits.max_shots as u64,
            requested: shots as u64,
        }
        .into());
    }

    if num_qubits == 0 {
        return Err(ValidationError::Field {
            field: "qubits".into(),
            message: "must be at least 1".into(),
        }
        .into());
    }

    if num_qubits > limits.max_qubits as usize {
        return Err(ValidationError::ResourceLimit {
            resource: "qubits".into(),
            limit: limits.max_qubits as u64,
            requested: num_qubits as u64,
        }
        .into());
    }

    Ok(())
}

/// Validate a Bloch angle pair.
pub fn validate_bloch_angles(theta: f64, phi: f64) -> Result<()> {
    for (field, val) in [("theta", theta), ("phi", phi)] {
        if val.is_nan() {
            return Err(ValidationError::Field {
                field: field.into(),
                message: "is NaN".into(),
            }
            .into());
        }
        if val.is_infinite() {
            return Err(ValidationError::Field {
                field: field.into(),
                message: "is infinite".into(),
            }
            .into());
        }
    }
    Ok(())
}
