// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Circuit and gate placement records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::CircuitError;

/// One application of a named gate at a position in the circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatePlacement {
    /// Catalog id; may not resolve.
    pub gate_id: String,
    pub qubit_targets: Vec<usize>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub control_qubits: Vec<usize>,
    /// Dense 0-based index matching the placement's order.
    pub position: usize,
    /// Gate parameters (rotation angles etc.), carried as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, f64>>,
}

impl GatePlacement {
    /// All qubit indices touched by this placement, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = usize> + '_ {
        self.control_qubits
            .iter()
            .chain(self.qubit_targets.iter())
            .copied()
    }

    /// Whether the placement only references qubits below `qubits`.
    pub fn fits(&self, qubits: usize) -> bool {
        self.qubits().all(|q| q < qubits)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<usize>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A quantum circuit as edited by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Number of qubits, at least 1.
    pub qubits: usize,
    #[serde(default)]
    pub gates: Vec<GatePlacement>,
    /// Measured qubit indices.
    #[serde(default)]
    pub measurements: Vec<usize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Circuit {
    /// Create an empty circuit measuring every qubit.
    pub fn new(qubits: usize, name: impl Into<String>) -> Result<Self, CircuitError> {
        if qubits == 0 {
            return Err(CircuitError::InvalidQubitCount(qubits));
        }
        Ok(Self::empty(qubits, name))
    }

    /// Build an empty circuit; `qubits` must already be known to be non-zero.
    pub(crate) fn empty(qubits: usize, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("circuit_{}", Uuid::new_v4().simple()),
            name: name.into(),
            description: String::new(),
            qubits,
            gates: Vec::new(),
            measurements: (0..qubits).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a gate placement and return its position.
    ///
    /// The gate id is not checked against the catalog. Targets must be
    /// non-empty and every index must be in range; on error the circuit is
    /// left untouched.
    pub fn add_gate(
        &mut self,
        gate_id: impl Into<String>,
        targets: Vec<usize>,
        controls: Vec<usize>,
    ) -> Result<usize, CircuitError> {
        let gate_id = gate_id.into();
        if targets.is_empty() {
            return Err(CircuitError::EmptyTargets { gate_id });
        }
        if let Some(&index) = controls.iter().chain(&targets).find(|&&q| q >= self.qubits) {
            return Err(CircuitError::QubitOutOfRange {
                index,
                qubits: self.qubits,
            });
        }

        let position = self.gates.len();
        self.gates.push(GatePlacement {
            gate_id,
            qubit_targets: targets,
            control_qubits: controls,
            position,
            parameters: None,
        });
        self.touch();
        Ok(position)
    }

    /// Remove the placement at `position`. Returns false (and changes
    /// nothing) when no placement has that position.
    pub fn remove_gate(&mut self, position: usize) -> bool {
        let before = self.gates.len();
        self.gates.retain(|g| g.position != position);
        if self.gates.len() == before {
            return false;
        }
        self.renumber();
        self.touch();
        true
    }

    /// Add one qubit; it is measured by default.
    pub fn add_qubit(&mut self) {
        self.qubits += 1;
        self.measurements.push(self.qubits - 1);
        self.touch();
    }

    /// Remove the highest qubit. A no-op on a single-qubit circuit.
    ///
    /// Measurements of the removed index are dropped, and so is every
    /// placement that touches it through any target or control.
    pub fn remove_qubit(&mut self) -> bool {
        if self.qubits <= 1 {
            return false;
        }
        self.qubits -= 1;
        let qubits = self.qubits;
        self.measurements.retain(|&m| m < qubits);
        self.gates.retain(|g| g.fits(qubits));
        self.renumber();
        self.touch();
        true
    }

    /// Drop all placements; qubits and measurements stay.
    pub fn clear(&mut self) {
        self.gates.clear();
        self.touch();
    }

    /// Whether any placement uses `gate_id`.
    pub fn contains_gate(&self, gate_id: &str) -> bool {
        self.gates.iter().any(|g| g.gate_id == gate_id)
    }

    /// Check every invariant of a circuit received from outside.
    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.qubits == 0 {
            return Err(CircuitError::InvalidQubitCount(0));
        }
        for gate in &self.gates {
            if gate.qubit_targets.is_empty() {
                return Err(CircuitError::EmptyTargets {
                    gate_id: gate.gate_id.clone(),
                });
            }
            if let Some(index) = gate.qubits().find(|&q| q >= self.qubits) {
                return Err(CircuitError::QubitOutOfRange {
                    index,
                    qubits: self.qubits,
                });
            }
        }
        if let Some(&index) = self.measurements.iter().find(|&&m| m >= self.qubits) {
            return Err(CircuitError::QubitOutOfRange {
                index,
                qubits: self.qubits,
            });
        }
        Ok(())
    }

    /// Re-derive dense positions from sequence order.
    pub fn renumber(&mut self) {
        for (idx, gate) in self.gates.iter_mut().enumerate() {
            gate.position = idx;
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
