// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static gate catalog.
//!
//! The catalog is fixed at compile time and never mutated. Lookups for ids
//! that are not in the catalog are not errors: callers either skip the
//! placement (export, simulation) or render it with [`UNKNOWN_GATE`].

use std::f64::consts::FRAC_1_SQRT_2;

use serde::Serialize;

/// Hadamard gate id.
pub const HADAMARD: &str = "h";
/// Pauli-X gate id.
pub const PAULI_X: &str = "x";
/// Pauli-Y gate id.
pub const PAULI_Y: &str = "y";
/// Pauli-Z gate id.
pub const PAULI_Z: &str = "z";
/// CNOT gate id.
pub const CNOT: &str = "cx";
/// Controlled-Z gate id.
pub const CZ: &str = "cz";
/// SWAP gate id.
pub const SWAP: &str = "swap";

/// Number of qubits a gate acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateArity {
    /// One qubit
    Single,
    /// Two or more qubits
    Multi,
}

/// Real-valued 2x2 matrix, row-major.
pub type Matrix2 = [[f64; 2]; 2];

/// Catalog entry for a named gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub arity: GateArity,
    pub symbol: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// Only present for single-qubit gates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Matrix2>,
}

impl GateDescriptor {
    /// Whether this is the placeholder returned for unresolved ids.
    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN_GATE.id
    }
}

/// Placeholder used to render a gate id that is not in the catalog.
pub static UNKNOWN_GATE: GateDescriptor = GateDescriptor {
    id: "unknown",
    name: "Unknown",
    arity: GateArity::Single,
    symbol: "?",
    color: "#6B7280",
    description: "Gate not present in the catalog",
    matrix: None,
};

static GATES: [GateDescriptor; 7] = [
    GateDescriptor {
        id: HADAMARD,
        name: "Hadamard",
        arity: GateArity::Single,
        symbol: "H",
        color: "#9333EA",
        description: "Creates superposition: (|0⟩ + |1⟩)/√2",
        matrix: Some([[FRAC_1_SQRT_2, FRAC_1_SQRT_2], [FRAC_1_SQRT_2, -FRAC_1_SQRT_2]]),
    },
    GateDescriptor {
        id: PAULI_X,
        name: "Pauli-X",
        arity: GateArity::Single,
        symbol: "X",
        color: "#F97316",
        description: "Quantum NOT: |0⟩ ↔ |1⟩",
        matrix: Some([[0.0, 1.0], [1.0, 0.0]]),
    },
    GateDescriptor {
        id: PAULI_Y,
        name: "Pauli-Y",
        arity: GateArity::Single,
        symbol: "Y",
        color: "#EC4899",
        description: "Y rotation: i|1⟩ when applied to |0⟩",
        // Real-valued form; the i phase is dropped.
        matrix: Some([[0.0, -1.0], [1.0, 0.0]]),
    },
    GateDescriptor {
        id: PAULI_Z,
        name: "Pauli-Z",
        arity: GateArity::Single,
        symbol: "Z",
        color: "#10B981",
        description: "Phase flip: |1⟩ → -|1⟩",
        matrix: Some([[1.0, 0.0], [0.0, -1.0]]),
    },
    GateDescriptor {
        id: CNOT,
        name: "CNOT",
        arity: GateArity::Multi,
        symbol: "CX",
        color: "#0EA5E9",
        description: "Controlled NOT: entanglement",
        matrix: None,
    },
    GateDescriptor {
        id: CZ,
        name: "CZ",
        arity: GateArity::Multi,
        symbol: "CZ",
        color: "#06B6D4",
        description: "Controlled Z",
        matrix: None,
    },
    GateDescriptor {
        id: SWAP,
        name: "SWAP",
        arity: GateArity::Multi,
        symbol: "⨉",
        color: "#8B5CF6",
        description: "Swaps the states of two qubits",
        matrix: None,
    },
];

/// All catalog entries, in display order.
pub fn list_gates() -> &'static [GateDescriptor] {
    &GATES
}

/// Look up a gate by id.
pub fn get_gate(id: &str) -> Option<&'static GateDescriptor> {
    GATES.iter().find(|g| g.id == id)
}

/// Look up a gate by id, falling back to [`UNKNOWN_GATE`].
pub fn describe(id: &str) -> &'static GateDescriptor {
    get_gate(id).unwrap_or(&UNKNOWN_GATE)
}

/// Whether `id` names a catalog gate.
pub fn is_known(id: &str) -> bool {
    get_gate(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let ids: HashSet<_> = list_gates().iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), list_gates().len());
    }

    #[test]
    fn test_get_gate() {
        let h = get_gate("h").unwrap();
        assert_eq!(h.name, "Hadamard");
        assert_eq!(h.symbol, "H");
        assert_eq!(h.arity, GateArity::Single);
        assert!(get_gate("toffoli").is_none());
    }

    #[test]
    fn test_describe_unknown_falls_back() {
        let g = describe("toffoli");
        assert!(g.is_unknown());
        assert_eq!(g.color, "#6B7280");
        assert!(!describe("cx").is_unknown());
    }

    #[test]
    fn test_only_single_qubit_gates_carry_matrices() {
        for gate in list_gates() {
            match gate.arity {
                GateArity::Single => assert!(gate.matrix.is_some(), "{} lacks matrix", gate.id),
                GateArity::Multi => assert!(gate.matrix.is_none(), "{} has matrix", gate.id),
            }
        }
    }

    #[test]
    fn test_matrices_are_orthogonal() {
        // Real unitary == orthogonal: M^T M = I
        for gate in list_gates() {
            let Some(m) = gate.matrix else { continue };
            for i in 0..2 {
                for j in 0..2 {
                    let dot: f64 = (0..2).map(|k| m[k][i] * m[k][j]).sum();
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!((dot - expected).abs() < 1e-12, "{} not orthogonal", gate.id);
                }
            }
        }
    }

    #[test]
    fn test_descriptor_serializes_type_field() {
        let json = serde_json::to_value(get_gate("swap").unwrap()).unwrap();
        assert_eq!(json["type"], "multi");
        assert!(json.get("matrix").is_none());
    }
}
