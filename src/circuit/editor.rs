// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Session-scoped circuit editor.
//!
//! Holds the single "current" circuit of an editing session. Every operation
//! runs against a copy and the copy replaces the current circuit only when
//! the operation succeeds, so readers never observe a half-applied edit.

use tracing::debug;

use super::types::Circuit;
use crate::error::CircuitError;

/// Default name for new circuits.
pub const DEFAULT_CIRCUIT_NAME: &str = "New Circuit";

/// Editor holding the current circuit.
#[derive(Debug, Clone)]
pub struct CircuitEditor {
    current: Circuit,
}

impl Default for CircuitEditor {
    fn default() -> Self {
        let circuit =
            Circuit::empty(2, DEFAULT_CIRCUIT_NAME).with_description("Empty quantum circuit");
        Self { current: circuit }
    }
}

impl CircuitEditor {
    /// Start a session on an existing circuit.
    pub fn with_circuit(mut circuit: Circuit) -> Result<Self, CircuitError> {
        circuit.validate()?;
        circuit.renumber();
        Ok(Self { current: circuit })
    }

    /// The current circuit.
    pub fn current(&self) -> &Circuit {
        &self.current
    }

    /// An owned snapshot of the current circuit.
    pub fn snapshot(&self) -> Circuit {
        self.current.clone()
    }

    /// Start over with a fresh empty circuit.
    pub fn create(
        &mut self,
        qubits: usize,
        name: Option<&str>,
    ) -> Result<&Circuit, CircuitError> {
        let circuit = Circuit::new(qubits, name.unwrap_or(DEFAULT_CIRCUIT_NAME))?;
        debug!(circuit_id = %circuit.id, qubits, "Created circuit");
        self.current = circuit;
        Ok(&self.current)
    }

    /// Replace the current circuit wholesale.
    pub fn replace(&mut self, mut circuit: Circuit) -> Result<&Circuit, CircuitError> {
        circuit.validate()?;
        circuit.renumber();
        circuit.touch();
        self.current = circuit;
        Ok(&self.current)
    }

    pub fn add_gate(
        &mut self,
        gate_id: &str,
        targets: Vec<usize>,
        controls: Vec<usize>,
    ) -> Result<&Circuit, CircuitError> {
        self.apply(|c| c.add_gate(gate_id, targets, controls).map(|_| ()))
    }

    pub fn remove_gate(&mut self, position: usize) -> &Circuit {
        self.apply_infallible(|c| {
            c.remove_gate(position);
        })
    }

    pub fn add_qubit(&mut self) -> &Circuit {
        self.apply_infallible(Circuit::add_qubit)
    }

    pub fn remove_qubit(&mut self) -> &Circuit {
        self.apply_infallible(|c| {
            c.remove_qubit();
        })
    }

    pub fn clear(&mut self) -> &Circuit {
        self.apply_infallible(Circuit::clear)
    }

    fn apply<F>(&mut self, op: F) -> Result<&Circuit, CircuitError>
    where
        F: FnOnce(&mut Circuit) -> Result<(), CircuitError>,
    {
        let mut next = self.current.clone();
        op(&mut next)?;
        self.current = next;
        Ok(&self.current)
    }

    fn apply_infallible<F>(&mut self, op: F) -> &Circuit
    where
        F: FnOnce(&mut Circuit),
    {
        let mut next = self.current.clone();
        op(&mut next);
        self.current = next;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let editor = CircuitEditor::default();
        let c = editor.current();
        assert_eq!(c.qubits, 2);
        assert_eq!(c.name, DEFAULT_CIRCUIT_NAME);
        assert_eq!(c.measurements, vec![0, 1]);
    }

    #[test]
    fn test_create_replaces_current() {
        let mut editor = CircuitEditor::default();
        let old_id = editor.current().id.clone();
        let c = editor.create(4, Some("GHZ")).unwrap();
        assert_eq!(c.qubits, 4);
        assert_eq!(c.name, "GHZ");
        assert_ne!(editor.current().id, old_id);
    }

    #[test]
    fn test_failed_create_keeps_current() {
        let mut editor = CircuitEditor::default();
        let before = editor.snapshot();
        assert!(editor.create(0, None).is_err());
        assert_eq!(editor.current(), &before);
    }

    #[test]
    fn test_failed_add_gate_keeps_current() {
        let mut editor = CircuitEditor::default();
        editor.add_gate("h", vec![0], vec![]).unwrap();
        let before = editor.snapshot();
        assert!(editor.add_gate("x", vec![9], vec![]).is_err());
        assert_eq!(editor.current(), &before);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut editor = CircuitEditor::default();
        let snap = editor.snapshot();
        editor.add_gate("h", vec![0], vec![]).unwrap();
        assert!(snap.gates.is_empty());
        assert_eq!(editor.current().gates.len(), 1);
    }

    #[test]
    fn test_edit_sequence() {
        let mut editor = CircuitEditor::default();
        editor.add_gate("h", vec![0], vec![]).unwrap();
        editor.add_gate("cx", vec![1], vec![0]).unwrap();
        editor.add_qubit();
        editor.add_gate("x", vec![2], vec![]).unwrap();
        assert_eq!(editor.current().gates.len(), 3);

        editor.remove_qubit();
        assert_eq!(editor.current().gates.len(), 2);

        editor.remove_gate(0);
        assert_eq!(editor.current().gates[0].gate_id, "cx");
        assert_eq!(editor.current().gates[0].position, 0);

        editor.clear();
        assert!(editor.current().gates.is_empty());
        assert_eq!(editor.current().qubits, 2);
    }

    #[test]
    fn test_replace_validates_and_renumbers() {
        let mut editor = CircuitEditor::default();
        let mut c = Circuit::new(2, "imported").unwrap();
        c.add_gate("h", vec![0], vec![]).unwrap();
        c.add_gate("x", vec![1], vec![]).unwrap();
        c.gates[0].position = 5;
        c.gates[1].position = 9;
        editor.replace(c).unwrap();
        let positions: Vec<_> = editor.current().gates.iter().map(|g| g.position).collect();
        assert_eq!(positions, vec![0, 1]);

        let mut bad = Circuit::new(1, "bad").unwrap();
        bad.qubits = 0;
        assert!(editor.replace(bad).is_err());
        assert_eq!(editor.current().name, "imported");
    }
}
