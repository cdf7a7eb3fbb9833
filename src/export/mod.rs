// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Circuit exporters.
//!
//! Renders circuits as Qiskit program text and as the JSON wire form.

use std::fmt::Write as _;

use crate::circuit::{catalog, Circuit, GatePlacement};
use crate::error::Result;
use crate::storage::SavedConfiguration;

const QISKIT_IMPORT: &str = "from qiskit import QuantumCircuit\n\n";

/// Render `circuit` as a Qiskit program.
///
/// Placements with ids outside the gate catalog are skipped. The final
/// statement measures every qubit.
pub fn to_qiskit(circuit: &Circuit) -> String {
    let n = circuit.qubits;
    let mut code = String::from(QISKIT_IMPORT);
    let _ = write!(code, "# {}\nqc = QuantumCircuit({n}, {n})\n\n", circuit.name);
    write_body(
        &mut code,
        circuit.gates.iter().filter(|g| catalog::is_known(&g.gate_id)),
        n,
    );
    code
}

/// Render a saved configuration as a commented Qiskit program.
///
/// Unlike [`to_qiskit`], every placement is emitted as-is.
pub fn configuration_to_python(config: &SavedConfiguration) -> String {
    let n = config.circuit.qubits;
    let mut code = String::new();
    let _ = write!(code, "# {}\n# {}\n\n", config.name, config.description);
    code.push_str(QISKIT_IMPORT);
    let _ = write!(code, "qc = QuantumCircuit({n}, {n})\n\n");
    write_body(&mut code, config.circuit.gates.iter(), n);
    code
}

fn write_body<'a>(code: &mut String, gates: impl Iterator<Item = &'a GatePlacement>, n: usize) {
    for gate in gates {
        let _ = match (gate.control_qubits.first(), gate.qubit_targets.first()) {
            (Some(control), Some(target)) => {
                writeln!(code, "qc.{}({control}, {target})", gate.gate_id)
            }
            _ => writeln!(code, "qc.{}({})", gate.gate_id, join(&gate.qubit_targets)),
        };
    }
    let _ = writeln!(code, "\nqc.measure(range({n}), range({n}))");
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pretty-printed JSON wire form of a circuit.
pub fn to_json(circuit: &Circuit) -> Result<String> {
    Ok(serde_json::to_string_pretty(circuit)?)
}

/// Parse a circuit from its JSON wire form and check its invariants.
pub fn from_json(text: &str) -> Result<Circuit> {
    let mut circuit: Circuit = serde_json::from_str(text)?;
    circuit.validate()?;
    circuit.renumber();
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell() -> Circuit {
        let mut c = Circuit::new(2, "Bell State").unwrap();
        c.add_gate("h", vec![0], vec![]).unwrap();
        c.add_gate("cx", vec![1], vec![0]).unwrap();
        c
    }

    #[test]
    fn test_qiskit_bell() {
        let expected = "from qiskit import QuantumCircuit\n\
                        \n\
                        # Bell State\n\
                        qc = QuantumCircuit(2, 2)\n\
                        \n\
                        qc.h(0)\n\
                        qc.cx(0, 1)\n\
                        \n\
                        qc.measure(range(2), range(2))\n";
        assert_eq!(to_qiskit(&bell()), expected);
    }

    #[test]
    fn test_qiskit_empty_circuit() {
        let code = to_qiskit(&Circuit::new(2, "Empty").unwrap());
        assert_eq!(code.matches("qc.measure(").count(), 1);
        assert_eq!(code.matches("qc.").count(), 1);
    }

    #[test]
    fn test_qiskit_skips_unknown_and_joins_targets() {
        let mut c = Circuit::new(3, "mixed").unwrap();
        c.add_gate("mystery", vec![0], vec![]).unwrap();
        c.add_gate("swap", vec![0, 2], vec![]).unwrap();
        let code = to_qiskit(&c);
        assert!(!code.contains("mystery"));
        assert!(code.contains("qc.swap(0, 2)\n"));
        assert!(code.ends_with("qc.measure(range(3), range(3))\n"));
    }

    #[test]
    fn test_qiskit_uses_first_control_and_target() {
        let mut c = Circuit::new(3, "multi").unwrap();
        c.add_gate("cx", vec![2, 1], vec![0, 1]).unwrap();
        assert!(to_qiskit(&c).contains("qc.cx(0, 2)\n"));
    }

    #[test]
    fn test_configuration_to_python() {
        let mut c = bell();
        c.add_gate("custom", vec![1], vec![]).unwrap();
        let mut config = SavedConfiguration::new("Bell pair", c);
        config.description = "Two entangled qubits".into();

        let code = configuration_to_python(&config);
        assert!(code.starts_with(
            "# Bell pair\n# Two entangled qubits\n\nfrom qiskit import QuantumCircuit\n\nqc = QuantumCircuit(2, 2)\n\n"
        ));
        assert!(code.contains("qc.custom(1)\n"));
        assert!(code.ends_with("\nqc.measure(range(2), range(2))\n"));
    }

    #[test]
    fn test_json_round_trip() {
        let circuit = bell();
        let back = from_json(&to_json(&circuit).unwrap()).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_from_json_rejects_out_of_range() {
        let mut circuit = bell();
        circuit.qubits = 1;
        let json = serde_json::to_string(&circuit).unwrap();
        assert!(from_json(&json).is_err());
        assert!(from_json("not json").is_err());
    }
}
