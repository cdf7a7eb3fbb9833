// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Heuristic outcome distributions.
//!
//! This is not a simulator. The circuit is classified by which gate ids it
//! contains and a fixed distribution shape is assigned:
//!
//! | contains `h` | contains `cx` | shape                                   |
//! |--------------|---------------|-----------------------------------------|
//! | yes          | yes           | even split between `0…0` and `1…1`      |
//! | yes          | no            | uniform over all `2^n` bit-strings      |
//! | no           | any           | every shot on `0…0`                     |
//!
//! Counts are integers summing exactly to the shot count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::circuit::catalog::{CNOT, HADAMARD};
use crate::circuit::Circuit;
use crate::error::{Result, ValidationError};

/// Widest register for which every bit-string is enumerated.
pub const MAX_ENUMERATED_QUBITS: usize = 20;

/// Distribution shape picked for a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionShape {
    /// Half the shots on all-zeros, half on all-ones
    Entangled,
    /// Same count on every bit-string
    Uniform,
    /// Everything on all-zeros
    Ground,
}

impl DistributionShape {
    /// Classify a circuit by the gate ids it contains. Unknown ids never
    /// match either rule.
    pub fn classify(circuit: &Circuit) -> Self {
        let superposition = circuit.contains_gate(HADAMARD);
        let entangling = circuit.contains_gate(CNOT);
        match (superposition, entangling) {
            (true, true) => DistributionShape::Entangled,
            (true, false) => DistributionShape::Uniform,
            (false, _) => DistributionShape::Ground,
        }
    }
}

/// Bit-string outcome counts for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    /// Bit-string (most significant qubit first) to count.
    pub counts: BTreeMap<String, u32>,
    pub shots: u32,
}

impl OutcomeDistribution {
    /// Probability per bit-string (`count / shots`).
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let shots = self.shots as f64;
        self.counts
            .iter()
            .map(|(state, &count)| (state.clone(), count as f64 / shots))
            .collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Count recorded for `state`, zero if absent.
    pub fn count(&self, state: &str) -> u32 {
        self.counts.get(state).copied().unwrap_or(0)
    }
}

/// `value` as a zero-padded bit-string of `width` characters.
pub fn bit_string(value: usize, width: usize) -> String {
    format!("{:0width$b}", value, width = width)
}

/// Produce the mock distribution for `circuit`.
pub fn run(circuit: &Circuit, shots: u32) -> Result<OutcomeDistribution> {
    if shots == 0 {
        return Err(ValidationError::Field {
            field: "shots".into(),
            message: "must be greater than 0".into(),
        }
        .into());
    }

    let n = circuit.qubits;
    let zeros = "0".repeat(n);
    let mut counts = BTreeMap::new();

    match DistributionShape::classify(circuit) {
        DistributionShape::Entangled => {
            let half = shots / 2;
            counts.insert(zeros, half);
            counts.insert("1".repeat(n), shots - half);
        }
        DistributionShape::Uniform => {
            if n > MAX_ENUMERATED_QUBITS {
                return Err(ValidationError::ResourceLimit {
                    resource: "qubits".into(),
                    limit: MAX_ENUMERATED_QUBITS as u64,
                    requested: n as u64,
                }
                .into());
            }
            let num_states = 1usize << n;
            let each = (shots as usize / num_states) as u32;
            let remainder = shots - each * num_states as u32;
            for i in 0..num_states {
                counts.insert(bit_string(i, n), each);
            }
            // Remainder goes to the first state so the total stays exact
            if let Some(first) = counts.get_mut(&zeros) {
                *first += remainder;
            }
        }
        DistributionShape::Ground => {
            counts.insert(zeros, shots);
        }
    }

    Ok(OutcomeDistribution { counts, shots })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit(qubits: usize, gates: &[(&str, usize, Option<usize>)]) -> Circuit {
        let mut c = Circuit::new(qubits, "t").unwrap();
        for &(id, target, control) in gates {
            c.add_gate(id, vec![target], control.into_iter().collect())
                .unwrap();
        }
        c
    }

    #[test]
    fn test_bit_string() {
        assert_eq!(bit_string(0, 3), "000");
        assert_eq!(bit_string(5, 3), "101");
        assert_eq!(bit_string(1, 1), "1");
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            DistributionShape::classify(&circuit(2, &[("h", 0, None), ("cx", 1, Some(0))])),
            DistributionShape::Entangled
        );
        assert_eq!(
            DistributionShape::classify(&circuit(2, &[("h", 0, None), ("cz", 1, Some(0))])),
            DistributionShape::Uniform
        );
        assert_eq!(
            DistributionShape::classify(&circuit(2, &[("cx", 1, Some(0))])),
            DistributionShape::Ground
        );
        assert_eq!(
            DistributionShape::classify(&circuit(2, &[("mystery", 0, None)])),
            DistributionShape::Ground
        );
    }

    #[test]
    fn test_bell_split() {
        let d = run(&circuit(2, &[("h", 0, None), ("cx", 1, Some(0))]), 1000).unwrap();
        let expected: BTreeMap<String, u32> =
            [("00".to_string(), 500), ("11".to_string(), 500)].into();
        assert_eq!(d.counts, expected);
    }

    #[test]
    fn test_bell_split_odd_shots() {
        let d = run(&circuit(3, &[("h", 0, None), ("cx", 1, Some(0))]), 7).unwrap();
        assert_eq!(d.count("000"), 3);
        assert_eq!(d.count("111"), 4);
        assert_eq!(d.total(), 7);
    }

    #[test]
    fn test_uniform_distribution() {
        let d = run(&circuit(2, &[("h", 0, None)]), 1000).unwrap();
        assert_eq!(d.counts.len(), 4);
        assert_eq!(d.total(), 1000);
        for count in d.counts.values() {
            assert_eq!(*count, 250);
        }
    }

    #[test]
    fn test_uniform_remainder_on_first_state() {
        let d = run(&circuit(3, &[("h", 0, None)]), 1001).unwrap();
        assert_eq!(d.counts.len(), 8);
        assert_eq!(d.total(), 1001);
        assert_eq!(d.count("000"), 125 + 1);
        assert_eq!(d.count("111"), 125);
    }

    #[test]
    fn test_uniform_fewer_shots_than_states() {
        let d = run(&circuit(3, &[("h", 0, None)]), 3).unwrap();
        assert_eq!(d.count("000"), 3);
        assert_eq!(d.count("001"), 0);
        assert_eq!(d.total(), 3);
    }

    #[test]
    fn test_ground_state() {
        let d = run(&circuit(3, &[("x", 0, None)]), 512).unwrap();
        assert_eq!(d.counts.len(), 1);
        assert_eq!(d.count("000"), 512);
    }

    #[test]
    fn test_zero_shots_rejected() {
        assert!(run(&circuit(1, &[]), 0).is_err());
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let d = run(&circuit(3, &[("h", 0, None)]), 999).unwrap();
        let sum: f64 = d.probabilities().values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_too_wide() {
        let c = circuit(MAX_ENUMERATED_QUBITS + 1, &[("h", 0, None)]);
        assert!(run(&c, 10).is_err());
    }
}
