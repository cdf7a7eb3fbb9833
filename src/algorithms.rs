// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canned outcome distributions for the algorithm explorer.
//!
//! Each preset maps to a fixed probability table over the `2^n` bit-strings
//! of an `n`-qubit register. Probabilities are percentages.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::distribution::{bit_string, MAX_ENUMERATED_QUBITS};
use crate::error::{Result, ValidationError};

/// Default Grover search target.
pub const DEFAULT_GROVER_TARGET: usize = 3;

/// How much background a preset assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
}

/// Explorer metadata for one algorithm preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub complexity: Complexity,
    /// Default register width.
    pub qubits: usize,
}

const fn preset(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    complexity: Complexity,
    qubits: usize,
) -> AlgorithmPreset {
    AlgorithmPreset {
        id,
        name,
        description,
        complexity,
        qubits,
    }
}

static PRESETS: [AlgorithmPreset; 12] = [
    preset(
        "bell_state",
        "Bell State",
        "Creates an entangled qubit pair, the basis of teleportation and quantum cryptography.",
        Complexity::Beginner,
        2,
    ),
    preset(
        "ghz_state",
        "GHZ State",
        "Entangles three or more qubits to show multipartite quantum correlations.",
        Complexity::Intermediate,
        3,
    ),
    preset(
        "shor",
        "Shor's Algorithm",
        "Finds the prime factors of a large integer efficiently.",
        Complexity::Advanced,
        5,
    ),
    preset(
        "grover",
        "Grover's Algorithm",
        "Searches an unsorted database with a quadratic speedup over classical search.",
        Complexity::Intermediate,
        2,
    ),
    preset(
        "teleportation",
        "Quantum Teleportation",
        "Transfers the state of one qubit to another using entanglement.",
        Complexity::Intermediate,
        3,
    ),
    preset(
        "deutsch",
        "Deutsch-Jozsa",
        "Decides whether a function is constant or balanced with a single query.",
        Complexity::Beginner,
        3,
    ),
    preset(
        "bernstein_vazirani",
        "Bernstein-Vazirani",
        "Recovers a hidden bit string with a single query.",
        Complexity::Intermediate,
        4,
    ),
    preset(
        "simon",
        "Simon's Algorithm",
        "Finds the period of a function; the precursor of Shor's algorithm.",
        Complexity::Advanced,
        6,
    ),
    preset(
        "qft",
        "Quantum Fourier Transform",
        "Quantum version of the FFT used as a building block by many algorithms.",
        Complexity::Intermediate,
        3,
    ),
    preset(
        "vqe",
        "Variational Quantum Eigensolver",
        "Hybrid quantum-classical search for the ground state of a Hamiltonian.",
        Complexity::Advanced,
        2,
    ),
    preset(
        "qaoa",
        "Quantum Approximate Optimization",
        "Hybrid algorithm for combinatorial optimization problems.",
        Complexity::Advanced,
        3,
    ),
    preset(
        "phase_estimation",
        "Quantum Phase Estimation",
        "Estimates an eigenvalue of a unitary operator; a key step of Shor's algorithm.",
        Complexity::Advanced,
        4,
    ),
];

/// Every preset, in explorer order.
pub fn presets() -> &'static [AlgorithmPreset] {
    &PRESETS
}

/// Metadata for `id`, if it names a preset.
pub fn find_preset(id: &str) -> Option<&'static AlgorithmPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Known preset ids, in explorer order.
pub fn preset_ids() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.id)
}

/// Register width the explorer uses for `id`.
pub fn default_qubits(id: &str) -> Option<usize> {
    find_preset(id).map(|p| p.qubits)
}

/// One of the four maximally entangled two-qubit states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BellVariant {
    #[default]
    #[serde(rename = "Φ+")]
    PhiPlus,
    #[serde(rename = "Φ-")]
    PhiMinus,
    #[serde(rename = "Ψ+")]
    PsiPlus,
    #[serde(rename = "Ψ-")]
    PsiMinus,
}

impl BellVariant {
    /// The two bit-strings carrying all the weight.
    pub fn support(self) -> [&'static str; 2] {
        match self {
            BellVariant::PhiPlus | BellVariant::PhiMinus => ["00", "11"],
            BellVariant::PsiPlus | BellVariant::PsiMinus => ["01", "10"],
        }
    }
}

impl FromStr for BellVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "φ+" | "phi+" | "phi_plus" => Ok(BellVariant::PhiPlus),
            "φ-" | "phi-" | "phi_minus" => Ok(BellVariant::PhiMinus),
            "ψ+" | "psi+" | "psi_plus" => Ok(BellVariant::PsiPlus),
            "ψ-" | "psi-" | "psi_minus" => Ok(BellVariant::PsiMinus),
            other => Err(ValidationError::Field {
                field: "bellType".into(),
                message: format!("unknown Bell state '{other}'"),
            }),
        }
    }
}

/// Optional knobs accepted by [`AlgorithmKind::from_id`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmParams {
    pub bell_type: Option<String>,
    pub target_item: Option<usize>,
}

/// Distribution family of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    BellState(BellVariant),
    Ghz,
    Grover { target: usize },
    Deutsch,
    Teleportation,
    /// Flat distribution used for presets without a dedicated table
    Uniform,
}

impl AlgorithmKind {
    /// Parse a preset id. Returns `Ok(None)` for ids the explorer does not
    /// know.
    pub fn from_id(id: &str, params: &AlgorithmParams) -> Result<Option<Self>> {
        let kind = match id {
            "bell_state" => {
                let variant = match params.bell_type.as_deref() {
                    Some(s) => s.parse()?,
                    None => BellVariant::default(),
                };
                AlgorithmKind::BellState(variant)
            }
            "ghz_state" => AlgorithmKind::Ghz,
            "grover" => AlgorithmKind::Grover {
                target: params.target_item.unwrap_or(DEFAULT_GROVER_TARGET),
            },
            "deutsch" => AlgorithmKind::Deutsch,
            "teleportation" => AlgorithmKind::Teleportation,
            other if default_qubits(other).is_some() => AlgorithmKind::Uniform,
            _ => return Ok(None),
        };
        Ok(Some(kind))
    }

    /// Check that the preset can be tabulated over `n` qubits.
    pub fn check(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(ValidationError::Field {
                field: "qubits".into(),
                message: "must be at least 1".into(),
            }
            .into());
        }
        if n > MAX_ENUMERATED_QUBITS {
            return Err(ValidationError::ResourceLimit {
                resource: "qubits".into(),
                limit: MAX_ENUMERATED_QUBITS as u64,
                requested: n as u64,
            }
            .into());
        }
        match *self {
            AlgorithmKind::BellState(_) if n != 2 => Err(ValidationError::Field {
                field: "qubits".into(),
                message: "Bell states are defined on exactly 2 qubits".into(),
            }
            .into()),
            AlgorithmKind::Grover { target } if n < 2 || target >= 1 << n => {
                Err(ValidationError::Field {
                    field: "targetItem".into(),
                    message: format!("target {target} does not fit in a {n}-qubit register"),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    fn percentage(&self, state: &str, index: usize, n: usize) -> f64 {
        let num_states = (1usize << n) as f64;
        let extreme = index == 0 || index == (1 << n) - 1;
        match *self {
            AlgorithmKind::BellState(variant) => {
                if variant.support().contains(&state) {
                    50.0
                } else {
                    0.0
                }
            }
            AlgorithmKind::Ghz => {
                if extreme {
                    50.0
                } else {
                    0.0
                }
            }
            AlgorithmKind::Grover { target } => {
                if index == target {
                    95.0
                } else {
                    5.0 / (num_states - 1.0)
                }
            }
            AlgorithmKind::Deutsch => {
                if index == 0 {
                    100.0
                } else {
                    0.0
                }
            }
            AlgorithmKind::Teleportation | AlgorithmKind::Uniform => 100.0 / num_states,
        }
    }

    /// Percentage per bit-string, ordered by integer value.
    pub fn probabilities(&self, n: usize) -> Result<Vec<(String, f64)>> {
        self.check(n)?;
        Ok((0..1usize << n)
            .map(|i| {
                let state = bit_string(i, n);
                let p = self.percentage(&state, i, n);
                (state, p)
            })
            .collect())
    }

    /// Integer counts summing exactly to `shots`.
    ///
    /// Each bucket gets the floor of its share; the remainder goes to the
    /// largest bucket (the first one on ties).
    pub fn counts(&self, n: usize, shots: u32) -> Result<BTreeMap<String, u32>> {
        let probs = self.probabilities(n)?;
        let mut counts: Vec<(String, u32)> = probs
            .iter()
            .map(|(state, p)| {
                let share = (p / 100.0 * shots as f64 + 1e-9).floor() as u32;
                (state.clone(), share)
            })
            .collect();

        let assigned: u32 = counts.iter().map(|(_, c)| *c).sum();
        let remainder = shots.saturating_sub(assigned);
        if remainder > 0 {
            let largest = probs
                .iter()
                .enumerate()
                .fold(0, |best, (i, (_, p))| if *p > probs[best].1 { i } else { best });
            counts[largest].1 += remainder;
        }

        Ok(counts.into_iter().collect())
    }

    /// Shannon entropy of the distribution in bits.
    pub fn entropy(&self, n: usize) -> Result<f64> {
        Ok(self
            .probabilities(n)?
            .iter()
            .map(|(_, p)| p / 100.0)
            .filter(|p| *p > 0.0)
            .map(|p| -p * p.log2())
            .sum())
    }

    /// Bit-string with the highest probability; the lowest such string on ties.
    pub fn most_probable(&self, n: usize) -> Result<String> {
        let probs = self.probabilities(n)?;
        let mut best = 0;
        for (i, (_, p)) in probs.iter().enumerate() {
            if *p > probs[best].1 {
                best = i;
            }
        }
        Ok(probs[best].0.clone())
    }

    /// Full summary for one preset run.
    pub fn report(&self, id: &str, n: usize, shots: u32) -> Result<AlgorithmReport> {
        let probabilities = self
            .probabilities(n)?
            .into_iter()
            .map(|(state, probability)| StateProbability { state, probability })
            .collect();
        Ok(AlgorithmReport {
            id: id.to_string(),
            qubits: n,
            shots,
            probabilities,
            counts: self.counts(n, shots)?,
            entropy: self.entropy(n)?,
            most_probable: self.most_probable(n)?,
        })
    }
}

/// Percentage of one bit-string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateProbability {
    pub state: String,
    pub probability: f64,
}

/// Serialized answer of the algorithm explorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmReport {
    pub id: String,
    pub qubits: usize,
    pub shots: u32,
    pub probabilities: Vec<StateProbability>,
    pub counts: BTreeMap<String, u32>,
    pub entropy: f64,
    pub most_probable: String,
}
