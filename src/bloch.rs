// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bloch sphere coordinates for single-qubit states.

use serde::{Deserialize, Serialize};

/// A point on the Bloch sphere in both spherical and Cartesian form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlochSphereData {
    pub theta: f64,
    pub phi: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlochSphereData {
    /// The |0⟩ state at the north pole.
    pub fn ground() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            x: 0.0,
            y: 0.0,
            z: 1.0,
        }
    }
}

impl Default for BlochSphereData {
    fn default() -> Self {
        Self::ground()
    }
}

/// Map polar angle `theta` and azimuth `phi` (radians) onto the unit sphere.
pub fn state_from_angles(theta: f64, phi: f64) -> BlochSphereData {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    BlochSphereData {
        theta,
        phi,
        x: sin_t * cos_p,
        y: sin_t * sin_p,
        z: cos_t,
    }
}

/// State at `progress` along a linear path in (θ, φ) from `from` to `to`.
///
/// `progress` is clamped to `[0, 1]`.
pub fn interpolate(from: &BlochSphereData, to: &BlochSphereData, progress: f64) -> BlochSphereData {
    let t = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let theta = from.theta + (to.theta - from.theta) * t;
    let phi = from.phi + (to.phi - from.phi) * t;
    state_from_angles(theta, phi)
}

/// `steps + 1` evenly spaced frames from `from` to `to`, both ends included.
pub fn transition_frames(
    from: &BlochSphereData,
    to: &BlochSphereData,
    steps: usize,
) -> Vec<BlochSphereData> {
    if steps == 0 {
        return vec![interpolate(from, to, 1.0)];
    }
    (0..=steps)
        .map(|i| interpolate(from, to, i as f64 / steps as f64))
        .collect()
}
