// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Saved configuration records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::SimulationResult;
use crate::circuit::Circuit;

/// A named snapshot bundling a circuit, a visualization preset and an optional
/// last result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub circuit: Circuit,
    #[serde(default)]
    pub visualization: VisualizationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<SimulationResult>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedConfiguration {
    /// New record with a fresh id wrapping `circuit`.
    pub fn new(name: impl Into<String>, circuit: Circuit) -> Self {
        let now = Utc::now();
        Self {
            id: new_configuration_id(),
            name: name.into(),
            description: String::new(),
            circuit,
            visualization: VisualizationConfig::default(),
            results: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match over name, description and tags.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Fresh `config_<uuid>` identifier.
pub fn new_configuration_id() -> String {
    format!("config_{}", uuid::Uuid::new_v4().simple())
}

/// Rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisualizationType {
    #[default]
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "hybrid")]
    Hybrid,
}

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.0, 3.0, 3.0),
            target: Vec3::default(),
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    pub antialias: bool,
    pub shadows: bool,
    pub ambient_light: f64,
    pub directional_light: f64,
    pub background_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            shadows: true,
            ambient_light: 0.6,
            directional_light: 0.8,
            background_color: "#0A0E1A".to_string(),
        }
    }
}

/// Visualization preset carried with a saved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub algorithm_id: String,
    #[serde(rename = "type", default)]
    pub kind: VisualizationType,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_axes: bool,
    #[serde(default)]
    pub camera_settings: CameraSettings,
    #[serde(default)]
    pub render_settings: RenderSettings,
}

fn default_true() -> bool {
    true
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            algorithm_id: String::new(),
            kind: VisualizationType::default(),
            theme: Theme::default(),
            show_grid: true,
            show_axes: true,
            camera_settings: CameraSettings::default(),
            render_settings: RenderSettings::default(),
        }
    }
}

/// Aggregate counts over a library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStatistics {
    pub total_configurations: usize,
    pub total_circuits: usize,
    pub average_qubits: f64,
    pub most_used_gates: BTreeMap<String, usize>,
}
