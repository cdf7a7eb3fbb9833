// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! QuantumDocs circuit core.
//!
//! The circuit model behind the QuantumDocs learning app: a small gate
//! catalog, an editable circuit, a heuristic mock execution engine and a
//! Qiskit source exporter, served over REST.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            REST Service (axum)           │
//! ├───────────────┬──────────────┬──────────┤
//! │ CircuitEditor │  Exporters   │ Library  │
//! │ (circuit)     │  (export)    │ (storage)│
//! ├───────────────┴──────────────┴──────────┤
//! │           Backend Registry               │
//! ├────────────────┬────────────────────────┤
//! │  Mock Backend  │    Remote Backend      │
//! │  (heuristic)   │    (reqwest)           │
//! └────────────────┴────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`circuit`]: Gate catalog, circuit records and the editing session
//! - [`backend`]: Execution backend trait, mock engine and registry
//! - [`algorithms`]: Canned distributions for algorithm presets
//! - [`export`]: Qiskit and JSON exporters
//! - [`storage`]: Saved configuration library
//! - [`bloch`]: Bloch sphere coordinates and animation frames
//! - [`config`]: Configuration management
//! - [`server`]: REST server
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod algorithms;
pub mod backend;
pub mod bloch;
pub mod circuit;
pub mod config;
pub mod error;
pub mod export;
pub mod server;
pub mod storage;
pub mod validation;

pub use circuit::{Circuit, CircuitEditor, GatePlacement};
pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
