// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Circuit model.
//!
//! - [`catalog`]: static gate descriptors
//! - [`types`]: [`Circuit`] and [`GatePlacement`] records
//! - [`editor`]: the session object owning the current circuit

pub mod catalog;
pub mod editor;
pub mod types;

pub use catalog::{describe, get_gate, list_gates, GateArity, GateDescriptor};
pub use editor::CircuitEditor;
pub use types::{Circuit, GatePlacement};
