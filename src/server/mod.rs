// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP server.
//!
//! One REST (axum) server exposes the circuit editor, the execution backends,
//! the exporters, the algorithm presets and the configuration library.
//!
//! # Usage
//!
//! ```ignore
//! use quantum_docs::server::{run_server, ServerState};
//!
//! let config = Config::load(None)?;
//! let state = Arc::new(ServerState::new(registry, library, config.simulation.clone()));
//! run_server(&config.server, state).await?;
//! ```

pub mod rest;

pub use rest::RestServer;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::backend::BackendRegistry;
use crate::circuit::CircuitEditor;
use crate::config::{ServerConfig, SimulationConfig};
use crate::error::Result;
use crate::storage::{ConfigurationLibrary, ConfigurationStore};

/// Configuration library with a type-erased store.
pub type SharedLibrary = ConfigurationLibrary<Box<dyn ConfigurationStore>>;

/// Shared state for the server.
pub struct ServerState {
    /// Backend registry
    pub registry: Arc<BackendRegistry>,

    /// Editing session on the current circuit
    pub editor: RwLock<CircuitEditor>,

    /// Saved configurations
    pub library: RwLock<SharedLibrary>,

    /// Default shots and limits for runs
    pub simulation: SimulationConfig,

    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ServerState {
    /// Create new server state with a fresh editing session.
    pub fn new(
        registry: Arc<BackendRegistry>,
        library: SharedLibrary,
        simulation: SimulationConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            registry,
            editor: RwLock::new(CircuitEditor::default()),
            library: RwLock::new(library),
            simulation,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Get a shutdown receiver.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Signal shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Run the REST server until Ctrl-C.
pub async fn run_server(config: &ServerConfig, state: Arc<ServerState>) -> Result<()> {
    let rest_server = RestServer::new(state.clone());

    info!(host = %config.host, port = config.port, "Starting quantum-docs server");

    let state_for_signal = state.clone();
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            info!("Received shutdown signal, initiating graceful shutdown");
            state_for_signal.shutdown();
        }
    });

    let mut shutdown_rx = state.shutdown_receiver();
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_sec);
    let serve = rest_server.serve(config);
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => return result,
        _ = shutdown_rx.changed() => {}
    }

    // Give in-flight requests a bounded window to drain.
    match tokio::time::timeout(shutdown_timeout, serve).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                timeout_secs = config.shutdown_timeout_sec,
                "Shutdown timed out, dropping open connections"
            );
            Ok(())
        }
    }
}
