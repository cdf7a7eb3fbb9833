// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! QuantumDocs server and command-line tools.
//!
//! # Usage
//!
//! ```bash
//! # Start the REST server with default configuration
//! qdocs serve
//!
//! # Start with custom config and an in-memory configuration library
//! qdocs serve --config /path/to/config.yaml --ephemeral
//!
//! # Render a circuit file as a Qiskit program
//! qdocs export bell.json
//!
//! # Run a circuit file on the mock backend
//! qdocs simulate bell.json --shots 2048
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quantum_docs::{
    algorithms::{self, AlgorithmKind, AlgorithmParams},
    backend::{BackendRegistry, HealthStatus, MockBackend, SimulationRequest},
    circuit,
    config::Config,
    export,
    server::{self, ServerState, SharedLibrary},
    storage::{ConfigurationLibrary, ConfigurationStore, JsonFileStore, MemoryStore},
    validation::validate_simulation_request,
    Error, Result, VERSION,
};

#[cfg(feature = "remote")]
use quantum_docs::backend::remote::RemoteBackend;

/// QuantumDocs circuit service
#[derive(Parser)]
#[command(name = "qdocs")]
#[command(author = "QuantumDocs Contributors")]
#[command(version = VERSION)]
#[command(about = "Circuit editing, mock execution and Qiskit export for QuantumDocs")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Qiskit,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// REST port
        #[arg(long, env = "QDOCS_PORT")]
        port: Option<u16>,

        /// Directory holding saved configurations
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Keep saved configurations in memory only
        #[arg(long)]
        ephemeral: bool,

        /// Artificial mock backend latency in milliseconds
        #[arg(long)]
        latency_ms: Option<u64>,
    },

    /// Check backend health
    Health {
        /// Specific backend to check
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// List available backends
    Backends,

    /// List the gate catalog
    Gates,

    /// Render a circuit JSON file
    Export {
        /// Circuit JSON file
        input: PathBuf,

        #[arg(short, long, value_enum, default_value = "qiskit")]
        format: ExportFormat,
    },

    /// Run a circuit JSON file and print the result as JSON
    Simulate {
        /// Circuit JSON file
        input: PathBuf,

        #[arg(short, long)]
        shots: Option<u32>,

        /// Backend name (default backend if omitted)
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Print the canned distribution of an algorithm preset
    Algorithm {
        /// Preset id, e.g. bell_state, grover
        id: String,

        #[arg(short, long)]
        qubits: Option<usize>,

        #[arg(short, long)]
        shots: Option<u32>,

        /// Bell state variant (phi+, phi-, psi+, psi-)
        #[arg(long)]
        bell_type: Option<String>,

        /// Grover search target
        #[arg(long)]
        target_item: Option<usize>,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level, &config.logging.format);

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
            ephemeral,
            latency_ms,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(dir) = data_dir {
                config.storage.directory = dir;
            }
            if let Some(ms) = latency_ms {
                config.simulation.latency_ms = ms;
            }

            config.validate()?;

            let registry = Arc::new(initialize_backends(&config)?);
            let library = open_library(&config, ephemeral);

            info!(
                version = VERSION,
                host = %config.server.host,
                port = config.server.port,
                backends = ?registry.list(),
                ephemeral,
                "Starting QuantumDocs server"
            );

            let state = Arc::new(ServerState::new(
                registry,
                library,
                config.simulation.clone(),
            ));
            server::run_server(&config.server, state).await?;
        }

        Commands::Health { backend } => {
            let registry = initialize_backends(&config)?;

            let names = match backend {
                Some(name) => vec![name],
                None => registry.list(),
            };

            let mut all_healthy = true;
            for name in names {
                match registry.get(&name) {
                    Ok(b) => match b.health_check().await {
                        Ok(status) => {
                            println!("{}: {:?}", name, status);
                            all_healthy &= status == HealthStatus::Healthy;
                        }
                        Err(e) => {
                            println!("{}: Error - {}", name, e);
                            all_healthy = false;
                        }
                    },
                    Err(e) => {
                        eprintln!("{}", e);
                        all_healthy = false;
                    }
                }
            }

            if !all_healthy {
                std::process::exit(1);
            }
        }

        Commands::Backends => {
            let registry = initialize_backends(&config)?;
            let default = registry.default_backend_name();

            println!("Available backends:");
            for (name, backend_type) in registry.list_with_types() {
                let marker = if default.as_deref() == Some(name.as_str()) {
                    " (default)"
                } else {
                    ""
                };
                println!("  {} [{}]{}", name, backend_type, marker);
            }
        }

        Commands::Gates => {
            for gate in circuit::list_gates() {
                println!(
                    "  {:<5} {:<9} {:<6} {}",
                    gate.id,
                    gate.name,
                    format!("{:?}", gate.arity).to_lowercase(),
                    gate.description
                );
            }
        }

        Commands::Export { input, format } => {
            let circuit = export::from_json(&std::fs::read_to_string(&input)?)?;
            match format {
                ExportFormat::Qiskit => print!("{}", export::to_qiskit(&circuit)),
                ExportFormat::Json => println!("{}", export::to_json(&circuit)?),
            }
        }

        Commands::Simulate {
            input,
            shots,
            backend,
        } => {
            let circuit = export::from_json(&std::fs::read_to_string(&input)?)?;
            let shots = shots.unwrap_or(config.simulation.default_shots);
            validate_simulation_request(shots, circuit.qubits, &config.simulation.limits)?;

            let registry = initialize_backends(&config)?;
            let backend = registry.get_or_default(backend.as_deref())?;
            let result = backend.run(SimulationRequest { circuit, shots }).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Algorithm {
            id,
            qubits,
            shots,
            bell_type,
            target_item,
        } => {
            let params = AlgorithmParams {
                bell_type,
                target_item,
            };
            let kind = AlgorithmKind::from_id(&id, &params)?
                .ok_or_else(|| Error::Config(format!("Unknown algorithm preset: {}", id)))?;
            let qubits = qubits
                .or_else(|| algorithms::default_qubits(&id))
                .unwrap_or(2);
            let shots = shots.unwrap_or(config.simulation.default_shots);

            let report = kind.report(&id, qubits, shots)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Initialize logging with tracing. Logs go to stderr so command output on
/// stdout stays machine-readable.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// Initialize backends based on configuration.
fn initialize_backends(config: &Config) -> Result<BackendRegistry> {
    let registry = BackendRegistry::with_limits(config.simulation.limits.clone());

    if config.backends.mock.enabled {
        let backend = MockBackend::from_config(&config.simulation);
        info!(latency_ms = config.simulation.latency_ms, "Mock backend initialized");
        registry.register(Arc::new(backend));
    }

    #[cfg(feature = "remote")]
    if config.backends.remote.enabled {
        match RemoteBackend::new(&config.backends.remote, config.simulation.limits.clone()) {
            Ok(backend) => {
                info!("Remote backend initialized");
                registry.register(Arc::new(backend));
                if !config.backends.mock.default {
                    registry.set_default(quantum_docs::backend::remote::REMOTE_BACKEND_NAME)?;
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize remote backend");
            }
        }
    }

    if registry.is_empty() {
        error!("No backends available. At least one backend must be enabled.");
        return Err(Error::Config(
            "No backends available. At least one backend must be enabled.".to_string(),
        ));
    }

    Ok(registry)
}

/// Open the configuration library on disk, or in memory when `ephemeral`.
fn open_library(config: &Config, ephemeral: bool) -> SharedLibrary {
    let store: Box<dyn ConfigurationStore> = if ephemeral {
        Box::new(MemoryStore::default())
    } else {
        Box::new(JsonFileStore::new(&config.storage.directory))
    };
    ConfigurationLibrary::open(store)
}
