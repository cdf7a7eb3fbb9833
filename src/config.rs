// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. config.yaml file
//! 3. Environment variables (QDOCS_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Simulation settings
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Saved-configuration storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Backend configurations
    #[serde(default)]
    pub backends: BackendsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            for path in &["config.yaml", "config.yml", "/etc/quantum-docs/config.yaml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("QDOCS_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = env::var("QDOCS_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = env::var("QDOCS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("QDOCS_DATA_DIR") {
            self.storage.directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("QDOCS_SIM_LATENCY_MS") {
            if let Ok(ms) = val.parse() {
                self.simulation.latency_ms = ms;
            }
        }
        if let Ok(val) = env::var("QDOCS_CORS_ALLOW_ALL") {
            self.server.cors.allow_all = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("QDOCS_CORS_ALLOWED_ORIGINS") {
            self.server.cors.allowed_origins =
                val.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Remote backend
        if let Ok(val) = env::var("QDOCS_REMOTE_URL") {
            self.backends.remote.base_url = val;
        }
        if let Ok(val) = env::var("QDOCS_REMOTE_TOKEN") {
            self.backends.remote.auth_token = Some(val);
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server port cannot be 0".into()));
        }
        if self.server.request_timeout_sec == 0 {
            return Err(Error::Config("request_timeout_sec must be at least 1".into()));
        }
        let limits = &self.simulation.limits;
        if limits.max_qubits == 0 {
            return Err(Error::Config("max_qubits must be at least 1".into()));
        }
        if self.simulation.default_shots == 0 {
            return Err(Error::Config("default_shots must be greater than 0".into()));
        }
        if self.simulation.default_shots > limits.max_shots {
            return Err(Error::Config(format!(
                "default_shots {} exceeds max_shots {}",
                self.simulation.default_shots, limits.max_shots
            )));
        }
        if self.server.cors.allow_all {
            tracing::warn!(
                "CORS is set to allow all origins. Set QDOCS_CORS_ALLOW_ALL=false \
                 or configure specific origins for anything but local development."
            );
        }
        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// REST port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_sec: default_request_timeout(),
            cors: CorsConfig::default(),
            shutdown_timeout_sec: default_shutdown_timeout(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allow all origins (development only)
    #[serde(default)]
    pub allow_all: bool,

    /// Allowed origins when allow_all is false
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_all: false,
            // Angular dev server
            allowed_origins: vec![
                "http://localhost:4200".into(),
                "http://127.0.0.1:4200".into(),
            ],
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

/// Mock execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Shots used when a request does not specify any
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Artificial backend latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Resource limits
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_shots: default_shots(),
            latency_ms: default_latency_ms(),
            limits: ResourceLimits::default(),
        }
    }
}

fn default_shots() -> u32 {
    1000
}

fn default_latency_ms() -> u64 {
    500
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum qubits per circuit
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Maximum shots per run
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_qubits: default_max_qubits(),
            max_shots: default_max_shots(),
        }
    }
}

fn default_max_qubits() -> u32 {
    10
}

fn default_max_shots() -> u32 {
    100_000
}

/// Saved-configuration storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the configuration blob
    #[serde(default = "default_data_dir")]
    pub directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Backend configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Heuristic mock backend
    #[serde(default)]
    pub mock: MockConfig,

    /// External numerical backend
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Mock backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Whether the backend is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether this is the default backend
    #[serde(default = "default_true")]
    pub default: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default: true,
        }
    }
}

/// Remote backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Whether the backend is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the backend API
    #[serde(default = "default_remote_url")]
    pub base_url: String,

    /// Optional bearer token
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_sec: u64,

    /// Maximum number of retries for transient errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_remote_url(),
            auth_token: None,
            timeout_sec: default_remote_timeout(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

fn default_remote_url() -> String {
    "http://localhost:5000/api".into()
}

fn default_remote_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.simulation.default_shots, 1000);
        assert_eq!(config.simulation.latency_ms, 500);
        assert!(config.backends.mock.enabled);
        assert!(!config.backends.remote.enabled);
        assert_eq!(config.backends.remote.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad_config = Config::default();
        bad_config.server.port = 0;
        assert!(bad_config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_request_timeout() {
        let mut config = Config::default();
        assert_eq!(config.server.request_timeout_sec, 30);
        config.server.request_timeout_sec = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_shots_over_limit() {
        let mut config = Config::default();
        config.simulation.default_shots = 200_000;
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("max_shots"));
    }

    #[test]
    fn test_validate_zero_default_shots() {
        let mut config = Config::default();
        config.simulation.default_shots = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_max_qubits() {
        let mut config = Config::default();
        config.simulation.limits.max_qubits = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_config_defaults_to_secure() {
        let config = Config::default();
        assert!(!config.server.cors.allow_all);
        assert!(!config.server.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
server:
  host: "0.0.0.0"
  port: 9001
simulation:
  latency_ms: 0
storage:
  directory: "/var/lib/qdocs"
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.simulation.latency_ms, 0);
        assert_eq!(config.simulation.default_shots, 1000);
        assert_eq!(config.storage.directory, PathBuf::from("/var/lib/qdocs"));
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let path = std::path::Path::new("/tmp/does_not_exist_qdocs_test.yaml");
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();

        let result = Config::load(Some(f.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        std::env::set_var("QDOCS_LOG_LEVEL", "debug");
        std::env::set_var("QDOCS_REMOTE_URL", "http://qiskit.local/api");
        std::env::set_var("QDOCS_CORS_ALLOWED_ORIGINS", "http://a.com, http://b.com");
        config.apply_env_overrides();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.backends.remote.base_url, "http://qiskit.local/api");
        assert_eq!(
            config.server.cors.allowed_origins,
            vec!["http://a.com".to_string(), "http://b.com".to_string()]
        );
        std::env::remove_var("QDOCS_LOG_LEVEL");
        std::env::remove_var("QDOCS_REMOTE_URL");
        std::env::remove_var("QDOCS_CORS_ALLOWED_ORIGINS");
    }

    #[test]
    fn test_remote_token_not_serialized() {
        let mut config = Config::default();
        config.backends.remote.auth_token = Some("secret".into());
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("secret"));
    }
}
