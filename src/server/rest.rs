// Copyright 2026 QuantumDocs Contributors
// SPDX-License-Identifier: Apache-2.0

//! REST API server implementation using axum.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Backend health summary
//! - `GET /api/v1/version` - Server version
//! - `GET /api/v1/backends` - List backends
//! - `GET /api/v1/gates`, `GET /api/v1/gates/:id` - Gate catalog
//! - `GET|PUT|POST /api/v1/circuit` - Current circuit
//! - `POST /api/v1/circuit/gates`, `DELETE /api/v1/circuit/gates/:position`
//! - `POST /api/v1/circuit/clear`, `POST|DELETE /api/v1/circuit/qubits`
//! - `POST /api/v1/simulate` - Run a circuit
//! - `GET /api/v1/export/qiskit`, `GET /api/v1/export/json`
//! - `GET /api/v1/algorithms`, `GET /api/v1/algorithms/:id` - Canned distributions
//! - `GET /api/v1/bloch`, `GET /api/v1/bloch/frames`
//! - `/api/v1/configurations/...` - Saved configuration library

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use super::{ServerState, SharedLibrary};
use crate::algorithms::{self, AlgorithmKind, AlgorithmParams, AlgorithmPreset, AlgorithmReport};
use crate::backend::{HealthStatus, SimulationRequest, SimulationResult};
use crate::bloch::{self, BlochSphereData};
use crate::circuit::{self, Circuit, GateDescriptor};
use crate::config::{CorsConfig, ServerConfig};
use crate::error::{Error, ErrorBody, Result, ValidationError};
use crate::export;
use crate::storage::{LibraryStatistics, SavedConfiguration};
use crate::validation::{validate_bloch_angles, validate_simulation_request};

/// Upper bound on animation frames per request.
const MAX_BLOCH_FRAMES: usize = 1000;
const DEFAULT_BLOCH_FRAMES: usize = 30;

/// REST server.
pub struct RestServer {
    state: Arc<ServerState>,
}

impl RestServer {
    /// Create a new REST server.
    pub fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }

    /// Start the REST server.
    pub async fn serve(self, config: &ServerConfig) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid REST address: {}", e)))?;

        info!(address = %addr, "Starting REST server");

        let app = router(self.state.clone(), config);
        let mut shutdown_rx = self.state.shutdown_receiver();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind REST server: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                info!("REST server shutting down");
            })
            .await
            .map_err(|e| Error::Server(format!("REST server error: {}", e)))?;

        Ok(())
    }
}

/// Build the API router.
pub fn router(state: Arc<ServerState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/version", get(get_version))
        .route("/api/v1/backends", get(list_backends))
        .route("/api/v1/gates", get(list_gates))
        .route("/api/v1/gates/:id", get(get_gate))
        .route(
            "/api/v1/circuit",
            get(get_circuit).put(replace_circuit).post(create_circuit),
        )
        .route("/api/v1/circuit/gates", post(add_gate))
        .route("/api/v1/circuit/gates/:position", delete(remove_gate))
        .route("/api/v1/circuit/clear", post(clear_circuit))
        .route(
            "/api/v1/circuit/qubits",
            post(add_qubit).delete(remove_qubit),
        )
        .route("/api/v1/simulate", post(simulate))
        .route("/api/v1/export/qiskit", get(export_qiskit))
        .route("/api/v1/export/json", get(export_json))
        .route("/api/v1/algorithms", get(list_algorithms))
        .route("/api/v1/algorithms/:id", get(run_algorithm))
        .route("/api/v1/bloch", get(bloch_state))
        .route("/api/v1/bloch/frames", get(bloch_frames))
        .route(
            "/api/v1/configurations",
            get(list_configurations).post(save_configuration),
        )
        .route("/api/v1/configurations/import", post(import_configuration))
        .route("/api/v1/configurations/stats", get(configuration_stats))
        .route(
            "/api/v1/configurations/:id",
            get(get_configuration).delete(delete_configuration),
        )
        .route(
            "/api/v1/configurations/:id/export",
            get(export_configuration),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_sec)))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allow_all {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

fn not_found(code: &str, message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: message,
            code: code.to_string(),
        }),
    )
        .into_response()
}

/// Run `op` against the configuration library on the blocking pool.
///
/// Library writes go through the store synchronously, and `JsonFileStore`
/// touches the filesystem while the write lock is held.
async fn with_library<T, F>(state: &Arc<ServerState>, op: F) -> Result<T>
where
    F: FnOnce(&mut SharedLibrary) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(&mut state.library.write()))
        .await
        .map_err(|e| Error::Server(format!("Configuration library task failed: {}", e)))?
}

fn check_qubits(state: &ServerState, qubits: usize) -> Result<()> {
    let limit = state.simulation.limits.max_qubits;
    if qubits > limit as usize {
        return Err(ValidationError::ResourceLimit {
            resource: "qubits".into(),
            limit: limit as u64,
            requested: qubits as u64,
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Request/Response types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    backends: Vec<BackendHealth>,
}

/// Individual backend health.
#[derive(Debug, Serialize)]
struct BackendHealth {
    name: String,
    status: String,
    backend_type: String,
}

/// Backend list response.
#[derive(Debug, Serialize)]
struct BackendsResponse {
    backends: Vec<crate::backend::BackendInfo>,
    default_backend: Option<String>,
}

/// Version response.
#[derive(Debug, Serialize)]
struct VersionResponse {
    version: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreateCircuitRequest {
    qubits: usize,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddGateRequest {
    gate_id: String,
    qubit_targets: Vec<usize>,
    #[serde(default)]
    control_qubits: Option<Vec<usize>>,
}

#[derive(Debug, Default, Deserialize)]
struct SimulateRequest {
    shots: Option<u32>,
    backend: Option<String>,
    circuit: Option<Circuit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlgorithmQuery {
    shots: Option<u32>,
    qubits: Option<usize>,
    bell_type: Option<String>,
    target_item: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct BlochQuery {
    theta: f64,
    phi: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlochFramesQuery {
    #[serde(default)]
    from_theta: f64,
    #[serde(default)]
    from_phi: f64,
    to_theta: f64,
    to_phi: f64,
    steps: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_check(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let mut backends = Vec::new();
    let mut overall_healthy = true;

    for name in state.registry.list() {
        if let Ok(backend) = state.registry.get(&name) {
            let status = match backend.health_check().await {
                Ok(HealthStatus::Healthy) => "healthy".to_string(),
                Ok(HealthStatus::Degraded) => {
                    overall_healthy = false;
                    "degraded".to_string()
                }
                Ok(HealthStatus::Unavailable) => {
                    overall_healthy = false;
                    "unavailable".to_string()
                }
                Err(e) => {
                    overall_healthy = false;
                    format!("error: {}", e)
                }
            };

            backends.push(BackendHealth {
                name: name.clone(),
                status,
                backend_type: backend.backend_type().to_string(),
            });
        }
    }

    Json(HealthResponse {
        status: if overall_healthy {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        backends,
    })
}

/// List backends endpoint.
async fn list_backends(State(state): State<Arc<ServerState>>) -> Json<BackendsResponse> {
    let mut backends = Vec::new();

    for name in state.registry.list() {
        if let Ok(backend) = state.registry.get(&name) {
            match backend.info().await {
                Ok(info) => backends.push(info),
                Err(e) => warn!(backend = %name, error = %e, "Skipping backend without info"),
            }
        }
    }

    Json(BackendsResponse {
        backends,
        default_backend: state.registry.default_backend_name(),
    })
}

/// Get version endpoint.
async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        name: "QuantumDocs".to_string(),
    })
}

async fn list_gates() -> Json<&'static [GateDescriptor]> {
    Json(circuit::list_gates())
}

async fn get_gate(Path(id): Path<String>) -> std::result::Result<Json<&'static GateDescriptor>, Response> {
    circuit::get_gate(&id)
        .map(Json)
        .ok_or_else(|| not_found("GATE_NOT_FOUND", format!("Gate not found: {}", id)))
}

async fn get_circuit(State(state): State<Arc<ServerState>>) -> Json<Circuit> {
    Json(state.editor.read().snapshot())
}

async fn replace_circuit(
    State(state): State<Arc<ServerState>>,
    Json(circuit): Json<Circuit>,
) -> Result<Json<Circuit>> {
    check_qubits(&state, circuit.qubits)?;
    let mut editor = state.editor.write();
    let current = editor.replace(circuit)?;
    debug!(circuit_id = %current.id, "Replaced circuit");
    Ok(Json(current.clone()))
}

async fn create_circuit(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreateCircuitRequest>,
) -> Result<(StatusCode, Json<Circuit>)> {
    check_qubits(&state, req.qubits)?;
    let mut editor = state.editor.write();
    let current = editor.create(req.qubits, req.name.as_deref())?;
    Ok((StatusCode::CREATED, Json(current.clone())))
}

async fn add_gate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<AddGateRequest>,
) -> Result<Json<Circuit>> {
    let mut editor = state.editor.write();
    let current = editor.add_gate(
        &req.gate_id,
        req.qubit_targets,
        req.control_qubits.unwrap_or_default(),
    )?;
    Ok(Json(current.clone()))
}

async fn remove_gate(
    State(state): State<Arc<ServerState>>,
    Path(position): Path<usize>,
) -> Json<Circuit> {
    Json(state.editor.write().remove_gate(position).clone())
}

async fn clear_circuit(State(state): State<Arc<ServerState>>) -> Json<Circuit> {
    Json(state.editor.write().clear().clone())
}

async fn add_qubit(State(state): State<Arc<ServerState>>) -> Result<Json<Circuit>> {
    let mut editor = state.editor.write();
    check_qubits(&state, editor.current().qubits + 1)?;
    Ok(Json(editor.add_qubit().clone()))
}

async fn remove_qubit(State(state): State<Arc<ServerState>>) -> Json<Circuit> {
    Json(state.editor.write().remove_qubit().clone())
}

fn current_circuit(state: &ServerState) -> Circuit {
    state.editor.read().snapshot()
}

/// Run a circuit on the named or default backend.
async fn simulate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulationResult>> {
    let circuit = match req.circuit {
        Some(circuit) => {
            circuit.validate()?;
            circuit
        }
        None => current_circuit(&state),
    };
    let shots = req.shots.unwrap_or(state.simulation.default_shots);
    validate_simulation_request(shots, circuit.qubits, &state.simulation.limits)?;

    let backend = state.registry.get_or_default(req.backend.as_deref())?;

    debug!(
        backend = %backend.name(),
        circuit_id = %circuit.id,
        shots,
        "REST simulate request"
    );

    let result = backend
        .run(SimulationRequest { circuit, shots })
        .await
        .map_err(|e| {
            error!(error = %e, "Simulation failed");
            Error::from(e)
        })?;

    Ok(Json(result))
}

async fn export_qiskit(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let code = export::to_qiskit(state.editor.read().current());
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], code)
}

async fn export_json(State(state): State<Arc<ServerState>>) -> Result<impl IntoResponse> {
    let json = export::to_json(state.editor.read().current())?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

async fn list_algorithms() -> Json<&'static [AlgorithmPreset]> {
    Json(algorithms::presets())
}

async fn run_algorithm(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(query): Query<AlgorithmQuery>,
) -> std::result::Result<Json<AlgorithmReport>, Response> {
    let params = AlgorithmParams {
        bell_type: query.bell_type,
        target_item: query.target_item,
    };
    let kind = AlgorithmKind::from_id(&id, &params)
        .map_err(IntoResponse::into_response)?
        .ok_or_else(|| not_found("ALGORITHM_NOT_FOUND", format!("Algorithm not found: {}", id)))?;

    let qubits = query
        .qubits
        .or_else(|| algorithms::default_qubits(&id))
        .unwrap_or(2);
    let shots = query.shots.unwrap_or(state.simulation.default_shots);

    validate_simulation_request(shots, qubits, &state.simulation.limits)
        .and_then(|_| kind.report(&id, qubits, shots))
        .map(Json)
        .map_err(IntoResponse::into_response)
}

async fn bloch_state(Query(query): Query<BlochQuery>) -> Result<Json<BlochSphereData>> {
    validate_bloch_angles(query.theta, query.phi)?;
    Ok(Json(bloch::state_from_angles(query.theta, query.phi)))
}

async fn bloch_frames(Query(query): Query<BlochFramesQuery>) -> Result<Json<Vec<BlochSphereData>>> {
    validate_bloch_angles(query.from_theta, query.from_phi)?;
    validate_bloch_angles(query.to_theta, query.to_phi)?;

    let steps = query.steps.unwrap_or(DEFAULT_BLOCH_FRAMES);
    if steps > MAX_BLOCH_FRAMES {
        return Err(ValidationError::ResourceLimit {
            resource: "steps".into(),
            limit: MAX_BLOCH_FRAMES as u64,
            requested: steps as u64,
        }
        .into());
    }

    let from = bloch::state_from_angles(query.from_theta, query.from_phi);
    let to = bloch::state_from_angles(query.to_theta, query.to_phi);
    Ok(Json(bloch::transition_frames(&from, &to, steps)))
}

async fn list_configurations(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<SavedConfiguration>> {
    let library = state.library.read();
    let configs = match query.q.as_deref() {
        Some(q) => library.search(q).into_iter().cloned().collect(),
        None => library.all().to_vec(),
    };
    Json(configs)
}

async fn save_configuration(
    State(state): State<Arc<ServerState>>,
    Json(config): Json<SavedConfiguration>,
) -> Result<Json<SavedConfiguration>> {
    check_qubits(&state, config.circuit.qubits)?;
    let saved = with_library(&state, move |library| library.save_configuration(config)).await?;
    Ok(Json(saved))
}

async fn get_configuration(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<SavedConfiguration>> {
    state
        .library
        .read()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::ConfigurationNotFound(id.to_string()))
}

async fn delete_configuration(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let target = id.clone();
    if with_library(&state, move |library| library.delete(&target)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::ConfigurationNotFound(id))
    }
}

async fn export_configuration(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response> {
    let library = state.library.read();
    match query.format.as_deref() {
        None | Some("json") => {
            let json = library.export_configuration(&id)?;
            Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
        }
        Some("python") => {
            let config = library
                .get(&id)
                .ok_or_else(|| Error::ConfigurationNotFound(id.to_string()))?;
            let code = export::configuration_to_python(config);
            Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], code).into_response())
        }
        Some(other) => Err(ValidationError::Field {
            field: "format".into(),
            message: format!("unsupported export format '{}'", other),
        }
        .into()),
    }
}

async fn import_configuration(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> Result<(StatusCode, Json<SavedConfiguration>)> {
    let imported =
        with_library(&state, move |library| library.import_configuration(&body)).await?;
    Ok((StatusCode::CREATED, Json(imported)))
}

async fn configuration_stats(State(state): State<Arc<ServerState>>) -> Json<LibraryStatistics> {
    Json(state.library.read().statistics())
}
