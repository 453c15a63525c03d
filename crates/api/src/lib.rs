//! Diabetes Risk API Server
//!
//! Serves the questionnaire form, the JSON assessment API and operational
//! endpoints on top of a single shared inference engine.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use data_validator::ValidationError;
use feature_engine::{EncodeError, RawInput, FEATURE_DIMENSION};
use inference_engine::{InferenceEngine, InferenceError, RiskAssessment};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub mod config;
pub mod html;
pub mod rate_limit;
pub mod routes;
pub mod telemetry;

pub use config::AppConfig;
pub use telemetry::init_logging;

/// Errors surfaced by the server
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error("Malformed request: {message}")]
    Malformed { status: StatusCode, message: String },
    #[error(transparent)]
    Inference(InferenceError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Telemetry setup failed: {0}")]
    Telemetry(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::InvalidInput(EncodeError::InvalidInput(errors)) => {
                ApiError::InvalidInput(errors)
            }
            other => ApiError::Inference(other),
        }
    }
}

/// One rejected field in an error body
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        Self {
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::InvalidInput(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors.iter().map(FieldError::from).collect(),
            ),
            ApiError::Malformed { status, .. } => (*status, Vec::new()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()),
        };
        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Loaded encoder, scaler and classifier
    pub engine: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Completed assessments since start
    pub assessment_count: AtomicU64,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
            assessment_count: AtomicU64::new(0),
        }
    }

    /// Attach the handle rendered by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Assess one submission, logging and counting the outcome
pub fn run_assessment(state: &AppState, raw: &RawInput) -> Result<RiskAssessment, ApiError> {
    match state.engine.assess(raw).map_err(ApiError::from) {
        Ok(assessment) => {
            telemetry::record_assessment(&assessment);
            state.assessment_count.fetch_add(1, Ordering::Relaxed);
            info!(
                id = %assessment.id,
                risk_level = assessment.risk_level.as_str(),
                probability = assessment.probability,
                "Assessment complete"
            );
            Ok(assessment)
        }
        Err(err @ ApiError::InvalidInput(_)) => {
            telemetry::record_rejection();
            warn!("Rejected submission: {}", err);
            Err(err)
        }
        Err(err) => {
            error!("Assessment failed: {}", err);
            Err(err)
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub threshold: f64,
    pub feature_count: usize,
    pub assessment_count: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::form::show_form))
        .route("/assess", post(routes::form::submit_form))
        .route("/api/v1/assessments", post(routes::assessments::create_assessment))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        threshold: state.engine.threshold(),
        feature_count: FEATURE_DIMENSION,
        assessment_count: state.assessment_count.load(Ordering::Relaxed),
    })
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

/// Load the artifacts and serve until the listener fails
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let engine = InferenceEngine::load(&config.artifacts)?
        .with_threshold(config.classification.threshold)?;

    let mut state = AppState::new(engine);
    if config.metrics.enabled {
        state = state.with_metrics(telemetry::install_recorder()?);
    }

    let governor = rate_limit::create_governor_config(&config.rate_limit)?;
    let app = create_router(Arc::new(state)).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
