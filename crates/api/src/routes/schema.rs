//! Schema Route

use axum::{extract::State, Json};
use data_validator::FieldDomain;
use feature_engine::FEATURE_NAMES;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Response for the schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    /// Feature vector columns in model order
    pub features: Vec<&'static str>,
    /// Declared domains of bounded answers
    pub domains: Vec<FieldDomain>,
    /// Probability above which a result is High Risk
    pub threshold: f64,
}

/// Get the feature schema and field domains
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        features: FEATURE_NAMES.to_vec(),
        domains: state.engine.encoder().validator().domains(),
        threshold: state.engine.threshold(),
    })
}
