//! Assessment Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use feature_engine::RawInput;
use inference_engine::{format_percent, RiskAssessment, DISCLAIMER};
use serde::Serialize;
use std::sync::Arc;

use crate::{run_assessment, ApiError, AppState};

/// Response for the assessments endpoint
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub label: &'static str,
    pub headline: String,
    pub probability_percent: String,
    pub disclaimer: &'static str,
}

impl From<RiskAssessment> for AssessmentResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            label: assessment.risk_level.label(),
            headline: assessment.headline(),
            probability_percent: format_percent(assessment.probability),
            disclaimer: DISCLAIMER,
            assessment,
        }
    }
}

/// Assess one JSON-encoded submission
pub async fn create_assessment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let Json(raw) = payload.map_err(|rejection| ApiError::Malformed {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;

    let assessment = run_assessment(&state, &raw)?;
    Ok(Json(assessment.into()))
}
