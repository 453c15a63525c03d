//! Risk Inference Engine
//!
//! Runs a feature vector through the pre-fit scaler and classifier artifacts
//! and turns the positive-class probability into a risk category.

mod artifact;
mod classifier;
mod engine;
mod risk;
mod scaler;

pub use artifact::{check_schema, ArtifactPaths};
pub use classifier::{Classifier, LogisticRegression};
pub use engine::InferenceEngine;
pub use risk::{format_percent, RiskAssessment, RiskLevel, DEFAULT_THRESHOLD, DISCLAIMER};
pub use scaler::{Scaler, StandardScaler};

use feature_engine::EncodeError;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },
    #[error("Schema mismatch in {artifact}: {detail}")]
    SchemaMismatch { artifact: &'static str, detail: String },
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error(transparent)]
    InvalidInput(#[from] EncodeError),
    #[error("Classification threshold {0} must lie strictly between 0 and 1")]
    InvalidThreshold(f64),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}
