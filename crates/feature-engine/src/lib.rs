//! Feature Engineering Engine
//!
//! Maps a user's questionnaire answers onto the exact ordered feature vector
//! the diabetes classifier was trained on.

mod age;
mod features;
mod input;

pub use age::{age_bucket, AGE_BUCKETS, OPEN_AGE_BUCKET};
pub use features::{Feature, FeatureEncoder, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
pub use input::{RawInput, Sex};

use data_validator::ValidationError;
use thiserror::Error;

/// Errors during feature encoding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// One or more answers fall outside their declared domain
    #[error("Invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),
    /// Vector built from raw values has the wrong length
    #[error("Invalid feature dimension: expected {expected}, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
