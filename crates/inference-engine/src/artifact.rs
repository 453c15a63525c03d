//! Artifact Files
//!
//! The scaler and classifier are fit offline and exported as JSON. Both are
//! read once at startup; any problem here is fatal to the caller.

use crate::InferenceError;
use feature_engine::{FEATURE_DIMENSION, FEATURE_NAMES};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locations of the two exported artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Fitted standard scaler
    pub scaler_path: PathBuf,
    /// Fitted classifier
    pub model_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("models/scaler.json"),
            model_path: PathBuf::from("models/diabetes_model.json"),
        }
    }
}

/// Deserialize an artifact from any reader. `source` names it in errors.
pub(crate) fn read_json<T, R>(reader: R, source: &str) -> Result<T, InferenceError>
where
    T: DeserializeOwned,
    R: Read,
{
    serde_json::from_reader(reader).map_err(|e| InferenceError::ArtifactLoad {
        path: source.to_string(),
        reason: e.to_string(),
    })
}

/// Open and deserialize an artifact file
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InferenceError> {
    let shown = path.display().to_string();
    info!("Loading artifact from {}", shown);

    let file = File::open(path).map_err(|e| InferenceError::ArtifactLoad {
        path: shown.clone(),
        reason: e.to_string(),
    })?;
    read_json(BufReader::new(file), &shown)
}

/// Check that an artifact was fit on the encoder's feature schema.
///
/// The feature count must be exactly 21 and, when the artifact recorded
/// column names, they must equal the training order name for name.
pub fn check_schema(
    artifact: &'static str,
    n_features: usize,
    names: Option<&[String]>,
) -> Result<(), InferenceError> {
    if n_features != FEATURE_DIMENSION {
        return Err(InferenceError::SchemaMismatch {
            artifact,
            detail: format!("expects {} features, encoder produces {}", n_features, FEATURE_DIMENSION),
        });
    }

    if let Some(names) = names {
        if names.len() != FEATURE_DIMENSION {
            return Err(InferenceError::SchemaMismatch {
                artifact,
                detail: format!("lists {} feature names, expected {}", names.len(), FEATURE_DIMENSION),
            });
        }
        if let Some((i, (got, want))) = names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
            .find(|(_, (got, want))| got.as_str() != **want)
        {
            return Err(InferenceError::SchemaMismatch {
                artifact,
                detail: format!("column {} is {:?}, expected {:?}", i, got, want),
            });
        }
    } else {
        debug!("{} carries no feature names; checked count only", artifact);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_accepts_training_order() {
        assert!(check_schema("scaler", 21, Some(&schema_names())).is_ok());
        assert!(check_schema("scaler", 21, None).is_ok());
    }

    #[test]
    fn test_schema_rejects_wrong_count() {
        let err = check_schema("classifier", 20, None).unwrap_err();
        assert!(matches!(err, InferenceError::SchemaMismatch { artifact: "classifier", .. }));
    }

    #[test]
    fn test_schema_rejects_reordered_columns() {
        let mut names = schema_names();
        names.swap(18, 19);
        let err = check_schema("scaler", 21, Some(&names)).unwrap_err();
        assert!(err.to_string().contains("column 18"));
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let result: Result<serde_json::Value, _> =
            load_json(Path::new("/nonexistent/diabetes/scaler.json"));
        assert!(matches!(result, Err(InferenceError::ArtifactLoad { .. })));
    }

    #[test]
    fn test_corrupt_json_is_load_failure() {
        let result: Result<serde_json::Value, _> = read_json(&b"{not json"[..], "inline");
        match result {
            Err(InferenceError::ArtifactLoad { path, .. }) => assert_eq!(path, "inline"),
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }
}
