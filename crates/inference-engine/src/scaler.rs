//! Feature Scaling

use crate::artifact::{load_json, read_json};
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Pre-fit normalization applied to a feature vector before classification
pub trait Scaler: Send + Sync {
    /// Number of input columns the scaler was fit on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, if any
    fn feature_names(&self) -> Option<&[String]>;

    /// Scale one row
    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// Standardization `(x - mean) / scale`, as exported from a fitted
/// scikit-learn `StandardScaler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
    #[serde(alias = "mean_")]
    mean: Vec<f64>,
    #[serde(alias = "scale_")]
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from per-column mean and scale
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, InferenceError> {
        let scaler = Self {
            feature_names: None,
            mean,
            scale,
        };
        scaler.check("inline")?;
        Ok(scaler)
    }

    /// Pass-through scaler for `n` columns
    pub fn identity(n: usize) -> Self {
        Self {
            feature_names: None,
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        }
    }

    /// Attach fit-time column names
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Read a scaler export from a reader
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self, InferenceError> {
        let scaler: Self = read_json(reader, source)?;
        scaler.check(source)?;
        Ok(scaler)
    }

    /// Read a scaler export from a file
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let scaler: Self = load_json(path)?;
        scaler.check(&path.display().to_string())?;
        info!("Loaded standard scaler with {} features", scaler.mean.len());
        Ok(scaler)
    }

    /// Internal consistency of the export
    fn check(&self, source: &str) -> Result<(), InferenceError> {
        let fail = |reason: String| InferenceError::ArtifactLoad {
            path: source.to_string(),
            reason,
        };

        if self.mean.len() != self.scale.len() {
            return Err(fail(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(fail(format!("mean[{}] is not finite", i)));
        }
        if let Some(i) = self.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(fail(format!("scale[{}] must be finite and non-zero", i)));
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn transform(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if x.len() != self.mean.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.mean.len(),
                actual: x.len(),
            });
        }
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize() {
        let scaler = StandardScaler::new(vec![1.0, 10.0], vec![2.0, 5.0]).unwrap();
        let scaled = scaler.transform(&[3.0, 0.0]).unwrap();
        assert_eq!(scaled, vec![1.0, -2.0]);
    }

    #[test]
    fn test_identity() {
        let scaler = StandardScaler::identity(3);
        assert_eq!(scaler.transform(&[1.5, 0.0, -2.0]).unwrap(), vec![1.5, 0.0, -2.0]);
    }

    #[test]
    fn test_wrong_row_length() {
        let scaler = StandardScaler::identity(3);
        assert!(matches!(
            scaler.transform(&[1.0]),
            Err(InferenceError::InvalidInputShape { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![1.0, 1.0]).is_err());
    }

    #[test]
    fn test_sklearn_attribute_names() {
        let json = br#"{"feature_names_in_": ["a", "b"], "mean_": [0.5, 2.0], "scale_": [0.5, 1.0]}"#;
        let scaler = StandardScaler::from_reader(&json[..], "inline").unwrap();
        assert_eq!(scaler.n_features(), 2);
        assert_eq!(scaler.feature_names().unwrap()[1], "b");
        assert_eq!(scaler.transform(&[1.0, 2.0]).unwrap(), vec![1.0, 0.0]);
    }
}
