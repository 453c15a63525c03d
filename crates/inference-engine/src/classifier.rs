//! Binary Classifier

use crate::artifact::{load_json, read_json};
use crate::InferenceError;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Pre-trained binary model returning class probabilities
pub trait Classifier: Send + Sync {
    /// Number of input columns the model was trained on
    fn n_features(&self) -> usize;

    /// Column names recorded at training time, if any
    fn feature_names(&self) -> Option<&[String]>;

    /// `[P(negative), P(positive)]` for one scaled row
    fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2], InferenceError>;
}

/// Coefficients may be exported flat or as scikit-learn's one-row matrix
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Coefficients {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Array(Vec<f64>),
}

/// Model file as written by the export script
#[derive(Debug, Clone, Deserialize)]
struct LogisticRegressionExport {
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
    #[serde(alias = "coef_")]
    coefficients: Coefficients,
    #[serde(alias = "intercept_")]
    intercept: Intercept,
}

fn default_kind() -> String {
    LogisticRegression::KIND.to_string()
}

impl LogisticRegressionExport {
    fn into_model(self, source: &str) -> Result<LogisticRegression, InferenceError> {
        let fail = |reason: String| InferenceError::ArtifactLoad {
            path: source.to_string(),
            reason,
        };

        if self.kind != LogisticRegression::KIND {
            return Err(fail(format!(
                "unsupported model kind {:?}, expected {:?}",
                self.kind,
                LogisticRegression::KIND
            )));
        }

        let coefficients = match self.coefficients {
            Coefficients::Flat(c) => c,
            Coefficients::Rows(mut rows) if rows.len() == 1 => rows.remove(0),
            Coefficients::Rows(rows) => {
                return Err(fail(format!("expected one coefficient row, found {}", rows.len())))
            }
        };
        let intercept = match self.intercept {
            Intercept::Scalar(b) => b,
            Intercept::Array(b) if b.len() == 1 => b[0],
            Intercept::Array(b) => {
                return Err(fail(format!("expected one intercept, found {}", b.len())))
            }
        };

        let mut model = LogisticRegression::new(coefficients, intercept).map_err(|e| match e {
            InferenceError::ArtifactLoad { reason, .. } => fail(reason),
            other => other,
        })?;
        model.feature_names = self.feature_names;
        Ok(model)
    }
}

/// Logistic regression: `P(positive) = sigmoid(w · x + b)`
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    feature_names: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Value of the `kind` field in the export
    pub const KIND: &'static str = "logistic_regression";

    /// Create a model from weights and bias
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(InferenceError::ArtifactLoad {
                path: "inline".to_string(),
                reason: format!("coefficient {} is not finite", i),
            });
        }
        if !intercept.is_finite() {
            return Err(InferenceError::ArtifactLoad {
                path: "inline".to_string(),
                reason: "intercept is not finite".to_string(),
            });
        }
        Ok(Self {
            feature_names: None,
            coefficients,
            intercept,
        })
    }

    /// Attach training-time column names
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Read a model export from a reader
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self, InferenceError> {
        let export: LogisticRegressionExport = read_json(reader, source)?;
        export.into_model(source)
    }

    /// Read a model export from a file
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let export: LogisticRegressionExport = load_json(path)?;
        let model = export.into_model(&path.display().to_string())?;
        info!(
            "Loaded logistic regression with {} coefficients",
            model.coefficients.len()
        );
        Ok(model)
    }

    /// Raw decision value `w · x + b`
    pub fn decision_function(&self, x: &[f64]) -> Result<f64, InferenceError> {
        if x.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: x.len(),
            });
        }
        Ok(self
            .coefficients
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, x: &[f64]) -> Result<[f64; 2], InferenceError> {
        let p = sigmoid(self.decision_function(x)?);
        Ok([1.0 - p, p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_decision_is_even_odds() {
        let model = LogisticRegression::new(vec![1.0, -1.0], 0.0).unwrap();
        let [neg, pos] = model.predict_proba(&[2.0, 2.0]).unwrap();
        assert!((pos - 0.5).abs() < 1e-12);
        assert!((neg - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = LogisticRegression::new(vec![0.7, 0.2], -0.3).unwrap();
        let [neg, pos] = model.predict_proba(&[1.5, -4.0]).unwrap();
        assert!((neg + pos - 1.0).abs() < 1e-12);
        assert!(pos < 0.5);
    }

    #[test]
    fn test_sklearn_matrix_export() {
        let json = br#"{"coef_": [[0.5, 0.25]], "intercept_": [-1.0]}"#;
        let model = LogisticRegression::from_reader(&json[..], "inline").unwrap();
        assert_eq!(model.n_features(), 2);
        assert!((model.decision_function(&[2.0, 4.0]).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = br#"{"kind": "random_forest", "coefficients": [1.0], "intercept": 0.0}"#;
        let err = LogisticRegression::from_reader(&json[..], "model.json").unwrap_err();
        assert!(err.to_string().contains("random_forest"));
    }

    #[test]
    fn test_multi_row_coefficients_rejected() {
        let json = br#"{"coefficients": [[1.0], [2.0]], "intercept": 0.0}"#;
        assert!(LogisticRegression::from_reader(&json[..], "inline").is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let model = LogisticRegression::new(vec![1.0; 3], 0.0).unwrap();
        assert!(matches!(
            model.predict_proba(&[1.0; 2]),
            Err(InferenceError::InvalidInputShape { expected: 3, actual: 2 })
        ));
    }
}
