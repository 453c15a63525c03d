//! Inference Engine Implementation

use crate::artifact::{check_schema, ArtifactPaths};
use crate::classifier::{Classifier, LogisticRegression};
use crate::risk::{RiskAssessment, DEFAULT_THRESHOLD};
use crate::scaler::{Scaler, StandardScaler};
use crate::InferenceError;
use feature_engine::{FeatureEncoder, FeatureVector, RawInput};
use tracing::{debug, info};

/// Tolerance on `P(negative) + P(positive) == 1`
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Encoder, scaler and classifier bundled for one-call assessments.
///
/// Built once at startup and never mutated afterwards, so a single instance
/// can be shared read-only between request handlers.
pub struct InferenceEngine {
    encoder: FeatureEncoder,
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    threshold: f64,
}

impl InferenceEngine {
    /// Create an engine, rejecting artifacts fit on a different schema
    pub fn new(
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, InferenceError> {
        check_schema("scaler", scaler.n_features(), scaler.feature_names())?;
        check_schema("classifier", classifier.n_features(), classifier.feature_names())?;

        if let (Some(s), Some(c)) = (scaler.feature_names(), classifier.feature_names()) {
            if s != c {
                return Err(InferenceError::SchemaMismatch {
                    artifact: "classifier",
                    detail: "feature names differ from the scaler's".to_string(),
                });
            }
        }

        Ok(Self {
            encoder: FeatureEncoder::default(),
            scaler,
            classifier,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    /// Load both artifacts from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self, InferenceError> {
        info!(
            "Creating inference engine with scaler={} model={}",
            paths.scaler_path.display(),
            paths.model_path.display()
        );
        let scaler = StandardScaler::load(&paths.scaler_path)?;
        let classifier = LogisticRegression::load(&paths.model_path)?;
        Self::new(Box::new(scaler), Box::new(classifier))
    }

    /// Override the classification threshold; must lie strictly inside (0, 1)
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, InferenceError> {
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(InferenceError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Positive-class probability for an encoded vector
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let scaled = self.scaler.transform(features.as_slice())?;
        debug!("Scaled features: {:?}", scaled);

        let [negative, positive] = self.classifier.predict_proba(&scaled)?;
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_unit(negative)
            || !in_unit(positive)
            || (negative + positive - 1.0).abs() > PROBABILITY_SUM_TOLERANCE
        {
            return Err(InferenceError::InferenceFailed(format!(
                "classifier returned invalid probabilities [{}, {}]",
                negative, positive
            )));
        }
        Ok(positive)
    }

    /// Classify an already encoded vector
    pub fn classify(&self, features: FeatureVector) -> Result<RiskAssessment, InferenceError> {
        let start = std::time::Instant::now();

        let probability = self.predict_proba(&features)?;
        let mut assessment = RiskAssessment::new(probability, self.threshold, features);
        assessment.latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            "Assessment {}: p={:.4} -> {} in {:.3}ms",
            assessment.id,
            probability,
            assessment.risk_level,
            assessment.latency_ms
        );
        Ok(assessment)
    }

    /// Run the full pipeline on one submission
    pub fn assess(&self, raw: &RawInput) -> Result<RiskAssessment, InferenceError> {
        let features = self.encoder.encode(raw)?;
        self.classify(features)
    }

    /// Encoder used by `assess`
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Classification threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
