//! Risk Classification

use chrono::{DateTime, Utc};
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Positive-class probability above which a submission is High Risk
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Shown alongside every result
pub const DISCLAIMER: &str =
    "Disclaimer: This is a statistical model for educational use and not a medical diagnosis.";

/// Risk category derived from the positive-class probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    /// Classify a probability. The comparison is strict: a probability equal
    /// to the threshold is Low Risk.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability > threshold {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// Follow-up message shown under the result
    pub fn advice(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Your indicators suggest you are currently in a lower risk category for diabetes."
            }
            RiskLevel::High => {
                "Your health profile shows a strong correlation with diabetic indicators. \
                 Please consult a medical professional for a formal screening."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Format a probability as a percentage with one decimal place
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Outcome of one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Unique identifier
    pub id: Uuid,
    /// Probability of the positive (diabetic) class
    pub probability: f64,
    /// Risk classification
    pub risk_level: RiskLevel,
    /// Probability of the reported class
    pub confidence: f64,
    /// Encoded features the model saw, before scaling
    pub features: FeatureVector,
    /// Time of assessment
    pub created_at: DateTime<Utc>,
    /// Scaling and classification latency in milliseconds
    pub latency_ms: f64,
}

impl RiskAssessment {
    /// Create an assessment from the positive-class probability
    pub fn new(probability: f64, threshold: f64, features: FeatureVector) -> Self {
        let risk_level = RiskLevel::from_probability(probability, threshold);
        let confidence = match risk_level {
            RiskLevel::High => probability,
            RiskLevel::Low => 1.0 - probability,
        };

        Self {
            id: Uuid::new_v4(),
            probability,
            risk_level,
            confidence,
            features,
            created_at: Utc::now(),
            latency_ms: 0.0,
        }
    }

    /// One-line result, e.g. "High Risk Identified: 73.2%"
    pub fn headline(&self) -> String {
        match self.risk_level {
            RiskLevel::High => format!("High Risk Identified: {}", format_percent(self.probability)),
            RiskLevel::Low => format!(
                "Low Risk Identified: {} Confidence",
                format_percent(self.confidence)
            ),
        }
    }
}
