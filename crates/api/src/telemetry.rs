//! Logging and Metrics

use crate::config::LoggingConfig;
use crate::ApiError;
use inference_engine::RiskAssessment;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.max_level()?)
        .with_target(true);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.map_err(|e| ApiError::Telemetry(format!("tracing subscriber: {}", e)))
}

/// Install the global Prometheus recorder
pub fn install_recorder() -> Result<PrometheusHandle, ApiError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Telemetry(format!("prometheus recorder: {}", e)))?;

    metrics::describe_counter!("risk_assessments_total", "Completed risk assessments by level");
    metrics::describe_counter!("risk_rejected_inputs_total", "Submissions rejected as invalid input");
    metrics::describe_histogram!(
        "risk_assessment_latency_seconds",
        "Time spent scaling and classifying one submission"
    );
    Ok(handle)
}

pub(crate) fn record_assessment(assessment: &RiskAssessment) {
    metrics::counter!("risk_assessments_total", "risk_level" => assessment.risk_level.as_str())
        .increment(1);
    metrics::histogram!("risk_assessment_latency_seconds")
        .record(latency_seconds(assessment));
}

fn latency_seconds(assessment: &RiskAssessment) -> f64 {
    assessment.latency_ms / 1000.0
}

pub(crate) fn record_rejection() {
    metrics::counter!("risk_rejected_inputs_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{FeatureVector, FEATURE_DIMENSION};
    use inference_engine::DEFAULT_THRESHOLD;

    #[test]
    fn test_sub_millisecond_latency_is_kept() {
        let features = FeatureVector::from_slice(&[0.0; FEATURE_DIMENSION]).unwrap();
        let mut assessment = RiskAssessment::new(0.2, DEFAULT_THRESHOLD, features);
        assessment.latency_ms = 0.042;
        let seconds = latency_seconds(&assessment);
        assert!(seconds > 0.0);
        assert!((seconds - 0.000042).abs() < 1e-12);
    }
}
