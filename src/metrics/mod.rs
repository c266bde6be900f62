//! # Metrics
//!
//! Prometheus export for the recommendation pipeline.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `dishpick_recommendations_total{source, degraded}` - Answers served
//! - `dishpick_fallbacks_total{reason}` - Departures from the primary path
//!
//! **Histograms:**
//! - `dishpick_recommend_duration_seconds` - End-to-end pipeline latency
//!
//! The counters are recorded by [`Recommender`](crate::recommend::Recommender);
//! this module only installs the recorder and serves `GET /metrics`.

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Latency buckets in seconds. Rule-only answers land in the first bucket,
/// model-backed ones between 0.5 s and the 30 s client timeout.
const DURATION_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.025, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
];

/// Install the global Prometheus recorder.
///
/// Returns a PrometheusHandle that can be used to render metrics. Fails if a
/// recorder is already installed.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("dishpick_recommend_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    describe_metrics();
    Ok(handle)
}

/// Install the global recorder, or build a detached handle when one is
/// already installed (tests create several servers in one process).
pub fn setup_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}

fn describe_metrics() {
    metrics::describe_counter!(
        "dishpick_recommendations_total",
        "Recommendations served, by source and degradation"
    );
    metrics::describe_counter!(
        "dishpick_fallbacks_total",
        "Recommendations that left the primary path, by reason"
    );
    metrics::describe_histogram!(
        "dishpick_recommend_duration_seconds",
        metrics::Unit::Seconds,
        "End-to-end recommendation latency"
    );
}
