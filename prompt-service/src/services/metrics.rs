//! Prometheus metrics for prompt-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec,
    HistogramVec, IntCounter, TextEncoder,
};
use std::sync::OnceLock;

/// Handle to the global `metrics` recorder fed by the HTTP middleware.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Outbound Gemini calls by outcome (success, transport, upstream, malformed_response).
pub static GEMINI_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "prompt_gemini_requests_total",
        "Total number of outbound Gemini API calls",
        &["outcome"]
    )
    .expect("Failed to register gemini_requests_total")
});

/// Outbound Gemini call latency.
pub static GEMINI_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "prompt_gemini_request_duration_seconds",
        "Gemini API call duration in seconds",
        &["outcome"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to register gemini_request_duration")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "prompt_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

pub static USERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("prompt_users_created_total", "Total number of users created")
        .expect("Failed to register users_created_total")
});

/// Install the `metrics` recorder and force the Prometheus statics.
///
/// Safe to call more than once; only the first call installs the recorder.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!("Failed to install Prometheus recorder: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        }
    });

    Lazy::force(&GEMINI_REQUESTS_TOTAL);
    Lazy::force(&GEMINI_REQUEST_DURATION);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&USERS_CREATED_TOTAL);
}

/// Get metrics in Prometheus text format: HTTP metrics from the recorder
/// followed by the service's own registry.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    output.push_str(&encoder.encode_to_string(&metric_families).unwrap_or_default());
    output
}
