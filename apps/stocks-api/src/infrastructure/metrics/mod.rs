//! Prometheus Metrics Module
//!
//! Exposes request and upstream metrics in Prometheus text format at
//! `/metrics`.
//!
//! # Metrics
//!
//! - `stocks_api_requests_total{format, outcome}`: requests by result
//! - `stocks_api_upstream_fetch_seconds{result}`: upstream fetch latency

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and describe all metrics.
///
/// Subsequent calls return the already-installed handle.
///
/// # Errors
///
/// Returns `BuildError` if another global recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "stocks_api_requests_total",
        "Total snapshot requests by format and outcome"
    );
    describe_histogram!(
        "stocks_api_upstream_fetch_seconds",
        "Time spent fetching the upstream feed"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Outcome label for a served request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// 200 with a rendered body.
    Ok,
    /// 304, client copy is current.
    NotModified,
    /// Any failure, labelled by its error code.
    Failed(crate::error::ErrorCode),
}

impl RequestOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotModified => "not_modified",
            Self::Failed(code) => code.outcome(),
        }
    }
}

/// Record a served snapshot request. `format` is the requested suffix, or
/// `unknown` when none was resolved.
pub fn record_request(format: &'static str, outcome: RequestOutcome) {
    counter!(
        "stocks_api_requests_total",
        "format" => format,
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record an upstream fetch attempt duration.
pub fn record_fetch_duration(duration: Duration, succeeded: bool) {
    histogram!(
        "stocks_api_upstream_fetch_seconds",
        "result" => if succeeded { "ok" } else { "error" }
    )
    .record(duration.as_secs_f64());
}

// =============================================================================
// Tests
// =============================================================================
