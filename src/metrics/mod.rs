//! Prometheus metrics for the athletics tool server
//!
//! This module tracks:
//! - Tool calls by tool name and outcome
//! - Page loads by page type and outcome, with load duration
//! - Page sessions currently open
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails or never happens, metric operations are no-ops.

use prometheus::{
    register_counter_vec, register_gauge, register_histogram_vec, CounterVec, Encoder, Gauge,
    HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

struct ServerMetrics {
    tool_calls: CounterVec,
    page_loads: CounterVec,
    page_load_duration: HistogramVec,
    open_sessions: Gauge,
}

static SERVER_METRICS: OnceLock<ServerMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// Safe to call more than once; only the first call registers.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = athletics_mcp::metrics::init_metrics() {
///     tracing::warn!(error = %e, "Metrics initialization failed");
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = ServerMetrics {
        tool_calls: register_counter_vec!(
            "athletics_tool_calls_total",
            "Total tool calls by tool and status",
            &["tool", "status"]
        )?,
        page_loads: register_counter_vec!(
            "athletics_page_loads_total",
            "Total page loads by page type and status",
            &["page", "status"]
        )?,
        page_load_duration: register_histogram_vec!(
            "athletics_page_load_duration_seconds",
            "Page load duration in seconds",
            &["page"],
            vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
        )?,
        open_sessions: register_gauge!(
            "athletics_open_page_sessions",
            "Number of page sessions currently open"
        )?,
    };

    SERVER_METRICS
        .set(metrics)
        .map_err(|_| "Server metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    SERVER_METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a tool call outcome
pub fn record_tool_call(tool: &str, success: bool) {
    if let Some(m) = SERVER_METRICS.get() {
        let status = if success { "ok" } else { "error" };
        m.tool_calls.with_label_values(&[tool, status]).inc();
    }
}

/// Record a page load outcome and its duration
pub fn record_page_load(page: &str, success: bool, duration_secs: f64) {
    let Some(m) = SERVER_METRICS.get() else {
        return;
    };

    let status = if success { "ok" } else { "error" };
    m.page_loads.with_label_values(&[page, status]).inc();
    m.page_load_duration
        .with_label_values(&[page])
        .observe(duration_secs);
}

/// Page session opened
pub fn session_opened() {
    if let Some(m) = SERVER_METRICS.get() {
        m.open_sessions.inc();
    }
}

/// Page session released
pub fn session_closed() {
    if let Some(m) = SERVER_METRICS.get() {
        m.open_sessions.dec();
    }
}
