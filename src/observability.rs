use std::net::SocketAddr;

use crate::engine::EngineError;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: admission requests accepted. No labels.
pub const ADMISSIONS_TOTAL: &str = "reserva_admissions_total";

/// Counter: admission requests rejected. Labels: reason.
pub const ADMISSIONS_REJECTED_TOTAL: &str = "reserva_admissions_rejected_total";

/// Histogram: admission latency in seconds.
pub const ADMISSION_DURATION_SECONDS: &str = "reserva_admission_duration_seconds";

/// Counter: status transitions applied. Labels: to.
pub const TRANSITIONS_TOTAL: &str = "reserva_transitions_total";

/// Counter: rejected status transitions.
pub const TRANSITIONS_REJECTED_TOTAL: &str = "reserva_transitions_rejected_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Counter: store calls retried after a pre-mutation failure.
pub const STORE_RETRIES_TOTAL: &str = "reserva_store_retries_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a rejection to a short label for metrics.
pub fn rejection_label(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidPeriod(_) => "invalid_period",
        EngineError::PastStart { .. } => "past_start",
        EngineError::ResourceNotFound(_) => "resource_not_found",
        EngineError::ResourceUnavailable(_) => "resource_unavailable",
        EngineError::Conflict { .. } => "conflict",
        EngineError::ReservationNotFound(_) => "reservation_not_found",
        EngineError::InvalidTransition { .. } => "invalid_transition",
        EngineError::InvalidDayRate(_) => "invalid_day_rate",
        EngineError::LimitExceeded(_) => "limit_exceeded",
        EngineError::StoreUnavailable(_) => "store_unavailable",
    }
}
