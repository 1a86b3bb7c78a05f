//! API route handlers
//!
//! - Screening: single and batch assessment behind the intake policy
//! - Lookups: recommendations, rule table, reference rows, input guide
//! - Operations: active config, Prometheus counters, liveness

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config::{defaults, AppConfig};
use crate::engine::{self, Screening};
use crate::intake::{self, RawMeasurements};
use crate::report::{self, ReferenceRow};
use crate::types::{MeasurementSet, RiskTier, SeverityClass};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Active configuration (intake bounds in particular)
    pub config: Arc<AppConfig>,
    /// Evaluation counters for `/metrics`
    pub metrics: Arc<EvaluationMetrics>,
    /// Process start, for uptime
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            metrics: Arc::new(EvaluationMetrics::default()),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Counters updated by the screening handlers. Never read by the engine.
#[derive(Debug, Default)]
pub struct EvaluationMetrics {
    pub evaluations: AtomicU64,
    pub rejected: AtomicU64,
    tiers: [AtomicU64; 5],
}

impl EvaluationMetrics {
    fn record(&self, tier: RiskTier) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.tiers[tier as usize].fetch_add(1, Ordering::Relaxed);
    }

    fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn tier_count(&self, tier: RiskTier) -> u64 {
        self.tiers[tier as usize].load(Ordering::Relaxed)
    }
}

// ============================================================================
// Screening Endpoints
// ============================================================================

/// POST /api/v1/assess - Validate input, evaluate and attach advice
pub async fn assess(
    State(state): State<ApiState>,
    body: Result<Json<RawMeasurements>, JsonRejection>,
) -> Response {
    let Json(raw) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    let measurements = match intake::validate(&raw, &state.config.intake) {
        Ok(m) => m,
        Err(e) => {
            state.metrics.record_rejection();
            warn!(field = e.field(), error = %e, "Assessment rejected by intake");
            return ApiErrorResponse::validation(e.to_string(), e.field());
        }
    };

    let screening = engine::screen(&measurements);
    state.metrics.record(screening.tier);
    info!(
        score = screening.score,
        tier = screening.tier.label(),
        "Assessment complete"
    );
    ApiResponse::ok(screening)
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub count: usize,
    pub results: Vec<Screening>,
}

/// POST /api/v1/assess/batch - Validate every item, then evaluate all in parallel
///
/// One invalid item rejects the whole batch; the error names its index.
pub async fn assess_batch(
    State(state): State<ApiState>,
    body: Result<Json<Vec<RawMeasurements>>, JsonRejection>,
) -> Response {
    let Json(items) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiErrorResponse::bad_request(rejection.body_text()),
    };

    if items.is_empty() {
        return ApiErrorResponse::bad_request("batch must contain at least one item");
    }
    if items.len() > defaults::MAX_BATCH_SIZE {
        return ApiErrorResponse::payload_too_large(format!(
            "batch of {} exceeds the limit of {}",
            items.len(),
            defaults::MAX_BATCH_SIZE
        ));
    }

    let mut sets: Vec<MeasurementSet> = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        match intake::validate(raw, &state.config.intake) {
            Ok(m) => sets.push(m),
            Err(e) => {
                state.metrics.record_rejection();
                warn!(index, field = e.field(), error = %e, "Batch item rejected by intake");
                return ApiErrorResponse::validation(format!("item {index}: {e}"), e.field());
            }
        }
    }

    let results: Vec<Screening> = engine::evaluate_batch(&sets)
        .into_iter()
        .map(Screening::from)
        .collect();
    for s in &results {
        state.metrics.record(s.tier);
    }
    info!(count = results.len(), "Batch assessment complete");

    ApiResponse::ok(BatchResponse {
        count: results.len(),
        results,
    })
}

// ============================================================================
// Lookup Endpoints
// ============================================================================

/// GET /api/v1/recommendations/:severity
pub async fn get_recommendation(Path(severity): Path<String>) -> Response {
    match severity.parse::<SeverityClass>() {
        Ok(s) => ApiResponse::ok(engine::recommend(s)),
        Err(e) => ApiErrorResponse::not_found(e.to_string()),
    }
}

/// GET /api/v1/rules
pub async fn get_rules() -> Response {
    ApiResponse::ok(engine::rule_table())
}

#[derive(Debug, Serialize)]
pub struct ReferenceResponse {
    pub normal: ReferenceRow,
    pub high: ReferenceRow,
}

/// GET /api/v1/reference - Reference rows used by the comparison chart
pub async fn get_reference() -> Response {
    ApiResponse::ok(ReferenceResponse {
        normal: report::NORMAL_LIMITS,
        high: report::HIGH_LIMITS,
    })
}

/// GET /api/v1/guide
pub async fn get_guide() -> Response {
    ApiResponse::ok(report::input_guide())
}

/// GET /api/v1/config - Active configuration
pub async fn get_config(State(state): State<ApiState>) -> Response {
    ApiResponse::ok(&*state.config)
}

// ============================================================================
// Operations
// ============================================================================

/// GET /api/v1/metrics
///
/// Runtime counters in Prometheus text format (version 0.0.4).
pub async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let m = &state.metrics;
    let mut body = String::with_capacity(1024);

    body.push_str("# HELP diabetes_check_evaluations_total Measurement sets scored\n");
    body.push_str("# TYPE diabetes_check_evaluations_total counter\n");
    body.push_str(&format!(
        "diabetes_check_evaluations_total {}\n",
        m.evaluations.load(Ordering::Relaxed)
    ));

    body.push_str("# HELP diabetes_check_rejected_total Requests rejected by intake validation\n");
    body.push_str("# TYPE diabetes_check_rejected_total counter\n");
    body.push_str(&format!(
        "diabetes_check_rejected_total {}\n",
        m.rejected.load(Ordering::Relaxed)
    ));

    body.push_str("# HELP diabetes_check_tier_total Evaluations per risk tier\n");
    body.push_str("# TYPE diabetes_check_tier_total counter\n");
    for tier in RiskTier::ALL {
        body.push_str(&format!(
            "diabetes_check_tier_total{{tier=\"{}\"}} {}\n",
            tier.label(),
            m.tier_count(tier)
        ));
    }

    body.push_str("# HELP diabetes_check_uptime_seconds Process uptime in seconds\n");
    body.push_str("# TYPE diabetes_check_uptime_seconds gauge\n");
    body.push_str(&format!("diabetes_check_uptime_seconds {}\n", state.uptime_secs()));

    (
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health - Liveness
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_secs(),
    })
}
