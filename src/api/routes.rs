//! API route definitions
//!
//! - /api/v1/assess - Single screening
//! - /api/v1/assess/batch - Batch screening
//! - /api/v1/recommendations/:severity - Advice bundle lookup
//! - /api/v1/rules, /reference, /guide - Static tables
//! - /api/v1/config, /metrics - Operations

use axum::{routing::{get, post}, Router};

use super::handlers::{self, ApiState};

/// Create all API routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        // Screening
        .route("/assess", post(handlers::assess))
        .route("/assess/batch", post(handlers::assess_batch))
        // Lookups
        .route("/recommendations/:severity", get(handlers::get_recommendation))
        .route("/rules", get(handlers::get_rules))
        .route("/reference", get(handlers::get_reference))
        .route("/guide", get(handlers::get_guide))
        // Operations
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state)
}

/// Liveness endpoint at root level
pub fn health_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
