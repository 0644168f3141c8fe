//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/healthz` - Basic liveness probe (immediate 200, no checks)
//! - `/readyz` - Readiness probe: pings the store and the cache. A store
//!   failure makes the probe fail; a cache failure is reported but leaves
//!   the probe green, since the service degrades rather than breaks
//!   without its cache.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// GET /api/v1/healthz - liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// GET /api/v1/readyz - readiness probe.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.resources.ping().await {
        Ok(()) => "ok".to_string(),
        Err(err) => err.to_string(),
    };
    let cache = match state.cache.ping().await {
        Ok(()) => "ok".to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "Cache ping failed");
            err.to_string()
        }
    };

    let status = if database == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "database": database,
            "cache": cache,
        })),
    )
}
