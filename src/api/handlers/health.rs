//! `GET /health`: liveness of PostgreSQL and the sitemap cache.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports each dependency and answers 503 when any of them is down.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 3 active domains" },
///     "cache": { "status": "ok", "message": "redis" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let (database, cache) = tokio::join!(database_status(&state), cache_status(&state));

    let healthy = database.is_ok() && cache.is_ok();
    let (code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    (code, Json(body)).into_response()
}

/// Counting active domains exercises the pool and the schema at once.
async fn database_status(state: &AppState) -> CheckStatus {
    match state.domain_service.count_active().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {count} active domains")),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            CheckStatus::error(format!("Database error: {e}"))
        }
    }
}

async fn cache_status(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();
    if state.cache.health_check().await {
        CheckStatus::ok(backend)
    } else {
        tracing::warn!(backend, "Health check: cache unreachable");
        CheckStatus::error(format!("{backend} unreachable"))
    }
}
