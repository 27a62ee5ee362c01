//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;
use crate::auth::login::now_ms;

/// Health check response data
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// Short git hash of the build
    pub build: &'static str,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// Pings the invoice store. Never exposes the failure detail.
///
/// - Healthy: 200 OK + {status: "ok", ...}
/// - Unhealthy: 503 Service Unavailable + {status: "unavailable", ...}
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Service unavailable", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match state.invoices.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("[HEALTH] Invoice store ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            build: env!("INVOICE_DESK_BUILD"),
            timestamp_ms: now_ms(),
        }),
    )
}
