pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{any, get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use utoipa::OpenApi;

use crate::auth::auth_gate;
use state::AppState;
use types::{ApiError, method_not_allowed};

/// Build the complete API router.
///
/// Method handling differs per group:
/// - `/api/login` answers 405 for anything but POST, no auth involved
/// - `/api/verify` accepts every method
/// - `/api/invoices*` authenticates first, then rejects unsupported methods
/// - `/api/email` rejects non-POST before authenticating
pub fn build_router(state: Arc<AppState>) -> Router {
    let invoices_gate = from_fn_with_state(state.verifiers.invoices.clone(), auth_gate);
    let email_gate = from_fn_with_state(state.verifiers.email.clone(), auth_gate);

    // ==========================================================================
    // Auth Routes (no gate)
    // ==========================================================================
    let auth_routes = Router::new()
        .route("/login", post(handlers::login).fallback(method_not_allowed))
        .route("/verify", any(handlers::verify));

    // ==========================================================================
    // Invoice Routes (gate wraps the 405 fallback too)
    // ==========================================================================
    let invoice_routes = Router::new()
        .route(
            "/invoices",
            get(handlers::list_invoices)
                .post(handlers::create_invoice)
                .fallback(method_not_allowed)
                .layer(invoices_gate.clone()),
        )
        .route(
            "/invoices/{id}",
            get(handlers::get_invoice)
                .put(handlers::update_invoice)
                .delete(handlers::delete_invoice)
                .fallback(method_not_allowed)
                .layer(invoices_gate),
        );

    // ==========================================================================
    // Email Route (405 before the gate)
    // ==========================================================================
    let email_routes = Router::new().route(
        "/email",
        post(handlers::send_email)
            .route_layer(email_gate)
            .fallback(method_not_allowed),
    );

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .nest(
            "/api",
            auth_routes.merge(invoice_routes).merge(email_routes),
        )
        .fallback(not_found)
        .with_state(state)
        .route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Start the HTTP gateway and serve until Ctrl-C
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    tracing::info!(%addr, "Gateway listening");
    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 OpenAPI: http://{}/api-docs/openapi.json", addr);
    println!("🔓 Public:  /api/login, /api/verify, /api/health");
    println!("🔒 Private: /api/invoices*, /api/email (auth required)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
