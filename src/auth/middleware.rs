//! Auth gate for Axum.
//!
//! Runs before every protected handler. A request either carries a valid
//! bearer token and is passed through unchanged, or is answered with
//! `401 {"error": "Unauthorized"}` and the handler never runs. No identity is
//! injected into the request.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::verifier::TokenVerifier;
use crate::gateway::types::ApiError;

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Authorized,
    Unauthorized,
}

/// Raw `Authorization` header value, if present and valid ASCII.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Decide whether `headers` carry a valid token for `verifier`.
pub fn authorize(verifier: &TokenVerifier, headers: &HeaderMap) -> GateDecision {
    match verifier.inspect(authorization_header(headers)) {
        Ok(_) => GateDecision::Authorized,
        Err(reason) => {
            tracing::debug!(reason = reason.name(), "Rejected bearer token");
            GateDecision::Unauthorized
        }
    }
}

/// Middleware entry point; state is the verifier for the route group.
pub async fn auth_gate(
    State(verifier): State<Arc<TokenVerifier>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    match authorize(&verifier, request.headers()) {
        GateDecision::Authorized => Ok(next.run(request).await),
        GateDecision::Unauthorized => {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Unauthorized request"
            );
            Err(ApiError::unauthorized())
        }
    }
}
