//! Login and token verification handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::HeaderMap};
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use super::parse_lenient;
use crate::auth::{LoginOutcome, LoginRequest, authorization_header};

pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const MISSING_APP_SECRET: &str = "Server configuration error (missing APP_SECRET)";

/// Successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "YWxpY2U6MTcwMDAwMDAwMDAwMA==.3f1c...")]
    pub token: String,
    #[schema(example = "Login successful")]
    pub message: String,
}

/// Token is valid
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Exchange the configured username/password for a bearer token
///
/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid username or password", body = super::super::types::ErrorBody),
        (status = 405, description = "Method not allowed", body = super::super::types::ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<LoginResponse> {
    let req: LoginRequest = parse_lenient(&body);

    match state.login.login(&req) {
        LoginOutcome::Issued(token) => {
            tracing::info!(
                username = req.username.as_deref().unwrap_or_default(),
                "Login succeeded"
            );
            ok(LoginResponse {
                token,
                message: LOGIN_SUCCESSFUL.to_string(),
            })
        }
        LoginOutcome::Rejected => {
            tracing::warn!(
                username = req.username.as_deref().unwrap_or_default(),
                "Login rejected"
            );
            Err(ApiError::invalid_credentials())
        }
        LoginOutcome::MissingSecret => {
            tracing::error!("Login attempted with no APP_SECRET in strict mode");
            Err(ApiError::internal(MISSING_APP_SECRET))
        }
    }
}

/// Check whether the presented bearer token is still accepted
///
/// Any method; only the `Authorization` header is read.
#[utoipa::path(
    get,
    path = "/api/verify",
    responses(
        (status = 200, description = "Token valid", body = VerifyResponse),
        (status = 401, description = "Invalid token", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Auth"
)]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<VerifyResponse> {
    if state.verifiers.verify.verify(authorization_header(&headers)) {
        ok(VerifyResponse { valid: true })
    } else {
        Err(ApiError::invalid_token())
    }
}
