//! Invoice email relay

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use super::parse_lenient;
use crate::email::{EmailError, EmailRequest};

pub const MISSING_RESEND_API_KEY: &str = "Server configuration error (missing RESEND_API_KEY)";
pub const SEND_FAILED: &str = "Internal server error while sending email";

/// Provider accepted the message
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailSent {
    pub success: bool,
    /// Provider message id
    #[schema(example = "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794")]
    pub id: String,
}

/// Email the rendered invoice PDF
#[utoipa::path(
    post,
    path = "/api/email",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Email sent", body = EmailSent),
        (status = 400, description = "Missing required fields", body = super::super::types::ErrorBody),
        (status = 401, description = "Unauthorized", body = super::super::types::ErrorBody),
        (status = 405, description = "Method not allowed", body = super::super::types::ErrorBody),
        (status = 500, description = "Configuration or transport error", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Email"
)]
pub async fn send_email(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<EmailSent> {
    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| ApiError::internal(MISSING_RESEND_API_KEY))?;

    let req: EmailRequest = parse_lenient(&body);
    let email = req.validate().map_err(ApiError::bad_request)?;

    match mailer.send(&email).await {
        Ok(id) => ok(EmailSent { success: true, id }),
        Err(EmailError::Rejected { status, message }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Err(ApiError::new(status, message))
        }
        Err(e @ EmailError::Transport(_)) => {
            tracing::error!(error = %e, "Email send exception");
            Err(ApiError::internal(SEND_FAILED))
        }
    }
}
