//! API response and error types
//!
//! Every error leaves the gateway as `{"error": "<message>"}` with the
//! matching HTTP status. The browser client reads `error` verbatim.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Unauthorized")]
    pub error: String,
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Invoice deleted")]
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Standard error messages
pub mod messages {
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const INVALID_TOKEN: &str = "Invalid token";
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const INVOICE_NOT_FOUND: &str = "Invoice not found";
}

/// HTTP error with a client-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Handler result type
pub type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

/// 200 OK with a JSON body
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(data)))
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Generic 401 returned by the auth gate
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED)
    }

    pub fn invalid_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, messages::INVALID_TOKEN)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, messages::INVALID_CREDENTIALS)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Shortcut for early returns from handlers
    pub fn into_err<T>(self) -> Result<T, ApiError> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Fallback for unsupported methods on a known path
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
