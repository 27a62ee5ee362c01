//! Token error types.
//!
//! These never reach a client: the gate collapses every variant into a single
//! `401`. They exist so rejections can be logged with a reason.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No `Authorization` header on the request.
    #[error("missing Authorization header")]
    MissingHeader,

    /// Header present but not of the form `Bearer <token>`.
    #[error("Authorization scheme is not Bearer")]
    InvalidScheme,

    /// Structural failure: delimiter count, empty segment, bad base64,
    /// bad UTF-8, or a payload that is not `<username>:<millis>`.
    #[error("malformed token")]
    MalformedToken,

    /// Parsed cleanly but the signature does not match the payload.
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// Strict secret mode and no `APP_SECRET` configured.
    #[error("signing secret is not configured")]
    MissingSecret,
}

impl TokenError {
    /// Short machine-friendly name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Self::MissingHeader => "MISSING_HEADER",
            Self::InvalidScheme => "INVALID_SCHEME",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::SignatureMismatch => "SIGNATURE_MISMATCH",
            Self::MissingSecret => "MISSING_SECRET",
        }
    }
}
