//! HTTP handlers
//!
//! - `auth`: login and token verification (no gate)
//! - `invoices`: invoice CRUD (gated)
//! - `email`: invoice email relay (gated, strict secret by default)
//! - `health`: liveness

pub mod auth;
pub mod email;
pub mod health;
pub mod invoices;

use serde::de::DeserializeOwned;

pub use auth::{LoginResponse, VerifyResponse, login, verify};
pub use email::{EmailSent, send_email};
pub use health::{HealthResponse, health_check};
pub use invoices::{create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice};

/// Parse a JSON body, treating an empty or unparseable body as `T::default()`.
///
/// Clients are not required to send `Content-Type: application/json`.
pub(crate) fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring unparseable request body");
        T::default()
    })
}
