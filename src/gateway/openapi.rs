//! OpenAPI documentation
//!
//! Served as JSON at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::LoginRequest;
use crate::email::EmailRequest;
use crate::gateway::handlers::{EmailSent, HealthResponse, LoginResponse, VerifyResponse};
use crate::gateway::types::{ErrorBody, MessageBody};
use crate::invoices::{CreatedInvoice, Invoice, InvoicePayload, InvoiceSummary};

/// Signed bearer token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            r#"Token from POST /api/login: {base64(username:issued_at_ms)}.{hex(hmac_sha256)}

Example: Bearer YWxpY2U6MTcwMDAwMDAwMDAwMA==.3f1c..."#,
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invoice Desk API",
        version = "0.1.0",
        description = "Backend for a browser-based invoice editor.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::auth::login,
        crate::gateway::handlers::auth::verify,
        crate::gateway::handlers::invoices::list_invoices,
        crate::gateway::handlers::invoices::create_invoice,
        crate::gateway::handlers::invoices::get_invoice,
        crate::gateway::handlers::invoices::update_invoice,
        crate::gateway::handlers::invoices::delete_invoice,
        crate::gateway::handlers::email::send_email,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            MessageBody,
            LoginRequest,
            LoginResponse,
            VerifyResponse,
            Invoice,
            InvoiceSummary,
            InvoicePayload,
            CreatedInvoice,
            EmailRequest,
            EmailSent,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and token checks"),
        (name = "Invoices", description = "Saved invoices (auth required)"),
        (name = "Email", description = "Send an invoice PDF (auth required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
