//! Invoice CRUD handlers
//!
//! All routes sit behind the auth gate. Storage is delegated to the
//! configured [`crate::invoices::InvoiceStore`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, MessageBody, messages, ok};
use super::parse_lenient;
use crate::invoices::{CreatedInvoice, Invoice, InvoicePayload, InvoiceSummary, StoreError};

fn store_error(op: &'static str, e: StoreError) -> ApiError {
    tracing::error!(op, error = %e, "Invoice store error");
    ApiError::internal(e.to_string())
}

/// List invoices, most recently updated first
#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "Invoice list", body = [InvoiceSummary]),
        (status = 401, description = "Unauthorized", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Invoices"
)]
pub async fn list_invoices(State(state): State<Arc<AppState>>) -> ApiResult<Vec<InvoiceSummary>> {
    match state.invoices.list().await {
        Ok(list) => ok(list),
        Err(e) => Err(store_error("list", e)),
    }
}

/// Save a new invoice
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = InvoicePayload,
    responses(
        (status = 200, description = "Invoice saved", body = CreatedInvoice),
        (status = 401, description = "Unauthorized", body = super::super::types::ErrorBody),
        (status = 500, description = "Store error", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<CreatedInvoice> {
    let payload: InvoicePayload = parse_lenient(&body);

    match state.invoices.create(payload.into_draft()).await {
        Ok(id) => {
            tracing::info!(%id, "Invoice created");
            ok(CreatedInvoice {
                id,
                message: "Invoice saved".to_string(),
            })
        }
        Err(e) => Err(store_error("create", e)),
    }
}

/// Fetch one invoice with its editor documents
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "Invoice id (uuid)")),
    responses(
        (status = 200, description = "Invoice", body = Invoice),
        (status = 401, description = "Unauthorized", body = super::super::types::ErrorBody),
        (status = 404, description = "Invoice not found", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Invoices"
)]
pub async fn get_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Invoice> {
    match state.invoices.get(&id).await {
        Ok(Some(invoice)) => ok(invoice),
        Ok(None) => ApiError::not_found(messages::INVOICE_NOT_FOUND).into_err(),
        Err(e) => {
            tracing::debug!(%id, error = %e, "Invoice lookup failed");
            ApiError::not_found(messages::INVOICE_NOT_FOUND).into_err()
        }
    }
}

/// Overwrite an invoice's name, data and settings
#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "Invoice id (uuid)")),
    request_body = InvoicePayload,
    responses(
        (status = 200, description = "Invoice updated", body = MessageBody),
        (status = 401, description = "Unauthorized", body = super::super::types::ErrorBody),
        (status = 500, description = "Store error", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Invoices"
)]
pub async fn update_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<MessageBody> {
    let payload: InvoicePayload = parse_lenient(&body);

    match state.invoices.update(&id, payload.into_draft()).await {
        Ok(()) => ok(MessageBody::new("Invoice updated")),
        Err(e) => Err(store_error("update", e)),
    }
}

/// Delete an invoice
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "Invoice id (uuid)")),
    responses(
        (status = 200, description = "Invoice deleted", body = MessageBody),
        (status = 401, description = "Unauthorized", body = super::super::types::ErrorBody),
        (status = 500, description = "Store error", body = super::super::types::ErrorBody)
    ),
    security(("bearer_token" = [])),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<MessageBody> {
    match state.invoices.delete(&id).await {
        Ok(()) => {
            tracing::info!(%id, "Invoice deleted");
            ok(MessageBody::new("Invoice deleted"))
        }
        Err(e) => Err(store_error("delete", e)),
    }
}
