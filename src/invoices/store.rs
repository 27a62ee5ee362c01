//! Invoice store interface

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Invoice, InvoiceDraft, InvoiceSummary};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input syntax for type uuid: \"{0}\"")]
    InvalidId(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Parse a path id the way the database would.
pub fn parse_invoice_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Persistence for invoices. Ids arrive as raw path segments.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// All invoices, most recently updated first.
    async fn list(&self) -> Result<Vec<InvoiceSummary>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Invoice>, StoreError>;

    /// Insert and return the generated id.
    async fn create(&self, draft: InvoiceDraft) -> Result<Uuid, StoreError>;

    /// Overwrite name, data and settings. Unknown ids are a no-op.
    async fn update(&self, id: &str, draft: InvoiceDraft) -> Result<(), StoreError>;

    /// Unknown ids are a no-op.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Backend liveness, used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
