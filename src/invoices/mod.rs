//! Invoice persistence
//!
//! - `models`: invoice rows and request payloads
//! - `store`: the `InvoiceStore` trait and its error type
//! - `repository`: PostgreSQL implementation
//! - `memory`: in-process implementation

pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use memory::MemoryInvoiceStore;
pub use models::{
    CreatedInvoice, DEFAULT_INVOICE_NAME, Invoice, InvoiceDraft, InvoicePayload, InvoiceSummary,
};
pub use repository::PgInvoiceStore;
pub use store::{InvoiceStore, StoreError, parse_invoice_id};
