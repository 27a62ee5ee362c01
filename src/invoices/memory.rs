//! In-process invoice store for local runs and tests

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::models::{Invoice, InvoiceDraft, InvoiceSummary};
use super::store::{InvoiceStore, StoreError, parse_invoice_id};

#[derive(Default)]
pub struct MemoryInvoiceStore {
    rows: DashMap<Uuid, Invoice>,
}

impl MemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl InvoiceStore for MemoryInvoiceStore {
    async fn list(&self) -> Result<Vec<InvoiceSummary>, StoreError> {
        let mut summaries: Vec<InvoiceSummary> = self
            .rows
            .iter()
            .map(|entry| InvoiceSummary::from(entry.value()))
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>, StoreError> {
        let id = parse_invoice_id(id)?;
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, draft: InvoiceDraft) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.rows.insert(
            id,
            Invoice {
                id,
                name: draft.name,
                data: draft.data,
                settings: draft.settings,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: &str, draft: InvoiceDraft) -> Result<(), StoreError> {
        let id = parse_invoice_id(id)?;
        if let Some(mut row) = self.rows.get_mut(&id) {
            row.name = draft.name;
            row.data = draft.data;
            row.settings = draft.settings;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_invoice_id(id)?;
        self.rows.remove(&id);
        Ok(())
    }
}
