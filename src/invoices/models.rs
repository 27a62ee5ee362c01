//! Invoice records and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_INVOICE_NAME: &str = "Untitled Invoice";

/// Full invoice row. `data` and `settings` are opaque editor documents.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Invoice {
    pub id: Uuid,
    #[schema(example = "ACME March retainer")]
    pub name: String,
    #[schema(value_type = Object)]
    pub data: Value,
    #[schema(value_type = Object)]
    pub settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row as shown in the invoice list
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InvoiceSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            name: invoice.name.clone(),
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

/// Body of create and update requests. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InvoicePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub settings: Option<Value>,
}

/// Values actually written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub name: String,
    pub data: Value,
    pub settings: Value,
}

impl InvoicePayload {
    /// Apply defaults: empty name becomes [`DEFAULT_INVOICE_NAME`], a missing
    /// or falsy document becomes `{}`.
    pub fn into_draft(self) -> InvoiceDraft {
        InvoiceDraft {
            name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_INVOICE_NAME.to_string()),
            data: object_or_empty(self.data),
            settings: object_or_empty(self.settings),
        }
    }
}

fn object_or_empty(value: Option<Value>) -> Value {
    match value {
        Some(v) if !is_falsy(&v) => v,
        _ => Value::Object(Default::default()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Response of a successful create
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedInvoice {
    pub id: Uuid,
    #[schema(example = "Invoice saved")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let draft = InvoicePayload::default().into_draft();
        assert_eq!(draft.name, "Untitled Invoice");
        assert_eq!(draft.data, json!({}));
        assert_eq!(draft.settings, json!({}));
    }

    #[test]
    fn test_falsy_values_replaced() {
        let payload: InvoicePayload =
            serde_json::from_value(json!({"name": "", "data": null, "settings": 0})).unwrap();
        let draft = payload.into_draft();
        assert_eq!(draft.name, "Untitled Invoice");
        assert_eq!(draft.data, json!({}));
        assert_eq!(draft.settings, json!({}));
    }

    #[test]
    fn test_values_kept() {
        let payload: InvoicePayload = serde_json::from_value(json!({
            "name": "March",
            "data": {"invoiceNo": "7", "items": []},
            "settings": {"template": "template2"}
        }))
        .unwrap();
        let draft = payload.into_draft();
        assert_eq!(draft.name, "March");
        assert_eq!(draft.data["invoiceNo"], "7");
        assert_eq!(draft.settings["template"], "template2");
    }
}
