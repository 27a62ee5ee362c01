//! Invoice email delivery
//!
//! The gateway validates an [`EmailRequest`] into an [`OutgoingEmail`] and
//! hands it to an [`EmailSender`]. The production sender is [`ResendClient`].

pub mod resend;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

pub use resend::ResendClient;

pub const DEFAULT_EMAIL_TEXT: &str = "Please find your invoice attached.";
pub const ATTACHMENT_FILENAME: &str = "invoice.pdf";
pub const MISSING_FIELDS: &str = "Missing required fields (toEmail, subject, pdfBase64)";

/// Body of `POST /api/email`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[schema(example = "billing@example.com")]
    #[serde(default)]
    pub to_email: Option<String>,
    #[schema(example = "Invoice #7")]
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Raw base64 of the rendered PDF, without a data-URL prefix
    #[serde(default)]
    pub pdf_base64: Option<String>,
}

/// A validated message ready to hand to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub pdf_base64: String,
}

impl EmailRequest {
    /// Require `toEmail`, `subject` and `pdfBase64`; default the text body.
    pub fn validate(self) -> Result<OutgoingEmail, &'static str> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (
            present(self.to_email),
            present(self.subject),
            present(self.pdf_base64),
        ) {
            (Some(to), Some(subject), Some(pdf_base64)) => Ok(OutgoingEmail {
                to,
                subject,
                text: present(self.message).unwrap_or_else(|| DEFAULT_EMAIL_TEXT.to_string()),
                pdf_base64,
            }),
            _ => Err(MISSING_FIELDS),
        }
    }
}

#[derive(Debug, Error)]
pub enum EmailError {
    /// Provider answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Email transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Outbound email provider. Returns the provider's message id.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError>;
}
