//! Resend HTTP API client
//!
//! One call: `POST {endpoint}` with a bearer API key and a JSON body carrying
//! the invoice PDF as a base64 attachment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::{ATTACHMENT_FILENAME, EmailError, EmailSender, OutgoingEmail};
use crate::config::EmailConfig;

pub const PROVIDER_FAILURE: &str = "Failed to send email via Resend";

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    attachments: [Attachment<'a>; 1],
}

#[derive(Serialize)]
struct Attachment<'a> {
    filename: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize, Default)]
struct ProviderError {
    #[serde(default)]
    message: Option<String>,
}

pub struct ResendClient {
    http: reqwest::Client,
    endpoint: String,
    from: String,
    api_key: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>, config: &EmailConfig) -> Result<Self, EmailError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            from: config.from.clone(),
            api_key: api_key.into(),
        })
    }

    fn body<'a>(&'a self, email: &'a OutgoingEmail) -> SendEmailBody<'a> {
        SendEmailBody {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            text: &email.text,
            attachments: [Attachment {
                filename: ATTACHMENT_FILENAME,
                content: &email.pdf_base64,
            }],
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.body(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let sent: SendEmailResponse = response.json().await?;
            info!(id = %sent.id, "Invoice email accepted by Resend");
            return Ok(sent.id);
        }

        let provider_error: ProviderError = response.json().await.unwrap_or_default();
        let message = provider_error
            .message
            .unwrap_or_else(|| PROVIDER_FAILURE.to_string());
        error!(status = status.as_u16(), %message, "Resend API error");
        Err(EmailError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "client@example.com".into(),
            subject: "Invoice #7".into(),
            text: "hi".into(),
            pdf_base64: "JVBERi0=".into(),
        }
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/emails", addr)
    }

    fn client(endpoint: String) -> ResendClient {
        let config = EmailConfig {
            endpoint,
            ..EmailConfig::default()
        };
        ResendClient::new("re_test", &config).unwrap()
    }

    #[tokio::test]
    async fn test_send_success_returns_id() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::default();
        let seen_in_handler = seen.clone();
        let app = Router::new().route(
            "/emails",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen_in_handler.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *seen.lock().unwrap() = Some((auth, body));
                    Json(json!({"id": "msg_123"}))
                }
            }),
        );
        let endpoint = serve(app).await;

        let id = client(endpoint).send(&email()).await.unwrap();
        assert_eq!(id, "msg_123");

        let (auth, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer re_test");
        assert_eq!(
            body,
            json!({
                "from": "Invoice Generator <onboarding@resend.dev>",
                "to": ["client@example.com"],
                "subject": "Invoice #7",
                "text": "hi",
                "attachments": [{"filename": "invoice.pdf", "content": "JVBERi0="}]
            })
        );
    }

    #[tokio::test]
    async fn test_send_rejection_passes_status_and_message() {
        let app = Router::new().route(
            "/emails",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"message": "Invalid `to` field"})),
                )
            }),
        );
        let endpoint = serve(app).await;

        match client(endpoint).send(&email()).await {
            Err(EmailError::Rejected { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Invalid `to` field");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_rejection_without_message() {
        let app = Router::new().route(
            "/emails",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let endpoint = serve(app).await;

        match client(endpoint).send(&email()).await {
            Err(EmailError::Rejected { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, PROVIDER_FAILURE);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
