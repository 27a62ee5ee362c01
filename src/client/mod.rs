//! Session client
//!
//! Holds the bearer token for one browser-style session and talks to the
//! gateway over HTTP. Mirrors what the editor UI does: log in once, restore a
//! saved token on start-up, attach the token to every API call.

use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Shown when the login endpoint fails without an `error` field
pub const DEFAULT_LOGIN_ERROR: &str = "Invalid credentials";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success status; `message` is the server's `error` field or body text
    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

/// Full invoice as returned by `GET /api/invoices/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRecord {
    pub id: Uuid,
    pub name: String,
    pub data: serde_json::Value,
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SessionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a token and keep it for later calls
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/login"))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = error_message(resp)
                .await
                .unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string());
            return Err(ClientError::Api { status, message });
        }

        let body: LoginResponseBody = resp.json().await?;
        self.token = Some(body.token.clone());
        Ok(body.token)
    }

    /// Re-check a saved token.
    ///
    /// Returns whether the session is authenticated afterwards. A rejected
    /// token is dropped. An unreachable server keeps it.
    pub async fn restore(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        let result = self
            .http
            .get(self.url("/api/verify"))
            .bearer_auth(&token)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                self.token = Some(token);
            }
            Ok(resp) => {
                tracing::info!(status = %resp.status(), "Saved token rejected");
                self.token = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Verify unreachable, keeping saved token");
                self.token = Some(token);
            }
        }
        self.is_authenticated()
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(header::CONTENT_TYPE, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = error_message(resp)
                .await
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Api { status, message });
        }
        Ok(resp.json().await?)
    }

    pub async fn list_invoices(&self) -> Result<Vec<InvoiceSummaryRecord>, ClientError> {
        self.call::<(), _>(Method::GET, "/api/invoices", None).await
    }

    pub async fn get_invoice(&self, id: &str) -> Result<InvoiceRecord, ClientError> {
        self.call::<(), _>(Method::GET, &format!("/api/invoices/{}", id), None)
            .await
    }

    pub async fn create_invoice(
        &self,
        name: &str,
        data: &serde_json::Value,
        settings: &serde_json::Value,
    ) -> Result<Uuid, ClientError> {
        let body = json!({ "name": name, "data": data, "settings": settings });
        let created: CreatedInvoiceRecord = self
            .call(Method::POST, "/api/invoices", Some(&body))
            .await?;
        Ok(created.id)
    }

    pub async fn update_invoice(
        &self,
        id: &str,
        name: &str,
        data: &serde_json::Value,
        settings: &serde_json::Value,
    ) -> Result<String, ClientError> {
        let body = json!({ "name": name, "data": data, "settings": settings });
        let resp: MessageRecord = self
            .call(Method::PUT, &format!("/api/invoices/{}", id), Some(&body))
            .await?;
        Ok(resp.message)
    }

    pub async fn delete_invoice(&self, id: &str) -> Result<String, ClientError> {
        let resp: MessageRecord = self
            .call::<(), _>(Method::DELETE, &format!("/api/invoices/{}", id), None)
            .await?;
        Ok(resp.message)
    }

    /// Email a rendered PDF. Accepts raw base64 or a `data:` URL.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        message: Option<&str>,
        pdf: &str,
    ) -> Result<String, ClientError> {
        let body = json!({
            "toEmail": to_email,
            "subject": subject,
            "message": message,
            "pdfBase64": strip_data_url(pdf),
        });
        let sent: EmailSentRecord = self.call(Method::POST, "/api/email", Some(&body)).await?;
        Ok(sent.id)
    }
}

/// Drop everything up to and including `base64,` when present
pub fn strip_data_url(pdf: &str) -> &str {
    match pdf.split_once("base64,") {
        Some((_, data)) => data,
        None => pdf,
    }
}

/// Server `error` field, falling back to the raw body text
async fn error_message(resp: reqwest::Response) -> Option<String> {
    let text = resp.text().await.ok()?;
    match serde_json::from_str::<ErrorRecord>(&text) {
        Ok(ErrorRecord { error: Some(error) }) => Some(error),
        _ if !text.is_empty() && !text.trim_start().starts_with('{') => Some(text),
        _ => None,
    }
}

// Wire mirrors of the gateway's response types
#[derive(Deserialize)]
struct LoginResponseBody {
    token: String,
}

#[derive(Deserialize)]
struct ErrorRecord {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct CreatedInvoiceRecord {
    id: Uuid,
}

#[derive(Deserialize)]
struct MessageRecord {
    message: String,
}

#[derive(Deserialize)]
struct EmailSentRecord {
    id: String,
}

/// Row of `GET /api/invoices`
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceSummaryRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url() {
        assert_eq!(
            strip_data_url("data:application/pdf;filename=generated.pdf;base64,JVBERi0x"),
            "JVBERi0x"
        );
        assert_eq!(strip_data_url("JVBERi0x"), "JVBERi0x");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = SessionClient::new("http://localhost:3000/");
        assert_eq!(client.url("/api/login"), "http://localhost:3000/api/login");
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_keeps_token_when_unreachable() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server
        let mut client = SessionClient::new("http://127.0.0.1:9");
        assert!(client.restore("abc.def").await);
        assert_eq!(client.token(), Some("abc.def"));

        client.logout();
        assert!(!client.is_authenticated());
    }
}
