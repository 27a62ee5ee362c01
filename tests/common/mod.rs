#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use invoice_desk::build_router;
use invoice_desk::config::{AuthConfig, Secrets};
use invoice_desk::email::{EmailError, EmailSender, OutgoingEmail};
use invoice_desk::gateway::state::AppState;
use invoice_desk::invoices::{InvoiceStore, MemoryInvoiceStore};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "hunter2";
pub const SECRET: &str = "s3cret-signing-key";

pub fn secrets(app_secret: Option<&str>) -> Secrets {
    Secrets {
        app_secret: app_secret.map(str::to_string),
        app_username: Some(USERNAME.to_string()),
        app_password: Some(PASSWORD.to_string()),
        ..Default::default()
    }
}

/// Scripted provider reply
#[derive(Clone, Copy)]
pub enum Reply {
    Accept(&'static str),
    Reject(u16, &'static str),
    Unreachable,
}

pub struct StubMailer {
    reply: Reply,
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl StubMailer {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl EmailSender for StubMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        match self.reply {
            Reply::Accept(id) => Ok(id.to_string()),
            Reply::Reject(status, message) => Err(EmailError::Rejected {
                status,
                message: message.to_string(),
            }),
            Reply::Unreachable => {
                // Relative URL fails in the request builder without touching the network
                let err = reqwest::Client::new()
                    .get("not a url")
                    .send()
                    .await
                    .unwrap_err();
                Err(EmailError::Transport(err))
            }
        }
    }
}

pub fn app_with(
    app_secret: Option<&str>,
    invoices: Arc<dyn InvoiceStore>,
    mailer: Option<Arc<dyn EmailSender>>,
) -> Router {
    let state = AppState::new(&AuthConfig::default(), &secrets(app_secret), invoices, mailer);
    build_router(Arc::new(state))
}

pub fn app(app_secret: Option<&str>) -> Router {
    app_with(app_secret, Arc::new(MemoryInvoiceStore::new()), None)
}

/// Send one request through the router; returns status and JSON body (`Null` when empty)
pub async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn login(app: &Router) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/login",
        None,
        Some(serde_json::json!({"username": USERNAME, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
