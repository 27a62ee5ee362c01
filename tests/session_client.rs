//! Session client against a live gateway on an ephemeral port.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use common::{PASSWORD, Reply, SECRET, StubMailer, USERNAME, app_with};
use invoice_desk::email::EmailSender;
use invoice_desk::invoices::MemoryInvoiceStore;
use invoice_desk::{ClientError, SessionClient};

async fn spawn_gateway(mailer: Option<Arc<dyn EmailSender>>) -> SocketAddr {
    let app = app_with(Some(SECRET), Arc::new(MemoryInvoiceStore::new()), mailer);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> SessionClient {
    SessionClient::new(format!("http://{}", addr))
}

#[tokio::test]
async fn test_login_and_restore() {
    let addr = spawn_gateway(None).await;
    let mut session = client(addr);

    let token = session.login(USERNAME, PASSWORD).await.unwrap();
    assert_eq!(session.token(), Some(token.as_str()));

    // Fresh session restoring the saved token
    let mut restored = client(addr);
    assert!(restored.restore(token.clone()).await);
    assert_eq!(restored.token(), Some(token.as_str()));

    let mut rejected = client(addr);
    assert!(!rejected.restore(format!("{}0", token)).await);
    assert!(rejected.token().is_none());
}

#[tokio::test]
async fn test_login_failure_message() {
    let addr = spawn_gateway(None).await;
    let mut session = client(addr);

    let err = session.login(USERNAME, "wrong").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid username or password");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_invoice_round_trip_and_logout() {
    let addr = spawn_gateway(None).await;
    let mut session = client(addr);
    session.login(USERNAME, PASSWORD).await.unwrap();

    let id = session
        .create_invoice("March", &json!({"invoiceNo": "7"}), &json!({"template": "template1"}))
        .await
        .unwrap();
    let id = id.to_string();

    let list = session.list_invoices().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "March");

    let message = session
        .update_invoice(&id, "April", &json!({"invoiceNo": "8"}), &json!({}))
        .await
        .unwrap();
    assert_eq!(message, "Invoice updated");

    let invoice = session.get_invoice(&id).await.unwrap();
    assert_eq!(invoice.name, "April");
    assert_eq!(invoice.data["invoiceNo"], "8");

    assert_eq!(session.delete_invoice(&id).await.unwrap(), "Invoice deleted");
    let err = session.get_invoice(&id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    session.logout();
    let err = session.list_invoices().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_send_email_strips_data_url() {
    let mailer = StubMailer::new(Reply::Accept("msg-42"));
    let addr = spawn_gateway(Some(mailer.clone() as Arc<dyn EmailSender>)).await;
    let mut session = client(addr);
    session.login(USERNAME, PASSWORD).await.unwrap();

    let id = session
        .send_email(
            "billing@example.com",
            "Invoice #7",
            Some("See attached"),
            "data:application/pdf;filename=generated.pdf;base64,JVBERi0xLjQK",
        )
        .await
        .unwrap();
    assert_eq!(id, "msg-42");

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent[0].pdf_base64, "JVBERi0xLjQK");
    assert_eq!(sent[0].text, "See attached");
}
