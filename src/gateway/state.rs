use std::sync::Arc;

use crate::auth::{Credentials, LoginService, TokenVerifier};
use crate::config::{AuthConfig, Secrets};
use crate::email::EmailSender;
use crate::invoices::InvoiceStore;

/// One verifier per route group; each carries its own strict/lenient mode.
#[derive(Clone, Debug)]
pub struct Verifiers {
    /// `/api/verify`
    pub verify: Arc<TokenVerifier>,
    /// `/api/invoices*`
    pub invoices: Arc<TokenVerifier>,
    /// `/api/email`
    pub email: Arc<TokenVerifier>,
}

impl Verifiers {
    pub fn from_config(auth: &AuthConfig, secret: Option<&str>) -> Self {
        let build = |mode| Arc::new(TokenVerifier::new(secret, &auth.fallback_secret, mode));
        Self {
            verify: build(auth.strict_secret.verify_mode()),
            invoices: build(auth.strict_secret.invoices_mode()),
            email: build(auth.strict_secret.email_mode()),
        }
    }
}

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    pub login: Arc<LoginService>,
    pub verifiers: Verifiers,
    pub invoices: Arc<dyn InvoiceStore>,
    /// `None` when `RESEND_API_KEY` is not configured
    pub mailer: Option<Arc<dyn EmailSender>>,
}

impl AppState {
    pub fn new(
        auth: &AuthConfig,
        secrets: &Secrets,
        invoices: Arc<dyn InvoiceStore>,
        mailer: Option<Arc<dyn EmailSender>>,
    ) -> Self {
        let secret = secrets.app_secret.as_deref();
        let login = LoginService::new(
            Credentials::new(secrets.app_username.clone(), secrets.app_password.clone()),
            secret,
            &auth.fallback_secret,
            auth.strict_secret.login_mode(),
        );

        Self {
            login: Arc::new(login),
            verifiers: Verifiers::from_config(auth, secret),
            invoices,
            mailer,
        }
    }
}
