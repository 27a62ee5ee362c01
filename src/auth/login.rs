//! Credential check and token minting.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use utoipa::ToSchema;

use super::token;
use super::verifier::{SecretMode, resolve_secret};

/// Login request body. Missing fields behave as a mismatch.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    #[serde(default)]
    pub username: Option<String>,
    #[schema(example = "correct horse")]
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; carries the freshly minted token.
    Issued(String),
    /// Username or password did not match.
    Rejected,
    /// Credentials matched but there is no key to sign with (strict mode).
    MissingSecret,
}

/// The single process-wide account.
#[derive(Clone)]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Exact comparison. An unconfigured value matches nothing, so an unset
    /// account rejects even an empty login.
    pub fn matches(&self, username: Option<&str>, password: Option<&str>) -> bool {
        field_matches(self.username.as_deref(), username)
            && field_matches(self.password.as_deref(), password)
    }
}

fn field_matches(configured: Option<&str>, supplied: Option<&str>) -> bool {
    match (configured, supplied) {
        (Some(c), Some(s)) => c == s,
        _ => false,
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub struct LoginService {
    credentials: Credentials,
    signing_key: Option<Vec<u8>>,
}

impl LoginService {
    pub fn new(
        credentials: Credentials,
        secret: Option<&str>,
        fallback: &str,
        mode: SecretMode,
    ) -> Self {
        Self {
            credentials,
            signing_key: resolve_secret(secret, fallback, mode),
        }
    }

    /// Check credentials and mint a token stamped with the current time.
    pub fn login(&self, req: &LoginRequest) -> LoginOutcome {
        self.login_at(req, now_ms())
    }

    /// Same as [`Self::login`] with an explicit issue time.
    pub fn login_at(&self, req: &LoginRequest, issued_at_ms: u64) -> LoginOutcome {
        if !self
            .credentials
            .matches(req.username.as_deref(), req.password.as_deref())
        {
            return LoginOutcome::Rejected;
        }
        let Some(key) = self.signing_key.as_deref() else {
            return LoginOutcome::MissingSecret;
        };
        // matches() guarantees a username is present
        let username = req.username.as_deref().unwrap_or_default();
        LoginOutcome::Issued(token::encode(username, issued_at_ms, key))
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
