//! Bearer token verification.
//!
//! A [`TokenVerifier`] is built once at start-up from the process secret and a
//! strict/lenient flag, then shared read-only by every request it guards.
//! Verification is total: every failure collapses to `false`.

use super::error::TokenError;
use super::token::{self, TokenClaims};

/// Secret substituted by lenient verifiers when `APP_SECRET` is unset.
pub const DEFAULT_SECRET: &str = "default-secret";

const BEARER_PREFIX: &str = "Bearer ";

/// How a verifier reacts to a missing process secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretMode {
    /// No secret means every token is rejected.
    Strict,
    /// No secret means the fallback literal is used.
    Lenient,
}

impl SecretMode {
    pub fn from_strict_flag(strict_secret: bool) -> Self {
        if strict_secret {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Resolve the signing key for `mode`. `None` only in strict mode.
pub fn resolve_secret(secret: Option<&str>, fallback: &str, mode: SecretMode) -> Option<Vec<u8>> {
    match (secret, mode) {
        (Some(s), _) => Some(s.as_bytes().to_vec()),
        (None, SecretMode::Lenient) => Some(fallback.as_bytes().to_vec()),
        (None, SecretMode::Strict) => None,
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Only the first space-separated field after `Bearer ` is used, so
/// `"Bearer  tok"` yields the empty string.
pub fn bearer_token(header: &str) -> Result<&str, TokenError> {
    let rest = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenError::InvalidScheme)?;
    Ok(rest.split(' ').next().unwrap_or_default())
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<Vec<u8>>,
    mode: SecretMode,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("mode", &self.mode)
            .field("has_key", &self.key.is_some())
            .finish()
    }
}

impl TokenVerifier {
    /// Build a verifier from the configured secret.
    pub fn new(secret: Option<&str>, fallback: &str, mode: SecretMode) -> Self {
        Self {
            key: resolve_secret(secret, fallback, mode),
            mode,
        }
    }

    /// Lenient verifier using [`DEFAULT_SECRET`] as the fallback.
    pub fn lenient(secret: Option<&str>) -> Self {
        Self::new(secret, DEFAULT_SECRET, SecretMode::Lenient)
    }

    /// Strict verifier: no secret, no tokens.
    pub fn strict(secret: Option<&str>) -> Self {
        Self::new(secret, DEFAULT_SECRET, SecretMode::Strict)
    }

    pub fn mode(&self) -> SecretMode {
        self.mode
    }

    /// Signing key in effect, if any.
    pub fn key(&self) -> Option<&[u8]> {
        self.key.as_deref()
    }

    /// Full verification with the rejection reason.
    pub fn inspect(&self, authorization: Option<&str>) -> Result<TokenClaims, TokenError> {
        let header = authorization.ok_or(TokenError::MissingHeader)?;
        let token = bearer_token(header)?;
        let key = self.key.as_deref().ok_or(TokenError::MissingSecret)?;

        let decoded = token::decode(token)?;
        let expected = token::sign(&decoded.payload, key);
        if !token::signatures_match(&expected, decoded.signature) {
            return Err(TokenError::SignatureMismatch);
        }

        // No expiry: issued_at_ms is carried but never compared.
        Ok(decoded.claims)
    }

    /// `true` iff `authorization` carries a token signed with this key.
    pub fn verify(&self, authorization: Option<&str>) -> bool {
        self.inspect(authorization).is_ok()
    }
}
