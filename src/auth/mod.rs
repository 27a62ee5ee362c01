//! Bearer token authentication shared by every backend endpoint.
//!
//! ## Components
//! - `token`: token codec (`<base64(user:millis)>.<hex(hmac)>`)
//! - `verifier`: header parsing, signature check, strict/lenient secret mode
//! - `middleware`: Axum auth gate
//! - `login`: credential check and token minting
//! - `error`: rejection reasons (logged, never returned to clients)

pub mod error;
pub mod login;
pub mod middleware;
pub mod token;
pub mod verifier;

pub use error::TokenError;
pub use login::{Credentials, LoginOutcome, LoginRequest, LoginService};
pub use middleware::{GateDecision, auth_gate, authorization_header, authorize};
pub use token::{DecodedToken, TokenClaims, decode, encode};
pub use verifier::{DEFAULT_SECRET, SecretMode, TokenVerifier, bearer_token};
