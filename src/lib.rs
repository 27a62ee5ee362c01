//! Invoice Desk - backend for a browser-based invoice editor
//!
//! # Modules
//!
//! - [`auth`] - Signed bearer tokens, login and the auth gate
//! - [`invoices`] - Invoice storage (PostgreSQL or in-memory)
//! - [`email`] - Invoice PDF delivery through Resend
//! - [`gateway`] - HTTP routes, handlers and OpenAPI document
//! - [`client`] - Session client speaking to the gateway
//! - [`config`] - YAML settings and environment secrets
//! - [`logging`] - Tracing subscriber setup

pub mod auth;
pub mod client;
pub mod config;
pub mod email;
pub mod gateway;
pub mod invoices;
pub mod logging;

// Convenient re-exports at crate root
pub use auth::{LoginService, SecretMode, TokenClaims, TokenError, TokenVerifier};
pub use client::{ClientError, SessionClient};
pub use config::{AppConfig, Secrets};
pub use gateway::{build_router, run_server, state::AppState};
pub use invoices::{InvoiceStore, MemoryInvoiceStore, PgInvoiceStore};
