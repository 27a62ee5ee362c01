use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::auth::{DEFAULT_SECRET, SecretMode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// File-based settings, one YAML per environment (`config/<env>.yaml`).
/// Secrets are never read from here; see [`Secrets`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    /// Signing key used by lenient route groups when `APP_SECRET` is unset
    #[serde(default = "default_fallback_secret")]
    pub fallback_secret: String,
    #[serde(default)]
    pub strict_secret: StrictSecretConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            fallback_secret: default_fallback_secret(),
            strict_secret: StrictSecretConfig::default(),
        }
    }
}

fn default_fallback_secret() -> String {
    DEFAULT_SECRET.to_string()
}

/// Per route group: reject everything (`true`) or fall back to
/// `fallback_secret` (`false`) when `APP_SECRET` is unset.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StrictSecretConfig {
    pub login: bool,
    pub verify: bool,
    pub invoices: bool,
    pub email: bool,
}

impl Default for StrictSecretConfig {
    fn default() -> Self {
        Self {
            login: false,
            verify: false,
            invoices: false,
            email: true,
        }
    }
}

impl StrictSecretConfig {
    pub fn login_mode(&self) -> SecretMode {
        SecretMode::from_strict_flag(self.login)
    }

    pub fn verify_mode(&self) -> SecretMode {
        SecretMode::from_strict_flag(self.verify)
    }

    pub fn invoices_mode(&self) -> SecretMode {
        SecretMode::from_strict_flag(self.invoices)
    }

    pub fn email_mode(&self) -> SecretMode {
        SecretMode::from_strict_flag(self.email)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Run `CREATE TABLE IF NOT EXISTS` at start-up
    pub init_schema: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            max_connections: 10,
            acquire_timeout_secs: 5,
            init_schema: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmailConfig {
    pub endpoint: String,
    pub from: String,
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.resend.com/emails".to_string(),
            from: "Invoice Generator <onboarding@resend.dev>".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: config_path,
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Process secrets, read from the environment once at start-up.
#[derive(Clone, Default)]
pub struct Secrets {
    pub app_secret: Option<String>,
    pub app_username: Option<String>,
    pub app_password: Option<String>,
    pub resend_api_key: Option<String>,
    pub database_url: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            app_secret: get("APP_SECRET"),
            app_username: get("APP_USERNAME"),
            app_password: get("APP_PASSWORD"),
            resend_api_key: get("RESEND_API_KEY"),
            database_url: get("DATABASE_URL"),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("app_secret", &set(&self.app_secret))
            .field("app_username", &self.app_username)
            .field("app_password", &set(&self.app_password))
            .field("resend_api_key", &set(&self.resend_api_key))
            .field("database_url", &set(&self.database_url))
            .finish()
    }
}
