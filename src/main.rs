use std::sync::Arc;

use anyhow::Context;
use invoice_desk::config::{AppConfig, Secrets, StoreBackend};
use invoice_desk::email::{EmailSender, ResendClient};
use invoice_desk::gateway::{self, state::AppState};
use invoice_desk::invoices::{InvoiceStore, MemoryInvoiceStore, PgInvoiceStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn build_store(
    app_config: &AppConfig,
    secrets: &Secrets,
) -> anyhow::Result<Arc<dyn InvoiceStore>> {
    match app_config.store.backend {
        StoreBackend::Memory => {
            println!("⚠️  Invoice store: in-memory (data is lost on restart)");
            Ok(Arc::new(MemoryInvoiceStore::new()))
        }
        StoreBackend::Postgres => {
            let url = secrets
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store backend")?;
            let store = PgInvoiceStore::connect(url, &app_config.store)
                .await
                .context("Failed to connect to PostgreSQL")?;
            if app_config.store.init_schema {
                store
                    .init_schema()
                    .await
                    .context("Failed to initialize invoice schema")?;
                println!("✅ Invoice schema initialized");
            }
            println!("✅ Invoice store: PostgreSQL");
            Ok(Arc::new(store))
        }
    }
}

fn build_mailer(
    app_config: &AppConfig,
    secrets: &Secrets,
) -> anyhow::Result<Option<Arc<dyn EmailSender>>> {
    match secrets.resend_api_key.as_deref() {
        Some(key) => {
            let client = ResendClient::new(key, &app_config.email)
                .context("Failed to build Resend client")?;
            Ok(Some(Arc::new(client)))
        }
        None => {
            println!("⚠️  RESEND_API_KEY not set, /api/email will answer 500");
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = invoice_desk::logging::init_logging(&app_config);
    let secrets = Secrets::from_env();

    tracing::info!("Starting Invoice Desk in {} mode", env);
    tracing::debug!(?secrets, "Loaded secrets");

    if secrets.app_secret.is_none() {
        tracing::warn!(
            "APP_SECRET not set: lenient routes sign with the fallback secret, strict routes reject all tokens"
        );
    }

    let invoices = build_store(&app_config, &secrets).await?;
    let mailer = build_mailer(&app_config, &secrets)?;

    let state = Arc::new(AppState::new(&app_config.auth, &secrets, invoices, mailer));

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state).await?;
    Ok(())
}
