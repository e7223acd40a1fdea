//! vtexgate - storefront edge gateway for a VTEX store.
//!
//! Loads the TOML config (flags and env fill the gaps), then serves the
//! adapter API until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vtexgate::{
    api::{self, AppState},
    config::AppConfig,
    platform::PlatformClient,
};

/// vtexgate - storefront edge gateway for a VTEX store.
///
/// Exposes cart actions and the product list loader over HTTP, forwarding
/// session cookies to the platform and back.
#[derive(Parser, Debug)]
#[command(name = "vtexgate", version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "vtexgate.toml")]
    config: PathBuf,

    /// Address to bind the HTTP API (overrides config)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// VTEX account name (overrides config)
    #[arg(long)]
    account: Option<String>,

    /// VTEX host environment (overrides config)
    #[arg(long)]
    environment: Option<String>,

    /// Bearer token for the adapter routes (overrides config)
    #[arg(long, env = "VTEXGATE_TOKEN")]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vtexgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?.unwrap_or_else(|| {
        tracing::debug!(path = %cli.config.display(), "no config file, using defaults");
        AppConfig::default()
    });
    if let Some(account) = cli.account {
        config.store.account = account;
    }
    if let Some(environment) = cli.environment {
        config.store.environment = environment;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind.to_string();
    }
    if cli.token.is_some() {
        config.server.token = cli.token;
    }

    if config.store.account.is_empty() && config.store.base_url.is_none() {
        anyhow::bail!("no store configured: set store.account in the config file or pass --account");
    }

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.server.bind))?;

    if !bind.ip().is_loopback() && config.server.token.is_none() {
        tracing::warn!(
            "binding to {} without a token; the adapter routes are open to the network",
            bind
        );
    }

    let platform = PlatformClient::new(&config.store)?;
    let state = AppState {
        config: Arc::new(config),
        platform,
    };

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(
        address = %listener.local_addr()?,
        store = %state.config.store.api_base(),
        "vtexgate listening"
    );

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
