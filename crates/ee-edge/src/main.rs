//! # EE Edge - binary entry point
//!
//! ```text
//! CDN → EE Edge → static pages
//!          ↓
//!   tool proxy / logo origin / payments / event collector
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ee_edge::config::{AppConfig, Overrides};
use ee_edge::{AppState, create_router};

/// Ecom Efficiency edge service
#[derive(Parser, Debug)]
#[command(name = "ee-edge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/ee-edge.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Payments secret key (overrides config)
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    stripe_secret_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("🛒 Starting EE Edge v{}", env!("CARGO_PKG_VERSION"));

    let overrides = Overrides {
        listen: args.listen.clone(),
        stripe_secret_key: args.stripe_secret_key.clone(),
    };
    let config = AppConfig::load(&args.config, &overrides)?;
    info!("📋 Configuration loaded from {}", args.config);

    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config)?;
    info!(
        tenants = state.tenants.len(),
        tool = %state.sessions.tool(),
        billing = state.billing.is_configured(),
        "✅ State initialized"
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    info!("🚀 EE Edge listening on {}", listen_addr);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("🛑 Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 EE Edge shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
            .context("Failed to initialize logging")?;
    }

    Ok(())
}
