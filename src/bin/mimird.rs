//! mimird — Mimir daemon.
//!
//! Loads the configured models once and serves every available capability
//! over HTTP.

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mimir::Mimir;
use mimir::server::config::Config;

/// Mimir daemon — HTTP gateway for NLP models.
#[derive(Parser)]
#[command(name = "mimird")]
#[command(version = mimir::PKG_VERSION)]
#[command(about = "Mimir NLP gateway daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind to, overriding `server.address`.
    #[arg(short, long, env = "MIMIR_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| mimir::MimirError::Configuration(format!("Invalid address: {e}")))?;

    // Model loading is blocking file IO; a failure here stops startup
    // before the listener is bound.
    let gateway = {
        let models = config.models.clone();
        let compare = config.compare.clone();
        tokio::task::spawn_blocking(move || {
            Mimir::builder().models(models).compare(compare).build()
        })
        .await??
    };

    info!(version = mimir::version_string(), %addr, "mimird starting");

    let app = mimir::server::router(gateway, &config.server.limits);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("mimird stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
