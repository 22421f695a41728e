//! iotframe-relay binary entry point.
//!
//! Usage:
//! ```bash
//! iotframe-relay --http.addr 0.0.0.0:8080 --config configuration/configuration.toml
//! iotframe-relay --help
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use iotframe_relay::config::DEFAULT_CONFIG_PATH;
use iotframe_relay::http::{build_router, routes};
use iotframe_relay::server::FrameRelay;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Image relay for a pair of devices
#[derive(Parser, Debug)]
#[command(name = "iotframe-relay")]
#[command(version, about, long_about = None)]
struct Args {
    /// HTTP listen address
    #[arg(long = "http.addr", default_value = "0.0.0.0:8080")]
    http_addr: SocketAddr,

    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let relay = FrameRelay::open(&args.config)
        .await
        .with_context(|| format!("Failed to start relay from {}", args.config.display()))?;
    let relay = Arc::new(relay);
    let app = build_router(relay, routes());

    let listener = tokio::net::TcpListener::bind(args.http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.http_addr))?;
    tracing::info!(transport = "HTTP", addr = %args.http_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Resolve on SIGINT or SIGTERM, logging which one arrived.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    tracing::warn!(event = "terminating", signal = received, "shutting down");
}
