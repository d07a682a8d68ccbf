//! Security headers server.
//!
//! Serves a minimal application with every response decorated by the
//! security header filter.
//!
//! ```text
//!     Client Request
//!     ──▶ TraceLayer ──▶ request ID ──▶ SecurityHeadersLayer ──▶ Timeout ──▶ routes
//!     ◀── response + X-Content-Type-Options, X-Frame-Options, CSP, HSTS, ...
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use security_headers::config::{load_config, ServerConfig};
use security_headers::http::{default_app, HttpServer};
use security_headers::lifecycle::{signals::wait_for_shutdown_signal, Shutdown};
use security_headers::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "security-headers")]
#[command(about = "HTTP server that adds security headers to every response", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!(
        config_path = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, default_app());
    let mut handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut handle => {
            result??;
            return Ok(());
        }
        _ = wait_for_shutdown_signal() => {}
    }

    shutdown.trigger();

    match tokio::time::timeout(grace, handle).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(
            grace_secs = grace.as_secs(),
            "In-flight requests did not drain in time"
        ),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
