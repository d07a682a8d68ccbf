//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the application Router with every middleware layer
//! - Mount the security header filter on all routes and the fallback
//! - Bind server to listener
//! - Stop on the shutdown broadcast, letting in-flight requests finish

use axum::{http::StatusCode, routing::get, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::security::SecurityHeadersLayer;

/// HTTP server hosting an application behind the security header filter.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server for `app` using the default security header set.
    pub fn new(config: ServerConfig, app: Router) -> Self {
        Self::with_layer(config, app, SecurityHeadersLayer::security_defaults())
    }

    /// Create a server for `app` with an explicit security layer.
    pub fn with_layer(config: ServerConfig, app: Router, security: SecurityHeadersLayer) -> Self {
        let router = Self::build_router(&config, app, security);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The security layer sits outside the timeout so 408 responses carry the
    /// headers as well.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, app: Router, security: SecurityHeadersLayer) -> Router {
        app.layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(security)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The application served by the binary: a health probe and a 404 fallback.
pub fn default_app() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
