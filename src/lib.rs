//! Security response headers for axum and tower services.
//!
//! Every response leaving a server built with [`HttpServer`], or any service
//! wrapped in [`SecurityHeadersLayer`], carries a fixed set of security
//! headers (CSP, HSTS, X-Frame-Options and friends).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::{HeaderSet, ResponseFilter, SecurityHeadersFilter, SecurityHeadersLayer};
