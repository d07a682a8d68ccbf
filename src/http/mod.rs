//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → TraceLayer, request ID
//!     → security::SecurityHeadersLayer
//!     → TimeoutLayer
//!     → application routes
//!     → Send to client
//! ```

pub mod server;

pub use server::{default_app, HttpServer};
