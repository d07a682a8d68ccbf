//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server and lifecycle events:
//!     → logging.rs (structured log events)
//!     → tower_http TraceLayer (one span per request, x-request-id)
//! ```
//!
//! The security header filter emits nothing; it has no failure modes worth
//! reporting.

pub mod logging;
