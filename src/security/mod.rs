//! Security response headers.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     headers.rs (HeaderSet::security_defaults)
//!     → Arc<HeaderSet>
//!     → filter.rs (SecurityHeadersFilter)
//!     → layer.rs (tower layer / axum middleware)
//!
//! Per request:
//!     → filter hands request to the rest of the chain
//!     → chain produces a response
//!     → filter appends every header in the set
//! ```
//!
//! # Design Decisions
//! - Unconditional: every route, every status, every method
//! - Additive: values set downstream are never replaced
//! - No logging or metrics in the filter itself

pub mod filter;
pub mod headers;
pub mod layer;

pub use filter::{ResponseFilter, SecurityHeadersFilter};
pub use headers::{HeaderSet, HeaderSetError, SECURITY_DEFAULTS};
pub use layer::{security_headers_middleware, SecurityHeadersLayer, SecurityHeadersService};
