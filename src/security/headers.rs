//! The fixed set of security response headers.
//!
//! # Responsibilities
//! - Hold an ordered list of header name/value pairs
//! - Reject duplicate names and values carrying line terminators
//! - Append the whole list onto a response header map
//!
//! # Design Decisions
//! - Built once at startup, shared read-only through `Arc`
//! - Appends, never replaces: a header already set downstream keeps its value

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

/// `Permissions-Policy` has no constant in the `http` crate.
pub const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

/// The security headers attached to every response, in the order they are applied.
pub const SECURITY_DEFAULTS: [(&str, &str); 7] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("X-XSS-Protection", "1; mode=block"),
    ("Strict-Transport-Security", "max-age=31536000; includeSubDomains"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    ("Permissions-Policy", "camera=(), microphone=(), geolocation=()"),
    (
        "Content-Security-Policy",
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; \
         img-src 'self' data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'",
    ),
];

/// Error returned when building a [`HeaderSet`] from untrusted pairs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderSetError {
    #[error("invalid header name: {name:?}")]
    InvalidName { name: String },

    #[error("header {name} contains a line terminator")]
    LineTerminator { name: String },

    #[error("invalid value for header {name}")]
    InvalidValue { name: String },

    #[error("header {name} is listed more than once")]
    DuplicateName { name: String },
}

/// An ordered, immutable list of response headers with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderSet {
    /// Build a set from name/value pairs, validating every entry.
    pub fn new<I, N, V>(pairs: I) -> Result<Self, HeaderSetError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries: Vec<(HeaderName, HeaderValue)> = Vec::new();

        for (name, value) in pairs {
            let (name, value) = (name.as_ref(), value.as_ref());

            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                HeaderSetError::InvalidName {
                    name: name.to_owned(),
                }
            })?;

            if value.contains(['\r', '\n']) {
                return Err(HeaderSetError::LineTerminator {
                    name: name.to_owned(),
                });
            }

            let header_value =
                HeaderValue::from_str(value).map_err(|_| HeaderSetError::InvalidValue {
                    name: name.to_owned(),
                })?;

            if entries.iter().any(|(existing, _)| *existing == header_name) {
                return Err(HeaderSetError::DuplicateName {
                    name: name.to_owned(),
                });
            }

            entries.push((header_name, header_value));
        }

        Ok(Self { entries })
    }

    /// The seven security headers from [`SECURITY_DEFAULTS`].
    pub fn security_defaults() -> Self {
        Self {
            entries: vec![
                (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
                (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
                (header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")),
                (
                    header::STRICT_TRANSPORT_SECURITY,
                    HeaderValue::from_static("max-age=31536000; includeSubDomains"),
                ),
                (
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ),
                (
                    PERMISSIONS_POLICY,
                    HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
                ),
                (
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(SECURITY_DEFAULTS[6].1),
                ),
            ],
        }
    }

    /// Append every entry to `headers`, keeping any values already present.
    pub fn append_to(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.entries {
            headers.append(name.clone(), value.clone());
        }
    }

    /// Look up a value by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HeaderSet {
    fn default() -> Self {
        Self::security_defaults()
    }
}
