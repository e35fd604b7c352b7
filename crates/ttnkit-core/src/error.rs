// ── Core error types ──
//
// User-facing errors from ttnkit-core. Consumers never see raw HTTP
// plumbing; the `From<ttnkit_api::Error>` impl translates transport-layer
// failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach console API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Console API request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the failure came back as a 404 from the server.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ttnkit_api::Error> for CoreError {
    fn from(err: ttnkit_api::Error) -> Self {
        match err {
            ttnkit_api::Error::Authentication { message } => Self::AuthenticationFailed { message },
            ttnkit_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url: e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ttnkit_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            ttnkit_api::Error::InvalidBaseUrl(url) => Self::Config {
                message: format!("API URL cannot carry paths: {url}"),
            },
            ttnkit_api::Error::Tls(msg) => Self::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ttnkit_api::Error::Api {
                status: 404,
                message,
                ..
            } => Self::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            ttnkit_api::Error::Api {
                status: status @ (401 | 403),
                message,
                ..
            } => Self::AuthenticationFailed {
                message: format!("HTTP {status}: {message}"),
            },
            ttnkit_api::Error::Api {
                status,
                message,
                code,
            } => Self::Api {
                message,
                code,
                status: Some(status),
            },
            ttnkit_api::Error::Deserialization { message, body: _ } => {
                Self::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
