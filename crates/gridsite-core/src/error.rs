// ── Core error types ──
//
// User-facing errors from gridsite-core. The `From<gridsite_api::Error>`
// impl translates transport-layer failures into domain variants; field
// validation from the server keeps its per-field detail.

use indexmap::IndexMap;
use thiserror::Error;

use gridsite_api::error::format_fields;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the Data API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Data API request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Server-side field validation, rendered exactly as the API reports it.
    #[error("Validation error: {}", format_fields(.fields))]
    Rejected { fields: IndexMap<String, Vec<String>> },

    /// Client-side form validation.
    #[error("Validation failed: {}", format_fields(.fields))]
    Invalid { fields: IndexMap<String, Vec<String>> },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Local I/O ────────────────────────────────────────────────────
    #[error("Could not write {what}: {reason}")]
    Output { what: String, reason: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Api { status: Some(404), .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<gridsite_api::Error> for CoreError {
    fn from(err: gridsite_api::Error) -> Self {
        match err {
            gridsite_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: err.status(),
                    }
                }
            }
            gridsite_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            gridsite_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            gridsite_api::Error::Validation { fields } => CoreError::Rejected { fields },
            gridsite_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            gridsite_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
