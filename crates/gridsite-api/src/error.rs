use indexmap::IndexMap;
use thiserror::Error;

/// Top-level error type for the `gridsite-api` crate.
///
/// Server-side field validation (HTTP 400 with a field → messages body) is
/// kept apart from every other HTTP failure so callers can show the
/// per-field detail. `gridsite-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data API ────────────────────────────────────────────────────
    /// HTTP 400 carrying a structured `{field: [messages]}` body.
    #[error("Validation error: {}", format_fields(.fields))]
    Validation { fields: IndexMap<String, Vec<String>> },

    /// Any other non-success response.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The server's per-field messages, if this is a validation failure.
    pub fn validation_fields(&self) -> Option<&IndexMap<String, Vec<String>>> {
        match self {
            Self::Validation { fields } => Some(fields),
            _ => None,
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Validation { .. } => Some(400),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Render `{field: [a, b], other: [c]}` as `field: a, b; other: c`.
pub fn format_fields(fields: &IndexMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_joins_fields_with_semicolons() {
        let mut fields = IndexMap::new();
        fields.insert(
            "siteName".to_owned(),
            vec!["This field is required.".to_owned()],
        );
        fields.insert(
            "gpsLat".to_owned(),
            vec!["Too large.".to_owned(), "Not a number.".to_owned()],
        );
        let err = Error::Validation { fields };
        assert_eq!(
            err.to_string(),
            "Validation error: siteName: This field is required.; gpsLat: Too large., Not a number."
        );
    }

    #[test]
    fn api_error_status_helpers() {
        let err = Error::Api {
            status: 404,
            message: "Not found.".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }
}
