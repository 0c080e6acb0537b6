//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ImportFailure` and `ConfigError` into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use gridsite_config::ConfigError;
use gridsite_core::{CoreError, ImportFailure};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const IMPORT_REJECTED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the Data API at {url}")]
    #[diagnostic(
        code(gridsite::connection_failed),
        help(
            "Check that the Data API is running and reachable.\n\
             {reason}\n\
             Set the URL with --api-url or: gridsite config init"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(gridsite::timeout),
        help("Increase the timeout with --timeout or check Data API responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(gridsite::not_found),
        help("Run: gridsite {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(gridsite::conflict),
        help("A record with the same identifying attributes already exists.")
    )]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(gridsite::rejected))]
    Rejected { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(gridsite::api_error))]
    ApiError { status: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gridsite::validation))]
    Validation { field: String, reason: String },

    #[error("{count} field(s) failed validation")]
    #[diagnostic(code(gridsite::form_invalid), help("{details}"))]
    FormInvalid { count: usize, details: String },

    // ── Import ───────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(
        code(gridsite::import_rejected),
        help("Start from the template: gridsite import template -f sites.csv")
    )]
    ImportRejected(ImportFailure),

    #[error("{count} validation error(s) in the file")]
    #[diagnostic(
        code(gridsite::import_invalid),
        help("Fix the rows listed above. `gridsite import run` skips invalid rows.")
    )]
    ImportInvalid { count: usize },

    #[error("Import stopped at record {position} ({site_name}): {message}")]
    #[diagnostic(
        code(gridsite::commit_halted),
        help(
            "{created} site(s) were created before the failure.\n\
             Remove them from the file before importing the rest."
        )
    )]
    CommitHalted {
        position: usize,
        site_name: String,
        message: String,
        created: usize,
    },

    #[error("Import cancelled after {created} site(s)")]
    #[diagnostic(
        code(gridsite::commit_cancelled),
        help("{remaining} record(s) were not sent.")
    )]
    CommitCancelled { created: usize, remaining: usize },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gridsite::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: gridsite config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(gridsite::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(gridsite::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(gridsite::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    #[diagnostic(code(gridsite::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::FormInvalid { .. }
            | Self::Rejected { .. }
            | Self::ImportInvalid { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ImportRejected(_) | Self::CommitHalted { .. } => exit_code::IMPORT_REJECTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{}s list", entity_type.to_lowercase()),
                resource_type: entity_type,
                identifier,
            },

            err @ CoreError::Rejected { .. } => {
                let message = err.to_string();
                if message.contains("already exists") {
                    CliError::Conflict { message }
                } else {
                    CliError::Rejected { message }
                }
            }

            CoreError::Invalid { fields } => CliError::FormInvalid {
                count: fields.len(),
                details: fields
                    .iter()
                    .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },

            CoreError::Api { message, status } => CliError::ApiError {
                status: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },

            err @ (CoreError::Output { .. } | CoreError::Internal(_)) => {
                CliError::Internal(err.to_string())
            }
        }
    }
}

impl From<ImportFailure> for CliError {
    fn from(err: ImportFailure) -> Self {
        Self::ImportRejected(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
