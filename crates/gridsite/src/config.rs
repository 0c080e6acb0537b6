//! CLI configuration: thin wrapper around `gridsite_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --timeout, --insecure, --output).

use std::time::Duration;

use gridsite_core::{ApiConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use gridsite_config::{Config, Profile, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Settings that shape how results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Presentation {
    pub output: OutputFormat,
    pub color: ColorMode,
    pub page_size: usize,
}

/// Flag > env > config defaults.
pub fn presentation(global: &GlobalOpts, config: &Config) -> Presentation {
    let output = global.output.unwrap_or_else(|| {
        match config.defaults.output.as_str() {
            "json" => OutputFormat::Json,
            "json-compact" => OutputFormat::JsonCompact,
            "yaml" => OutputFormat::Yaml,
            "plain" => OutputFormat::Plain,
            _ => OutputFormat::Table,
        }
    });
    let color = global
        .color
        .unwrap_or_else(|| match config.defaults.color.as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        });
    Presentation {
        output,
        color,
        page_size: config.defaults.page_size,
    }
}

/// Translate the active profile + global flags into an `ApiConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_api_config(global: &GlobalOpts, config: &Config) -> Result<ApiConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let mut profile = match config.profile(&profile_name) {
        Ok(profile) => profile,
        // A bare --api-url works without any profile.
        Err(_) if global.api_url.is_some() => Profile::default(),
        Err(_) => {
            let available: Vec<_> = config.profiles.keys().cloned().collect();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }

    let mut api = gridsite_config::profile_to_api_config(&profile, &config.defaults)?;

    if global.insecure {
        api.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        api.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(profile = %profile_name, url = %api.base_url, "resolved Data API config");
    Ok(api)
}
