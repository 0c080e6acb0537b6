//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::de::DeserializeOwned;

use gridsite_core::{PageView, paginate};

use crate::cli::PageArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Slice a filtered list per `--page` / `--per-page` / `--all`.
pub fn page_of<T>(items: Vec<T>, paging: &PageArgs, page_size: usize) -> PageView<T> {
    if paging.all {
        let len = items.len();
        return paginate(items, 1, len.max(1));
    }
    paginate(items, paging.page, paging.per_page.unwrap_or(page_size))
}

/// "Showing X to Y of Z results (page N of M)"
pub fn page_footer<T>(view: &PageView<T>) -> String {
    if view.total_pages > 1 {
        format!(
            "{} (page {} of {})",
            view.summary(),
            view.page,
            view.total_pages
        )
    } else {
        view.summary()
    }
}

/// Write to `path`, or stdout when absent.
pub fn write_to(path: Option<&Path>, bytes: &[u8]) -> Result<(), CliError> {
    use std::io::Write;

    match path {
        Some(path) => std::fs::write(path, bytes)?,
        None => std::io::stdout().lock().write_all(bytes)?,
    }
    Ok(())
}
