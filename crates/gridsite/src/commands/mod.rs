//! Command dispatch: bridges CLI args -> inventory calls -> output formatting.

pub mod config_cmd;
pub mod devices;
pub mod import;
pub mod sites;
pub mod util;

use gridsite_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::config::Presentation;
use crate::error::CliError;

/// Dispatch a Data API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    global: &GlobalOpts,
    view: &Presentation,
) -> Result<(), CliError> {
    match cmd {
        Command::Sites(args) => sites::handle(inventory, args, global, view).await,
        Command::Devices(args) => devices::handle(inventory, args, global, view).await,
        Command::Import(_) | Command::Config(_) | Command::Completions(_) => Err(
            CliError::Internal("command is handled before connecting".into()),
        ),
    }
}
