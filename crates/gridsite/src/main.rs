mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gridsite_core::Inventory;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let view = config::presentation(&cli.global, &cfg);

    match cli.command {
        // Config commands don't need the Data API
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, &view),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "gridsite", &mut std::io::stdout());
            Ok(())
        }

        // Template and check work offline; run connects only after confirmation
        Command::Import(args) => {
            let global = &cli.global;
            commands::import::handle(args, global, &view, || connect(global, &cfg)).await
        }

        cmd => {
            let inventory = connect(&cli.global, &cfg)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &inventory, &cli.global, &view).await
        }
    }
}

/// Build an `Inventory` from the config file, profile, and CLI overrides.
fn connect(global: &cli::GlobalOpts, cfg: &config::Config) -> Result<Inventory, CliError> {
    let api = config::resolve_api_config(global, cfg)?;
    Ok(Inventory::new(&api)?)
}
