mod api;
mod block_cursor;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod format;
mod logging;
mod notifications;
mod session;
mod ui;
mod workers;

use crate::api::LedgerClient;
use crate::config::{Config, get_config_path};
use crate::consts::dashboard_consts::refresh;
use crate::environment::Environment;
use crate::session::{SessionOptions, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Names the backend to use (`local` or a base URL) when `--api-url` is not given.
const ENVIRONMENT_VAR: &str = "LEDGER_ENVIRONMENT";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Live status dashboard for a vote-recording ledger
struct Args {
    /// Base URL of the ledger backend, e.g. http://localhost:5000
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Print events to the console instead of drawing the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Seconds between automatic refreshes
        #[arg(long, value_name = "SECONDS", default_value_t = refresh::INTERVAL_SECS,
              value_parser = clap::value_parser!(u64).range(1..=refresh::MAX_INTERVAL_SECS))]
        refresh_secs: u64,

        /// Directory that downloaded audit reports are saved into
        #[arg(long, value_name = "DIR", default_value = ".")]
        download_dir: PathBuf,

        /// Enable background colors
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Verify the whole chain once and print the report
    Verify,
    /// Request an audit report
    ExportAudit {
        /// Directory the report is saved into
        #[arg(long, value_name = "DIR", default_value = ".")]
        download_dir: PathBuf,
    },
    /// Print a single block
    Block {
        /// Index of the block, 0 for genesis
        index: u64,
    },
    /// Forget saved preferences (first-visit flag and remembered backend)
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path);
    let environment = Environment::resolve(
        args.api_url.clone(),
        std::env::var(ENVIRONMENT_VAR).ok(),
        config.api_url.clone(),
    );

    match args.command {
        Command::Start {
            headless,
            refresh_secs,
            download_dir,
            with_background,
        } => {
            remember_visit(&config_path, &config, args.api_url);
            let client = LedgerClient::new(environment)?;
            let session = setup_session(
                Arc::new(client),
                SessionOptions {
                    refresh_interval: Duration::from_secs(refresh_secs),
                    download_dir,
                    with_background_color: with_background,
                    first_visit: !config.visited && !headless,
                },
            );
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session).await
            }
        }
        Command::Verify => {
            let client = LedgerClient::new(environment)?;
            commands::verify(&client).await
        }
        Command::ExportAudit { download_dir } => {
            let client = LedgerClient::new(environment)?;
            commands::export_audit(&client, &download_dir).await
        }
        Command::Block { index } => {
            let client = LedgerClient::new(environment)?;
            commands::show_block(&client, index).await
        }
        Command::Reset => commands::reset(&config_path),
    }
}

/// Marks the dashboard as visited and remembers an explicitly given backend.
/// Failing to save only costs the splash screen next time, so it is not fatal.
fn remember_visit(config_path: &Path, config: &Config, api_url: Option<String>) {
    let updated = Config::new(true, api_url.or_else(|| config.api_url.clone()));
    if updated == *config {
        return;
    }
    if let Err(e) = updated.save(config_path) {
        print_cmd_warn!(
            "Could not save preferences.",
            "{}: {}",
            config_path.display(),
            e
        );
    }
}
