// askbot-setup - Askbot site installer
// Main CLI entry point

use askbot_setup::cli::{Cli, CliDispatcher};
use askbot_setup::utils::error::UserError;
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

fn default_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Log to stderr; `RUST_LOG` wins over the -v/-q flags
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("askbot_setup={}", default_level(verbose, quiet))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = CliDispatcher::execute(cli).await;

    if let Err(err) = result {
        let user_error = UserError::from_setup_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}
