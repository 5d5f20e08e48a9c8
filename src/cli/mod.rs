// CLI module for command-line interface

pub mod deploy;
pub mod spam;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::config::ConfigParser;
use crate::utils::error::Result;

use self::deploy::DeployCommand;
use self::spam::{CheckSpamCommand, VerifyKeyCommand};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "askbot-setup")]
#[command(about = "Deploy Askbot sites and check comments against Akismet")]
#[command(long_about = r#"askbot-setup prepares a directory for an Askbot (Django Q&A) site and
talks to the Akismet spam-check service.

Features:
  • Validates install directories (permissions, naming, existing Django projects)
  • Copies the bootstrap files and renders settings.py
  • Re-runs safely: operator changes are never overwritten, except urls.py
  • Akismet comment-check and key verification

Examples:
  askbot-setup deploy ./mysite               Deploy into ./mysite
  askbot-setup deploy --force --no-input /srv/qa
  askbot-setup verify-key --api-key KEY      Check an Akismet API key
  askbot-setup check-spam "buy now" --ip 1.2.3.4 --user-agent curl"#)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./askbot-setup.toml)
    #[arg(long, global = true, env = "ASKBOT_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate an install directory and deploy the Askbot scaffold into it
    #[command(long_about = r#"Validate an install directory and deploy the Askbot scaffold into it.

The directory must be writable, must not sit inside another Django project
and its name must be a valid Python identifier (hyphens allowed). When the
directory does not exist you are asked before it is created.

Existing files are kept. The only exception is urls.py, which is always
replaced. An existing settings.py is never touched.

Examples:
  askbot-setup deploy                        Ask where to deploy
  askbot-setup deploy ./mysite --source /opt/askbot
  askbot-setup deploy ./mysite --update      Only refresh doc/, cron/, upfiles/
  askbot-setup deploy ./mysite --json        Print a JSON report"#)]
    Deploy(DeployCommand),

    /// Ask Akismet whether a comment is spam
    CheckSpam(CheckSpamCommand),

    /// Check that the Akismet API key is valid for the site
    VerifyKey(VerifyKeyCommand),
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Execute a CLI command
    pub async fn execute(cli: Cli) -> Result<()> {
        let config = ConfigParser::load(cli.config.as_deref())?;

        match cli.command {
            Commands::Deploy(cmd) => cmd.run(&config, cli.quiet),
            Commands::CheckSpam(cmd) => cmd.run(&config).await,
            Commands::VerifyKey(cmd) => cmd.run(&config).await,
        }
    }
}
