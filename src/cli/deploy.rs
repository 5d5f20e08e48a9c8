use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::deploy_report::DeployReport;
use crate::models::template_context::TemplateContext;
use crate::services::console::{ConsolePrompter, Prompter, ScriptedPrompter};
use crate::services::install_validator::InstallValidator;
use crate::services::scaffold_deployer::{ScaffoldDeployer, ScaffoldSource};
use crate::utils::config::SetupConfig;
use crate::utils::error::{Result, SetupError};
use crate::utils::fs_utils::create_path;

/// Validate an install directory and deploy the Askbot scaffold into it
#[derive(Debug, Args)]
pub struct DeployCommand {
    /// Target directory (asked interactively when omitted)
    pub directory: Option<PathBuf>,

    /// Deploy over existing Django files and create the directory without asking
    #[arg(long)]
    pub force: bool,

    /// Never prompt; a missing answer counts as "no"
    #[arg(long)]
    pub no_input: bool,

    /// New project: copy bootstrap files and create settings.py (default)
    #[arg(long, conflicts_with = "update")]
    pub new_project: bool,

    /// Existing project: skip bootstrap files and settings, only copy directories
    #[arg(long)]
    pub update: bool,

    /// Askbot source tree holding setup_templates/, doc/, cron/ and upfiles/
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// File appended to a newly created settings.py
    #[arg(long, value_name = "FILE")]
    pub local_settings: Option<PathBuf>,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for deploy command
#[derive(Debug, Serialize, Deserialize)]
pub struct DeployResponse {
    pub status: String,
    pub new_project: bool,
    pub report: DeployReport,
}

impl DeployCommand {
    /// Execute the deploy command
    pub fn run(&self, config: &SetupConfig, quiet: bool) -> Result<()> {
        let mut prompter: Box<dyn Prompter> = if self.no_input {
            Box::new(ScriptedPrompter::default())
        } else {
            Box::new(ConsolePrompter::stdio())
        };

        let validator = InstallValidator::new(self.force);
        let install_dir = match &self.directory {
            Some(directory) => validator.get_install_directory(directory, prompter.as_mut()),
            None => validator.ask_install_directory(prompter.as_mut()),
        }
        .ok_or_else(|| SetupError::ValidationError("no usable install directory".to_string()))?;

        create_path(&install_dir)?;

        let mut context = TemplateContext::new();
        if let Some(local_settings) = self.local_settings.as_ref().or(config.scaffold.local_settings.as_ref()) {
            context.set_local_settings(local_settings);
        }

        let source = self.source.clone().unwrap_or_else(|| config.scaffold.source_dir.clone());
        let verbosity = if self.json || quiet { 0 } else { config.scaffold.verbosity };
        let deployer = ScaffoldDeployer::new(ScaffoldSource::new(source)).with_verbosity(verbosity);

        let new_project = self.new_project || !self.update;
        let report = deployer.deploy_into(&install_dir, new_project, &context)?;

        if self.json {
            let response = DeployResponse {
                status: "success".to_string(),
                new_project,
                report,
            };
            let json_output = serde_json::to_string_pretty(&response)
                .map_err(|e| SetupError::ValidationError(format!("Failed to serialize JSON response: {}", e)))?;
            println!("{}", json_output);
        } else if !quiet {
            if report.is_noop() {
                println!("Nothing to copy, {} is up to date", install_dir.display());
            } else {
                println!("Askbot files deployed into {}", install_dir.display());
            }
        }

        Ok(())
    }
}
