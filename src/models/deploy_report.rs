use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened to settings.py during a deploy run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsOutcome {
    /// Not a new project, settings were not touched
    #[default]
    NotRequested,
    Created,
    /// Rendered and appended the local overrides file
    CreatedWithLocalSettings,
    KeptExisting,
}

/// Summary of one `deploy_into` run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployReport {
    pub install_dir: PathBuf,
    pub files_copied: Vec<String>,
    pub files_overwritten: Vec<String>,
    pub files_skipped: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub settings: SettingsOutcome,
    pub dirs_copied: Vec<String>,
    pub dirs_skipped: Vec<String>,
}

impl DeployReport {
    pub fn new(install_dir: PathBuf) -> Self {
        Self {
            install_dir,
            ..Self::default()
        }
    }

    /// True when the run only left existing content in place
    pub fn is_noop(&self) -> bool {
        self.files_copied.is_empty()
            && self.files_overwritten.is_empty()
            && self.dirs_copied.is_empty()
            && matches!(
                self.settings,
                SettingsOutcome::KeptExisting | SettingsOutcome::NotRequested
            )
    }
}
