// Configuration utilities and TOML parsing

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{Result, SetupError};
use crate::utils::validation::validate_app_url;

pub const CONFIG_FILE_NAME: &str = "askbot-setup.toml";
pub const CONFIG_ENV_VAR: &str = "ASKBOT_SETUP_CONFIG";

/// Contents of `askbot-setup.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub site: SiteConfig,
    pub akismet: AkismetConfig,
    pub scaffold: ScaffoldConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public URL of the site, e.g. `http://askbot.com/`
    pub app_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:8000/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AkismetConfig {
    /// `None` leaves Akismet usable with credentials from the command line;
    /// `Some(false)` switches spam checks off entirely
    pub enabled: Option<bool>,
    pub api_key: Option<String>,
}

impl AkismetConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }

    pub fn is_disabled(&self) -> bool {
        self.enabled == Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Root of the askbot source tree holding `setup_templates/`, `doc/`, ...
    pub source_dir: PathBuf,
    /// Local overrides appended to a freshly rendered settings.py
    pub local_settings: Option<PathBuf>,
    pub verbosity: u8,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            local_settings: None,
            verbosity: 1,
        }
    }
}

/// Configuration parsing and validation utilities
pub struct ConfigParser;

impl ConfigParser {
    /// Load configuration from the first location that exists.
    ///
    /// Order: explicit path, `$ASKBOT_SETUP_CONFIG`, `./askbot-setup.toml`,
    /// then the user config dir. Falls back to defaults when nothing exists.
    /// An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> Result<SetupConfig> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        for candidate in Self::candidate_paths() {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "loading configuration");
                return Self::load_file(&candidate);
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(SetupConfig::default())
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<SetupConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SetupError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SetupError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<SetupConfig> {
        let config: SetupConfig = toml::from_str(content)
            .map_err(|e| SetupError::ConfigError(format!("Invalid TOML syntax: {}", e)))?;
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &SetupConfig) -> Result<()> {
        if config.akismet.is_enabled() {
            validate_app_url(&config.site.app_url)?;
            if config.akismet.api_key.as_deref().map_or(true, str::is_empty) {
                return Err(SetupError::ConfigError(
                    "akismet.enabled is set but akismet.api_key is missing".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(env_path));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("askbot-setup").join("config.toml"));
        }
        paths
    }
}
