// Common error types for askbot-setup

use crate::services::akismet_client::AkismetError;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error(transparent)]
    SpamCheck(#[from] AkismetError),
}

impl From<anyhow::Error> for SetupError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<std::io::Error>() {
            Ok(io) => SetupError::IoError(io),
            Err(other) => SetupError::IoError(std::io::Error::other(format!("{:#}", other))),
        }
    }
}

impl From<tera::Error> for SetupError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part of the message in the source chain
        let mut msg = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        SetupError::TemplateError(msg)
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;

/// Operator-facing rendering of a [`SetupError`] with a process exit code
#[derive(Debug)]
pub struct UserError {
    pub message: String,
    pub hint: Option<String>,
    pub exit_code: i32,
}

impl UserError {
    pub fn from_setup_error(err: &SetupError) -> Self {
        let (hint, exit_code) = match err {
            SetupError::IoError(_) => (None, 74),
            SetupError::ConfigError(_) => (
                Some("Check askbot-setup.toml or pass --config <FILE>.".to_string()),
                78,
            ),
            SetupError::ValidationError(_) => (None, 65),
            SetupError::TemplateError(_) => (
                Some("Check that --source points at an askbot source tree.".to_string()),
                66,
            ),
            SetupError::SpamCheck(AkismetError::InvalidKey) => (
                Some("Set a valid key with --api-key or AKISMET_API_KEY.".to_string()),
                77,
            ),
            SetupError::SpamCheck(_) => (None, 69),
        };

        Self {
            message: err.to_string(),
            hint,
            exit_code,
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {}", self.message);
        if let Some(hint) = &self.hint {
            eprintln!("\n{}", hint);
        }
    }
}
