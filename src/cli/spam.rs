use clap::Args;
use serde::{Deserialize, Serialize};

use crate::models::spam_check::{RequestMeta, Requester, Verdict};
use crate::services::akismet_client::AkismetClient;
use crate::utils::config::SetupConfig;
use crate::utils::error::{Result, SetupError};
use crate::utils::validation::validate_app_url;

/// Akismet credentials and site URL, overriding the configuration file
#[derive(Debug, Clone, Default, Args)]
pub struct AkismetArgs {
    /// Akismet API key
    #[arg(long, env = "AKISMET_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Public URL of the site
    #[arg(long, env = "ASKBOT_APP_URL")]
    pub app_url: Option<String>,

    /// Alternative Akismet endpoint
    #[arg(long, env = "AKISMET_ENDPOINT", hide = true)]
    pub endpoint: Option<String>,
}

impl AkismetArgs {
    pub fn build_client(&self, config: &SetupConfig) -> Result<AkismetClient> {
        if config.akismet.is_disabled() {
            return Err(SetupError::ConfigError(
                "Akismet is disabled (akismet.enabled = false)".to_string(),
            ));
        }
        let api_key = self
            .api_key
            .clone()
            .or_else(|| config.akismet.api_key.clone())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                SetupError::ConfigError(
                    "No Akismet API key. Pass --api-key, set AKISMET_API_KEY or akismet.api_key".to_string(),
                )
            })?;
        let app_url = self.app_url.clone().unwrap_or_else(|| config.site.app_url.clone());
        validate_app_url(&app_url)?;

        let client = AkismetClient::new(api_key, app_url);
        Ok(match &self.endpoint {
            Some(endpoint) => client.with_base_url(endpoint.as_str()),
            None => client,
        })
    }
}

/// Ask Akismet whether a comment is spam
#[derive(Debug, Args)]
pub struct CheckSpamCommand {
    /// Comment text
    pub text: String,

    /// Address the comment was posted from
    #[arg(long)]
    pub ip: String,

    /// User-Agent header of the posting browser
    #[arg(long)]
    pub user_agent: String,

    /// Explicit comment author (wins over --request-user)
    #[arg(long, requires = "author_email")]
    pub author: Option<String>,

    #[arg(long, requires = "author")]
    pub author_email: Option<String>,

    /// Authenticated user attached to the request
    #[arg(long, requires = "request_email")]
    pub request_user: Option<String>,

    #[arg(long, requires = "request_user")]
    pub request_email: Option<String>,

    #[command(flatten)]
    pub akismet: AkismetArgs,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// JSON response format for check-spam command
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckSpamResponse {
    pub spam: bool,
    pub verdict: Verdict,
}

impl CheckSpamCommand {
    fn request_meta(&self) -> RequestMeta {
        match (&self.request_user, &self.request_email) {
            (Some(user), Some(email)) => {
                RequestMeta::authenticated(&self.ip, &self.user_agent, Requester::new(user, email))
            }
            _ => RequestMeta::anonymous(&self.ip, &self.user_agent),
        }
    }

    fn author(&self) -> Option<Requester> {
        match (&self.author, &self.author_email) {
            (Some(name), Some(email)) => Some(Requester::new(name, email)),
            _ => None,
        }
    }

    pub async fn run(&self, config: &SetupConfig) -> Result<()> {
        let client = self.akismet.build_client(config)?;
        let author = self.author();
        let verdict = client
            .check_spam(&self.text, &self.request_meta(), author.as_ref())
            .await?;

        if self.json {
            let response = CheckSpamResponse {
                spam: verdict.is_spam(),
                verdict,
            };
            let json_output = serde_json::to_string_pretty(&response)
                .map_err(|e| SetupError::ValidationError(format!("Failed to serialize JSON response: {}", e)))?;
            println!("{}", json_output);
        } else {
            println!("{}", verdict);
        }
        Ok(())
    }
}

/// Check that the Akismet API key is valid for the site
#[derive(Debug, Args)]
pub struct VerifyKeyCommand {
    #[command(flatten)]
    pub akismet: AkismetArgs,
}

impl VerifyKeyCommand {
    pub async fn run(&self, config: &SetupConfig) -> Result<()> {
        let client = self.akismet.build_client(config)?;
        if client.verify_key().await? {
            println!("Akismet key is valid for {}", client.blog());
            Ok(())
        } else {
            Err(SetupError::SpamCheck(crate::services::akismet_client::AkismetError::InvalidKey))
        }
    }
}
