use reqwest::Client;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::models::spam_check::{CommentCheck, RequestMeta, Requester, Verdict};

pub const AKISMET_API_VERSION: &str = "1.1";
pub const VERIFY_KEY_URL: &str = "https://rest.akismet.com/1.1/verify-key";
/// Path appended to the site URL to form the `blog` identifier
pub const BLOG_PATH: &str = "questions/";

/// Akismet comment-check client
#[derive(Debug, Clone)]
pub struct AkismetClient {
    /// HTTP client for API requests
    client: Client,
    api_key: String,
    /// Public site URL, e.g. `http://askbot.com/`
    app_url: String,
    /// Replaces both Akismet hosts when set (for testing)
    base_url: Option<String>,
    user_agent: String,
    key_status: OnceCell<bool>,
}

/// Akismet client errors
#[derive(Debug, thiserror::Error)]
pub enum AkismetError {
    /// HTTP request failed
    #[error("Akismet request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API key was rejected by verify-key
    #[error("Akismet rejected the API key")]
    InvalidKey,

    /// Response body was neither of the documented values
    #[error("Unexpected Akismet response (HTTP {status}): {body}{hint}", hint = debug_help_suffix(.debug_help))]
    UnexpectedResponse {
        status: u16,
        body: String,
        debug_help: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct KeyVerification<'a> {
    key: &'a str,
    blog: &'a str,
}

fn debug_help_suffix(help: &Option<String>) -> String {
    help.as_deref().map(|h| format!(" ({})", h)).unwrap_or_default()
}

/// `app_url` joined with [`BLOG_PATH`] by exactly one slash
pub fn questions_url(app_url: &str) -> String {
    format!("{}/{}", app_url.trim_end_matches('/'), BLOG_PATH)
}

impl AkismetClient {
    /// Create a client talking to the public Akismet hosts
    pub fn new(api_key: impl Into<String>, app_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key, app_url)
    }

    /// Create a client with a custom HTTP client
    pub fn with_client(client: Client, api_key: impl Into<String>, app_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            app_url: app_url.into(),
            base_url: None,
            user_agent: format!("askbot-setup/{}", env!("CARGO_PKG_VERSION")),
            key_status: OnceCell::new(),
        }
    }

    /// Route all calls to `base_url` (for testing)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn blog(&self) -> String {
        questions_url(&self.app_url)
    }

    fn verify_key_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}/verify-key", base, AKISMET_API_VERSION),
            None => VERIFY_KEY_URL.to_string(),
        }
    }

    fn comment_check_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}/comment-check", base, AKISMET_API_VERSION),
            None => format!("https://{}.rest.akismet.com/{}/comment-check", self.api_key, AKISMET_API_VERSION),
        }
    }

    async fn post_form<T: Serialize + ?Sized>(&self, url: &str, form: &T) -> Result<String, AkismetError> {
        let response = self.client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let debug_help = response
            .headers()
            .get("X-akismet-debug-help")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AkismetError::UnexpectedResponse {
                status: status.as_u16(),
                body,
                debug_help,
            });
        }
        Ok(body)
    }

    /// Ask Akismet whether the API key is valid for this site
    pub async fn verify_key(&self) -> Result<bool, AkismetError> {
        let blog = self.blog();
        let form = KeyVerification {
            key: &self.api_key,
            blog: &blog,
        };
        let body = self.post_form(&self.verify_key_url(), &form).await?;

        match body.trim() {
            "valid" => Ok(true),
            "invalid" => Ok(false),
            _ => Err(AkismetError::UnexpectedResponse {
                status: 200,
                body,
                debug_help: None,
            }),
        }
    }

    /// Classify `text` submitted through `request`.
    ///
    /// The author fields come from `author` if given, otherwise from an
    /// authenticated request user; anonymous submissions send neither.
    pub async fn check_spam(
        &self,
        text: &str,
        request: &RequestMeta,
        author: Option<&Requester>,
    ) -> Result<Verdict, AkismetError> {
        let key_valid = *self.key_status.get_or_try_init(|| self.verify_key()).await?;
        if !key_valid {
            return Err(AkismetError::InvalidKey);
        }

        let form = CommentCheck::new(text, request, author, self.blog());
        tracing::debug!(user_ip = %form.user_ip, has_author = form.comment_author.is_some(), "akismet comment-check");
        let body = self.post_form(&self.comment_check_url(), &form).await?;

        Verdict::from_body(&body).ok_or(AkismetError::UnexpectedResponse {
            status: 200,
            body,
            debug_help: None,
        })
    }
}
