use serde::{Deserialize, Serialize};
use std::fmt;

/// Identified author of a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub username: String,
    pub email: String,
}

impl Requester {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Authentication state carried by an incoming request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestUser {
    #[default]
    Anonymous,
    Authenticated(Requester),
}

impl RequestUser {
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, RequestUser::Authenticated(_))
    }
}

/// Network metadata of the request that submitted the comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// `REMOTE_ADDR`
    pub remote_addr: String,
    /// `HTTP_USER_AGENT`
    pub user_agent: String,
    pub user: RequestUser,
}

impl RequestMeta {
    pub fn anonymous(remote_addr: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            user_agent: user_agent.into(),
            user: RequestUser::Anonymous,
        }
    }

    pub fn authenticated(
        remote_addr: impl Into<String>,
        user_agent: impl Into<String>,
        requester: Requester,
    ) -> Self {
        Self {
            remote_addr: remote_addr.into(),
            user_agent: user_agent.into(),
            user: RequestUser::Authenticated(requester),
        }
    }
}

/// Form fields of one comment-check call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentCheck {
    pub comment_content: String,
    pub user_ip: String,
    pub user_agent: String,
    pub blog: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_author_email: Option<String>,
}

impl CommentCheck {
    /// Build the payload. An explicit `author` wins over the request user;
    /// with neither, the author fields are left out entirely.
    pub fn new(text: &str, request: &RequestMeta, author: Option<&Requester>, blog: String) -> Self {
        let identity = author.or(match &request.user {
            RequestUser::Authenticated(requester) => Some(requester),
            RequestUser::Anonymous => None,
        });

        Self {
            comment_content: text.to_string(),
            user_ip: request.remote_addr.clone(),
            user_agent: request.user_agent.clone(),
            blog,
            comment_author: identity.map(|r| r.username.clone()),
            comment_author_email: identity.map(|r| r.email.clone()),
        }
    }
}

/// Classification returned by the spam-check service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Spam,
    Ham,
}

impl Verdict {
    pub const fn is_spam(self) -> bool {
        matches!(self, Verdict::Spam)
    }

    /// Parse the plain-text body of a comment-check response
    pub fn from_body(body: &str) -> Option<Self> {
        match body.trim() {
            "true" => Some(Verdict::Spam),
            "false" => Some(Verdict::Ham),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Spam => write!(f, "spam"),
            Verdict::Ham => write!(f, "not spam"),
        }
    }
}
