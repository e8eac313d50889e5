// Error types for the GitHub REST client.
// Classifies transport failures, decode failures and GitHub API error replies.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::Rate;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(ErrorResponse),

    #[error("{0}")]
    RateLimited(RateLimitError),

    #[error("{0}")]
    SecondaryRateLimited(AbuseRateLimitError),

    #[error("{0}")]
    Accepted(AcceptedError),

    #[error("two-factor authentication required: {0}")]
    TwoFactorRequired(ErrorResponse),

    #[error("unknown event type: {0}")]
    UnknownEvent(String),

    #[error("Missing GITHUB_TOKEN environment variable")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status of the reply that caused this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) | Error::TwoFactorRequired(e) => Some(e.status),
            Error::RateLimited(e) => Some(e.response.status),
            Error::SecondaryRateLimited(e) => Some(e.response.status),
            Error::Accepted(_) => Some(202),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when GitHub answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// A single validation problem reported by GitHub.
///
/// Some endpoints list bare strings instead of objects; those decode into
/// `message` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ErrorDetailRepr")]
pub struct ErrorDetail {
    pub resource: Option<String>,
    pub field: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetailRepr {
    Message(String),
    Detail {
        resource: Option<String>,
        field: Option<String>,
        code: Option<String>,
        message: Option<String>,
    },
}

impl From<ErrorDetailRepr> for ErrorDetail {
    fn from(repr: ErrorDetailRepr) -> Self {
        match repr {
            ErrorDetailRepr::Message(message) => ErrorDetail {
                message: Some(message),
                ..Default::default()
            },
            ErrorDetailRepr::Detail {
                resource,
                field,
                code,
                message,
            } => ErrorDetail {
                resource,
                field,
                code,
                message,
            },
        }
    }
}

/// Details about a blocked resource (legal takedowns and similar).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBlock {
    pub reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Error body GitHub sends with non-2xx replies, plus the request it answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: u16,
    #[serde(skip)]
    pub method: String,
    #[serde(skip)]
    pub url: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    pub block: Option<ErrorBlock>,
    pub documentation_url: Option<String>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {} {:?}",
            self.method, self.url, self.status, self.message, self.errors
        )
    }
}

/// Primary rate limit exhausted.
#[derive(Debug, Clone)]
pub struct RateLimitError {
    pub rate: Rate,
    pub response: ErrorResponse,
}

impl fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reset = self
            .rate
            .reset
            .map(|r| r.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        write!(
            f,
            "{} {}: {} {} [rate reset at {}]",
            self.response.method,
            self.response.url,
            self.response.status,
            self.response.message,
            reset
        )
    }
}

/// Secondary ("abuse") rate limit triggered.
#[derive(Debug, Clone)]
pub struct AbuseRateLimitError {
    pub retry_after: Option<std::time::Duration>,
    pub response: ErrorResponse,
}

impl fmt::Display for AbuseRateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} {}",
            self.response.method, self.response.url, self.response.status, self.response.message
        )?;
        if let Some(after) = self.retry_after {
            write!(f, " [retry after {}s]", after.as_secs())?;
        }
        Ok(())
    }
}

/// GitHub accepted the request but is still computing the result.
#[derive(Debug, Clone)]
pub struct AcceptedError {
    pub raw: String,
}

impl fmt::Display for AcceptedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job scheduled on GitHub side; try again later")
    }
}
