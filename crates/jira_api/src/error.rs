//! Error model used by Jira API client operations.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Represents the error conditions that can occur during Jira API interactions, including HTTP errors with status and message, authentication failures, timeouts, network issues and serialization problems.
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("http {status}: {message}")]
    Http {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl JiraError {
    /// Constructs an HTTP error variant with the first server-reported message as context.
    pub fn http(status: StatusCode, code: Option<String>, message: impl Into<String>) -> Self {
        JiraError::Http {
            status,
            code,
            message: message.into(),
        }
    }

    /// True when the server rejected the credentials or the caller's permissions.
    pub fn is_authentication(&self) -> bool {
        matches!(self, JiraError::Authentication(_))
    }

    /// True for 404 responses, typically a wrong server URL or a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, JiraError::Http { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

impl From<reqwest::Error> for JiraError {
    /// Converts reqwest errors into semantic JiraError variants.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JiraError::Timeout(err.to_string())
        } else if err.is_status() {
            let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            JiraError::Http {
                status,
                code: None,
                message: err.to_string(),
            }
        } else if err.is_connect() {
            JiraError::Network(err.to_string())
        } else {
            JiraError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for JiraError {
    /// Converts serde_json decode/encode failures into serialization errors.
    fn from(err: serde_json::Error) -> Self {
        JiraError::Serialization(err.to_string())
    }
}
