//! Error types for the WCPS client.

use thiserror::Error;
use wcps_query::QueryError;

/// Result type alias using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to a coverage server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Cannot decode response: {0}")]
    Nondecodable(String),
}

impl ClientError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Status { status, .. } => *status >= 500 || *status == 429,
            ClientError::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// HTTP status reported by the server, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for ClientError {
    fn from(err: serde_yaml::Error) -> Self {
        ClientError::Config(format!("YAML error: {}", err))
    }
}
