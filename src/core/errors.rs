use crate::storage::StorageError;
use thiserror::Error;

/// Coarse classification of a fetch failure, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Timeout,
    Connection,
    HttpStatus,
    Other,
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("failed to connect to the server: {0}")]
    Connection(String),

    #[error("{status} returned by {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid selector for `{field}`: {message}")]
    Selector { field: &'static str, message: String },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl From<reqwest::Error> for ScraperError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScraperError::Timeout(err.to_string())
        } else if err.is_connect() {
            ScraperError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ScraperError::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            ScraperError::Http(err)
        }
    }
}

impl ScraperError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScraperError::Timeout(_) => FailureKind::Timeout,
            ScraperError::Connection(_) => FailureKind::Connection,
            ScraperError::HttpStatus { .. } => FailureKind::HttpStatus,
            _ => FailureKind::Other,
        }
    }

    /// One-line message for the error stream, worded by failure kind.
    pub fn diagnostic(&self) -> String {
        match self.kind() {
            FailureKind::Timeout => "error: request timed out".to_string(),
            FailureKind::Connection => "error: failed to connect to the server".to_string(),
            FailureKind::HttpStatus => format!("error: http error occurred - {}", self),
            FailureKind::Other => format!("error: request failed - {}", self),
        }
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
