//! HTTP client error types

use thiserror::Error;
use veraset_domain::DomainError;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Request body could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// Response body did not match the expected shape
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Map a transport failure, reporting an elapsed request budget as a timeout
    pub fn from_transport(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            HttpError::Timeout(timeout)
        } else {
            HttpError::RequestFailed(err)
        }
    }
}

impl From<HttpError> for DomainError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout(_) | HttpError::RequestFailed(_) => {
                DomainError::ServiceUnavailable {
                    reason: err.to_string(),
                }
            }
            HttpError::HttpStatus { status, message } => DomainError::ServiceError {
                status: Some(status.as_u16()),
                message,
            },
            HttpError::Encode(message) | HttpError::InvalidResponse(message) => DomainError::ServiceError {
                status: None,
                message,
            },
            HttpError::InvalidUrl(_) | HttpError::InvalidProxy(_) | HttpError::BuildError(_) => {
                DomainError::ServiceUnavailable {
                    reason: err.to_string(),
                }
            }
        }
    }
}
