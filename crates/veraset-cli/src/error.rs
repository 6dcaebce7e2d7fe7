// CLI error types and user-facing messages

use std::path::PathBuf;

use thiserror::Error;
use veraset_config::ConfigError;
use veraset_domain::DomainError;
use veraset_http::HttpError;
use veraset_sessions::SessionError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Family file {path}: {message}")]
    FamilyFile { path: PathBuf, message: String },

    #[error("Rejected relative {who}: {source}")]
    Rejected {
        who: String,
        #[source]
        source: DomainError,
    },

    #[error("Calculation failed: {0}")]
    Calculation(#[from] SessionError),

    #[error("Service client error: {0}")]
    Client(#[from] HttpError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nCheck the [service] and [logging] sections of your config file.",
                    msg
                )
            }
            CliError::FamilyFile { path, message } => {
                format!("Could not read family file {}: {}", path.display(), message)
            }
            CliError::Rejected { who, source } => {
                format!("{} cannot be recorded: {}", who, source)
            }
            CliError::Calculation(SessionError::Domain(err)) if err.is_retryable() => {
                format!(
                    "{}\n\nThe calculation service may be temporarily unavailable. Try again shortly.",
                    err
                )
            }
            CliError::Calculation(err) => err.to_string(),
            CliError::Client(e) => {
                format!(
                    "Could not set up the service client: {}\n\nCheck service.base_url and service.proxy.",
                    e
                )
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Calculation(SessionError::Domain(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Internal(format!("JSON encoding failed: {}", err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
