//! HTTP access to the Veraset calculation service
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: Timeouts, proxy, user-agent, pooling
//! - **Single attempt**: failures surface to the caller, nothing is retried
//! - **Testing support**: Easy mocking with wiremock

pub mod calculation;
pub mod client;
pub mod config;
pub mod error;

pub use calculation::{CalculationClient, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
pub use client::{HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};

/// Re-export commonly used types
pub use reqwest::StatusCode;
