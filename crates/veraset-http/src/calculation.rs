//! Calculation service client
//!
//! Posts a [`CalculationRequest`] to the service endpoint once and maps every
//! failure onto the domain's service errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;
use veraset_domain::{
    CalculationPort, CalculationRequest, CalculationResponse, DomainError, DomainResult,
    ServiceFailure,
};

use crate::{
    client::{HttpClient, HttpClientTrait},
    config::HttpConfig,
    error::{HttpError, Result},
};

/// Service address used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path of the calculation endpoint
pub const DEFAULT_ENDPOINT: &str = "/calculate";

/// Longest raw body echoed back when the service sends no recognizable message
const MAX_RAW_MESSAGE: usize = 200;

/// [`CalculationPort`] backed by HTTP
pub struct CalculationClient {
    http: Arc<dyn HttpClientTrait>,
    url: Url,
}

impl CalculationClient {
    /// Create a client for `base_url` + `endpoint`
    pub fn new(base_url: &str, endpoint: &str, config: HttpConfig) -> Result<Self> {
        let http: Arc<dyn HttpClientTrait> = Arc::new(HttpClient::new(config)?);
        Self::with_client(http, base_url, endpoint)
    }

    /// Create a client on top of an existing HTTP client
    pub fn with_client(
        http: Arc<dyn HttpClientTrait>,
        base_url: &str,
        endpoint: &str,
    ) -> Result<Self> {
        Ok(Self {
            http,
            url: endpoint_url(base_url, endpoint)?,
        })
    }

    /// Full URL requests are posted to
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn send(&self, request: &CalculationRequest) -> Result<CalculationResponse> {
        let body = serde_json::to_vec(request).map_err(|e| HttpError::Encode(e.to_string()))?;
        let response = self.http.post_json(self.url.as_str(), body).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::from_transport(e, self.http.timeout()))?;
        let response: CalculationResponse = serde_json::from_slice(&bytes)
            .map_err(|e| HttpError::InvalidResponse(e.to_string()))?;
        Ok(response.with_submitted_tree(&request.family_tree))
    }
}

#[async_trait]
impl CalculationPort for CalculationClient {
    async fn calculate(&self, request: &CalculationRequest) -> DomainResult<CalculationResponse> {
        info!(url = %self.url, estate_value = request.estate_value, "Submitting calculation");
        match self.send(request).await {
            Ok(response) => {
                info!(
                    total_distributed = response.total_distributed,
                    "Calculation completed"
                );
                Ok(response)
            }
            Err(HttpError::HttpStatus { status, message }) => {
                let message = ServiceFailure::parse(&message)
                    .unwrap_or_else(|| raw_message(status, &message));
                warn!(status = status.as_u16(), %message, "Calculation service rejected request");
                Err(DomainError::ServiceError {
                    status: Some(status.as_u16()),
                    message,
                })
            }
            Err(err) => {
                warn!(error = %err, "Calculation request failed");
                Err(err.into())
            }
        }
    }
}

/// Join the endpoint path onto the base URL, keeping any base path prefix
fn endpoint_url(base_url: &str, endpoint: &str) -> Result<Url> {
    let mut base = base_url
        .trim()
        .parse::<Url>()
        .map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(endpoint.trim().trim_start_matches('/'))
        .map_err(|e| HttpError::InvalidUrl(format!("{endpoint}: {e}")))
}

fn raw_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    }
    match body.char_indices().nth(MAX_RAW_MESSAGE) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joining() {
        assert_eq!(
            endpoint_url(DEFAULT_BASE_URL, DEFAULT_ENDPOINT)
                .unwrap()
                .as_str(),
            "http://127.0.0.1:8000/calculate"
        );
        assert_eq!(
            endpoint_url("https://example.com/api", "calculate")
                .unwrap()
                .as_str(),
            "https://example.com/api/calculate"
        );
        assert_eq!(
            endpoint_url("https://example.com/api/", "/calculate-inheritance")
                .unwrap()
                .as_str(),
            "https://example.com/api/calculate-inheritance"
        );
        assert!(matches!(
            endpoint_url("not a url", DEFAULT_ENDPOINT),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_raw_message_fallbacks() {
        assert_eq!(
            raw_message(reqwest::StatusCode::BAD_GATEWAY, "  "),
            "Bad Gateway"
        );
        let long = "x".repeat(500);
        let message = raw_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &long);
        assert_eq!(message.len(), MAX_RAW_MESSAGE + 3);
    }
}
