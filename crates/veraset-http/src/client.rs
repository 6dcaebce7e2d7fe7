//! HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Body, Method, Response};
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
};

/// Mockable HTTP client trait
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// POST a JSON body
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Response>;

    /// Execute a custom HTTP request
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        content_type: Option<&str>,
    ) -> Result<Response>;

    /// Total time budget of one request, body included
    fn timeout(&self) -> Duration;
}

/// Production HTTP client
///
/// Every request is sent exactly once; failures are returned to the caller.
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(if config.max_redirects > 0 {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        if config.pool_enabled {
            builder = builder.pool_idle_timeout(config.pool_idle_timeout);
        } else {
            builder = builder.pool_max_idle_per_host(0);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Response> {
        debug!("HTTP POST: {}", url);
        self.request(Method::POST, url, Some(Body::from(body)), Some("application/json"))
            .await
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        content_type: Option<&str>,
    ) -> Result<Response> {
        let url = url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let mut request = self.inner.request(method, url);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::from_transport(e, self.config.timeout))?;

        if !response.status().is_success() {
            return Err(HttpError::HttpStatus {
                status: response.status(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        Ok(response)
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }
}
