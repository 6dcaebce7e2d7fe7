//! Port interfaces for external services
//!
//! The domain defines the contract; `veraset-http` provides the reqwest
//! implementation and tests provide in-memory fakes.

use async_trait::async_trait;

use crate::errors::DomainResult;
use crate::wire::{CalculationRequest, CalculationResponse};

/// The external share calculation service
#[async_trait]
pub trait CalculationPort: Send + Sync {
    /// Submit one request and wait for its response. Implementations must not retry.
    async fn calculate(&self, request: &CalculationRequest) -> DomainResult<CalculationResponse>;
}
