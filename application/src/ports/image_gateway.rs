//! Image Gateway port
//!
//! Defines the interface for requesting one image from a text-to-image
//! service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Bad input: {0}")]
    BadInput(String),

    #[error("Upstream failure (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

/// One generation request: the wire body of a gateway call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub seed: u64,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, seed: u64) -> Self {
        Self {
            prompt: prompt.into(),
            seed,
        }
    }
}

/// Gateway for image generation
///
/// Implementations are stateless: no retry and no caching, so the
/// orchestrator's retry policy is the only one in play. Implementations
/// (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Generate one image, returning its `data:image/...` URI as received.
    ///
    /// The URI is not validated here; callers decide what a well-formed
    /// payload is.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;

    /// Short name for logs
    fn name(&self) -> &str {
        "gateway"
    }
}
