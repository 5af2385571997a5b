//! Client for a running gateway route
//!
//! Posts `{ prompt, seed }` to a `POST /api/generate` endpoint (see
//! [`GatewayServer`](crate::server::GatewayServer)) and returns the
//! `imageUrl` of the reply untouched.

use super::wire::{GenerateBody, GenerateReply};
use async_trait::async_trait;
use jasmine_application::{GatewayError, GenerationRequest, ImageGateway};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/generate";

/// [`ImageGateway`] backed by an HTTP gateway route
pub struct HttpImageGateway {
    client: Client,
    endpoint: String,
}

impl HttpImageGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(GatewayError::NotConfigured(
                "gateway endpoint is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::NotConfigured(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageGateway for HttpImageGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let body = GenerateBody {
            prompt: Some(request.prompt.clone()),
            seed: Some(request.seed),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        debug!(
            "Gateway replied {} ({} bytes) for seed {}",
            status,
            text.len(),
            request.seed
        );

        interpret_reply(status, &text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Map a reqwest failure onto the port's error type
pub(crate) fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(error.to_string())
    }
}

fn interpret_reply(status: StatusCode, text: &str) -> Result<String, GatewayError> {
    let reply: Option<GenerateReply> = serde_json::from_str(text).ok();

    if status.is_success() {
        return reply.and_then(|r| r.image_url).ok_or_else(|| {
            GatewayError::InvalidResponse("reply carries no imageUrl".to_string())
        });
    }

    let message = reply
        .and_then(|r| r.error)
        .unwrap_or_else(|| text.trim().to_string());

    if status == StatusCode::BAD_REQUEST {
        Err(GatewayError::BadInput(message))
    } else {
        Err(GatewayError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}
