//! Hugging Face inference client
//!
//! Calls a hosted text-to-image model directly and wraps the returned image
//! bytes into a `data:` URI. One request per call: no retry and no caching.

use super::http::transport_error;
use async_trait::async_trait;
use jasmine_application::{GatewayError, GenerationRequest, ImageGateway};
use jasmine_domain::ImagePayload;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-2-1";
pub const DEFAULT_NEGATIVE_PROMPT: &str = "blurry, bad quality, distorted, disfigured";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Media type assumed when the response does not name one
pub const FALLBACK_MIME: &str = "image/jpeg";

/// Environment variable holding the API token
pub const API_KEY_ENV: &str = "HUGGING_FACE_API_KEY";

/// Connection settings for [`HuggingFaceGateway`]
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub negative_prompt: String,
    pub timeout: Duration,
}

impl HuggingFaceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model endpoint, e.g. `https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-2-1`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct InferenceBody<'a> {
    inputs: &'a str,
    parameters: InferenceParameters<'a>,
}

#[derive(Debug, Serialize)]
struct InferenceParameters<'a> {
    negative_prompt: &'a str,
    seed: u64,
}

/// [`ImageGateway`] that talks to the Hugging Face inference API
pub struct HuggingFaceGateway {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceGateway {
    /// Fails with [`GatewayError::NotConfigured`] when the API key is blank.
    pub fn new(config: HuggingFaceConfig) -> Result<Self, GatewayError> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::NotConfigured(format!(
                "{API_KEY_ENV} environment variable is not configured"
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::NotConfigured(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }
}

#[async_trait]
impl ImageGateway for HuggingFaceGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let body = InferenceBody {
            inputs: &request.prompt,
            parameters: InferenceParameters {
                negative_prompt: &self.config.negative_prompt,
                seed: request.seed,
            },
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(transport_error)?;

        debug!(
            "{} replied {} with {} bytes ({})",
            self.config.model,
            status,
            bytes.len(),
            content_type.as_deref().unwrap_or("no content-type")
        );

        encode_image(status, content_type.as_deref(), &bytes)
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

/// Turn a raw inference response into a `data:` URI
fn encode_image(status: u16, content_type: Option<&str>, body: &[u8]) -> Result<String, GatewayError> {
    if !(200..300).contains(&status) {
        return Err(GatewayError::Upstream {
            status,
            message: upstream_message(body),
        });
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(FALLBACK_MIME);

    if !mime.starts_with("image/") {
        return Err(GatewayError::Upstream {
            status,
            message: format!("expected an image, got {mime}: {}", upstream_message(body)),
        });
    }
    if body.is_empty() {
        return Err(GatewayError::InvalidResponse("empty image body".to_string()));
    }

    Ok(ImagePayload::from_bytes(mime, body).to_data_uri())
}

/// Best-effort error text from an inference error body (`{"error": "..."}`)
fn upstream_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => String::from_utf8_lossy(body).trim().chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let config = HuggingFaceConfig::new("hf_token").with_base_url("http://localhost:8080/");
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/models/stabilityai/stable-diffusion-2-1"
        );
    }

    #[test]
    fn test_body_shape() {
        let body = InferenceBody {
            inputs: "a cat",
            parameters: InferenceParameters {
                negative_prompt: DEFAULT_NEGATIVE_PROMPT,
                seed: 42,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "a cat");
        assert_eq!(json["parameters"]["negative_prompt"], DEFAULT_NEGATIVE_PROMPT);
        assert_eq!(json["parameters"]["seed"], 42);
    }

    #[test]
    fn test_blank_api_key_is_not_configured() {
        let result = HuggingFaceGateway::new(HuggingFaceConfig::new(" "));
        match result {
            Err(GatewayError::NotConfigured(message)) => assert!(message.contains(API_KEY_ENV)),
            _ => panic!("expected NotConfigured"),
        }
    }

    #[test]
    fn test_encode_image_uses_content_type() {
        let uri = encode_image(200, Some("image/png"), b"png-bytes").unwrap();
        let payload = ImagePayload::parse(&uri).unwrap();
        assert_eq!(payload.mime(), "image/png");
        assert_eq!(payload.decode().unwrap(), b"png-bytes");
    }

    #[test]
    fn test_encode_image_falls_back_to_jpeg() {
        let uri = encode_image(200, None, b"bytes").unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let uri = encode_image(200, Some("image/webp; charset=binary"), b"bytes").unwrap();
        assert!(uri.starts_with("data:image/webp;base64,"));
    }

    #[test]
    fn test_encode_image_rejects_error_status() {
        let result = encode_image(503, Some("application/json"), br#"{"error":"Model is loading"}"#);
        assert_eq!(
            result,
            Err(GatewayError::Upstream {
                status: 503,
                message: "Model is loading".to_string(),
            })
        );
    }

    #[test]
    fn test_encode_image_rejects_non_image_body() {
        let result = encode_image(200, Some("application/json"), br#"{"error":"nope"}"#);
        assert!(matches!(result, Err(GatewayError::Upstream { status: 200, .. })));

        let result = encode_image(200, Some("image/png"), b"");
        assert!(matches!(result, Err(GatewayError::InvalidResponse(_))));
    }
}
