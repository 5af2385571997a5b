//! JSON bodies of the gateway route
//!
//! Shared by [`HttpImageGateway`](super::HttpImageGateway) (client side) and
//! [`GatewayServer`](crate::server::GatewayServer) (server side).

use serde::{Deserialize, Serialize};

/// Request body of `POST /api/generate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Response body of `POST /api/generate`: either `imageUrl` or `error`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateReply {
    pub fn image(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            image_url: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_uses_camel_case() {
        let json = serde_json::to_string(&GenerateReply::image("data:image/png;base64,AA==")).unwrap();
        assert_eq!(json, r#"{"imageUrl":"data:image/png;base64,AA=="}"#);

        let json = serde_json::to_string(&GenerateReply::error("Prompt is required")).unwrap();
        assert_eq!(json, r#"{"error":"Prompt is required"}"#);
    }

    #[test]
    fn test_body_tolerates_missing_fields() {
        let body: GenerateBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body, GenerateBody::default());

        let body: GenerateBody = serde_json::from_str(r#"{"prompt":"a cat","seed":7}"#).unwrap();
        assert_eq!(body.prompt.as_deref(), Some("a cat"));
        assert_eq!(body.seed, Some(7));
    }
}
