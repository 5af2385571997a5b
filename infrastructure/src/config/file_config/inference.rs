//! Hugging Face inference configuration from TOML (`[inference]` section)
//!
//! The API key is normally supplied through `HUGGING_FACE_API_KEY` rather
//! than the file.

use crate::gateway::huggingface::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_NEGATIVE_PROMPT, DEFAULT_TIMEOUT, HuggingFaceConfig,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw inference configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInferenceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub negative_prompt: String,
    pub timeout_secs: u64,
}

impl Default for FileInferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl FileInferenceConfig {
    /// Build the client settings, or `None` without an API key
    pub fn to_huggingface(&self) -> Option<HuggingFaceConfig> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        Some(
            HuggingFaceConfig::new(api_key)
                .with_base_url(&self.base_url)
                .with_model(&self.model)
                .with_negative_prompt(&self.negative_prompt)
                .with_timeout(Duration::from_secs(self.timeout_secs)),
        )
    }
}
