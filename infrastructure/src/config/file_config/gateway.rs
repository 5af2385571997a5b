//! Gateway selection from TOML (`[gateway]` section)

use crate::gateway::http::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Which adapter serves image requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// A running gateway route (`POST /api/generate`)
    #[default]
    Http,
    /// The Hugging Face inference API, using `[inference]`
    Direct,
}

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    pub mode: GatewayMode,
    /// Endpoint used in `http` mode
    pub url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            mode: GatewayMode::default(),
            url: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_deserialize() {
        let config: FileGatewayConfig = toml::from_str(r#"mode = "direct""#).unwrap();
        assert_eq!(config.mode, GatewayMode::Direct);
        assert_eq!(config.url, DEFAULT_ENDPOINT);
    }
}
