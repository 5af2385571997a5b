//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod gateway;
mod generation;
mod inference;
mod output;
mod server;

pub use gateway::{FileGatewayConfig, GatewayMode};
pub use generation::FileGenerationConfig;
pub use inference::FileInferenceConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Batch loop settings
    pub generation: FileGenerationConfig,
    /// Which adapter to use and where
    pub gateway: FileGatewayConfig,
    /// Hugging Face settings for direct mode and `--serve`
    pub inference: FileInferenceConfig,
    /// Gateway route settings
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let counts = [
            ("generation.slots", self.generation.slots),
            ("generation.batch_size", self.generation.batch_size),
            ("generation.max_attempts", self.generation.max_attempts),
        ];
        if let Some((field, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigValidationError::Zero(*field));
        }

        if self.gateway.timeout_secs == 0 {
            return Err(ConfigValidationError::Zero("gateway.timeout_secs"));
        }
        if self.inference.timeout_secs == 0 {
            return Err(ConfigValidationError::Zero("inference.timeout_secs"));
        }

        let strings = [
            ("gateway.url", &self.gateway.url),
            ("inference.base_url", &self.inference.base_url),
            ("inference.model", &self.inference.model),
            ("server.bind", &self.server.bind),
        ];
        if let Some((field, _)) = strings.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigValidationError::Empty(*field));
        }

        Ok(())
    }
}
