//! Generation configuration from TOML (`[generation]` section)
//!
//! ```toml
//! [generation]
//! slots = 9
//! batch_size = 3
//! max_attempts = 3
//! max_batch_retries = 3
//! cooldown_secs = 60
//! ```

use jasmine_application::GenerationParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw generation configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Number of grid slots
    pub slots: usize,
    /// Slots requested concurrently per batch
    pub batch_size: usize,
    /// Attempts per slot within one round
    pub max_attempts: usize,
    /// Batch retries for the whole session
    pub max_batch_retries: usize,
    /// Pause between rounds, in seconds
    pub cooldown_secs: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            slots: params.slot_count,
            batch_size: params.batch_size,
            max_attempts: params.max_attempts,
            max_batch_retries: params.max_batch_retries,
            cooldown_secs: params.cooldown.as_secs(),
        }
    }
}

impl FileGenerationConfig {
    pub fn to_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_slot_count(self.slots)
            .with_batch_size(self.batch_size)
            .with_max_attempts(self.max_attempts)
            .with_max_batch_retries(self.max_batch_retries)
            .with_cooldown(Duration::from_secs(self.cooldown_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        assert_eq!(
            FileGenerationConfig::default().to_params(),
            GenerationParams::default()
        );
    }

    #[test]
    fn test_to_params() {
        let config = FileGenerationConfig {
            slots: 6,
            batch_size: 2,
            max_attempts: 5,
            max_batch_retries: 1,
            cooldown_secs: 0,
        };
        let params = config.to_params();
        assert_eq!(params.slot_count, 6);
        assert_eq!(params.batch_size, 2);
        assert_eq!(params.max_attempts, 5);
        assert_eq!(params.max_batch_retries, 1);
        assert_eq!(params.cooldown, Duration::ZERO);
    }
}
