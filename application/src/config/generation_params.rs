//! Generation parameters for the batch loop.
//!
//! [`GenerationParams`] groups the static parameters that control the batch
//! loop in [`GenerateImagesUseCase`](crate::use_cases::generate_images::GenerateImagesUseCase).

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SLOT_COUNT: usize = 9;
pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_MAX_BATCH_RETRIES: usize = 3;
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

/// Batch loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Number of grid slots to fill.
    pub slot_count: usize,
    /// Slots requested concurrently per batch.
    pub batch_size: usize,
    /// Attempts per slot within one round (errors, malformed and duplicate
    /// responses all count).
    pub max_attempts: usize,
    /// Batch retries shared by the whole session.
    pub max_batch_retries: usize,
    /// Pause before every round except the first.
    pub cooldown: Duration,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_batch_retries: DEFAULT_MAX_BATCH_RETRIES,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_slot_count(mut self, count: usize) -> Self {
        self.slot_count = count;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_max_batch_retries(mut self, max: usize) -> Self {
        self.max_batch_retries = max;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.slot_count == 0 {
            return Err("slot_count must be at least 1");
        }
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1");
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1");
        }
        Ok(())
    }

    /// Number of batches a full pass takes
    pub fn batch_count(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        self.slot_count.div_ceil(self.batch_size)
    }
}
