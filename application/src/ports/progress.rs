//! Progress notification port
//!
//! Defines the interface the display layer implements to follow a
//! generation session as it happens.

use jasmine_domain::{
    Batch, BatchState, ContentHash, GenerationReport, GenerationSession, ImagePayload,
    SlotOutcome,
};
use std::time::Duration;

/// Callback for progress updates during image generation
///
/// Slot callbacks arrive in completion order, which is unrelated to slot
/// index order. Implementations live in the presentation layer.
pub trait GenerationProgress: Send + Sync {
    /// Called once when the session starts
    fn on_session_start(&self, session: &GenerationSession, total_slots: usize);

    /// Called before sleeping between rounds
    fn on_cooldown(&self, _duration: Duration) {}

    /// Called when a batch round starts
    fn on_batch_start(&self, batch: &Batch, round: usize, slots: &[usize]);

    /// Called as soon as a slot accepted a new image
    fn on_slot_filled(&self, index: usize, image: &ImagePayload, hash: &ContentHash);

    /// Called when a slot ran out of attempts in a round
    fn on_slot_unfilled(&self, _index: usize, _outcome: &SlotOutcome) {}

    /// Called when a round settles
    fn on_batch_settled(&self, _batch: &Batch, _state: BatchState) {}

    /// Called once when the session ends
    fn on_session_complete(&self, report: &GenerationReport);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {
    fn on_session_start(&self, _session: &GenerationSession, _total_slots: usize) {}
    fn on_batch_start(&self, _batch: &Batch, _round: usize, _slots: &[usize]) {}
    fn on_slot_filled(&self, _index: usize, _image: &ImagePayload, _hash: &ContentHash) {}
    fn on_session_complete(&self, _report: &GenerationReport) {}
}
