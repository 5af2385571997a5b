//! Domain layer for jasmine
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Gallery
//!
//! A fixed grid of slots that fill with generated images. Slots keep their
//! previous image until a newer session replaces it, and never go back to
//! empty.
//!
//! ## Deduplication
//!
//! Every accepted image's [`ContentHash`] is remembered. Repeated
//! submissions of the same prompt keep that history, so the same image is
//! never accepted twice for one prompt.
//!
//! ## Batches
//!
//! Slots are requested in batches ([`BatchPlan`]); each batch is driven by a
//! small state machine ([`BatchRun`]) with a session-wide [`RetryBudget`].

pub mod core;
pub mod gallery;
pub mod generation;
pub mod grid;
pub mod image;

// Re-export commonly used types
pub use core::{error::DomainError, prompt::Prompt};
pub use gallery::{AcceptOutcome, Gallery, GallerySnapshot};
pub use generation::{
    plan::{Batch, BatchPlan, BatchRun, BatchState, RetryBudget},
    report::{AttemptFailure, GenerationReport, SlotOutcome},
    session::{GenerationSession, SessionTag},
};
pub use grid::{
    layout::{CellSpan, GRID_COLUMNS, GridLayout},
    slot::{Slot, SlotGrid},
    viewer::ImageViewer,
};
pub use image::{
    hash::{ContentHash, SeenHashes},
    payload::ImagePayload,
};
