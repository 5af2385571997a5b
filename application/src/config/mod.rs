//! Application-level configuration.
//!
//! - [`GenerationParams`] for batch loop control (slots, batch size, attempts, cooldown)

pub mod generation_params;

pub use generation_params::GenerationParams;
