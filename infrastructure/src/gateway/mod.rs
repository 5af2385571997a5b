//! Image gateway adapters
//!
//! - [`HttpImageGateway`]: talks to a running gateway route
//! - [`HuggingFaceGateway`]: talks to the hosted model directly

pub mod http;
pub mod huggingface;
pub mod wire;

pub use http::HttpImageGateway;
pub use huggingface::{HuggingFaceConfig, HuggingFaceGateway};
pub use wire::{GenerateBody, GenerateReply};
