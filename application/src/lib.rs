//! Application layer for jasmine
//!
//! This crate contains the batch orchestration use case, port definitions,
//! and generation parameters. It depends only on the domain layer.

pub mod config;
pub mod gallery;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use gallery::SharedGallery;
pub use ports::{
    image_gateway::{GatewayError, GenerationRequest, ImageGateway},
    progress::{GenerationProgress, NoProgress},
};
pub use use_cases::generate_images::{GenerateImagesError, GenerateImagesUseCase, SEED_RANGE};
