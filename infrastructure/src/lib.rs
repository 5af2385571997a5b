//! Infrastructure layer for jasmine
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, the gateway route, and configuration file loading.

pub mod config;
pub mod gateway;
pub mod server;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat,
    GatewayMode,
};
pub use gateway::{HttpImageGateway, HuggingFaceConfig, HuggingFaceGateway};
pub use server::{GatewayServer, ServerError};
