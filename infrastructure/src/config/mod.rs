//! Configuration file loading for jasmine
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `HUGGING_FACE_API_KEY`, `JASMINE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./jasmine.toml` or `./.jasmine.toml`
//! 4. Global: `~/.config/jasmine/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGatewayConfig, FileGenerationConfig,
    FileInferenceConfig, FileOutputConfig, FileOutputFormat, FileServerConfig, GatewayMode,
};
pub use loader::ConfigLoader;
