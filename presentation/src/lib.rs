//! Presentation layer for jasmine
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive studio.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod studio;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, StudioConfig};
pub use output::console::ConsoleFormatter;
pub use output::export::{SaveError, save_all, save_slot};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use studio::StudioRepl;
