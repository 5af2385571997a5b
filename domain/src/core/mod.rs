//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::Prompt`]: a validated, non-blank generation prompt
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod prompt;
