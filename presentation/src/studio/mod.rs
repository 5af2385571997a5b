//! Interactive studio
//!
//! A readline prompt that submits prompts, shows the grid and walks the
//! filled slots with a viewer.

mod repl;

pub use repl::{StudioCommand, StudioRepl};
