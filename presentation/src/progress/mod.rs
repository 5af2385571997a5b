//! Progress display while a session runs

pub mod reporter;
