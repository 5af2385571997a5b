//! Image payloads and deduplication hashes.

pub mod hash;
pub mod payload;
