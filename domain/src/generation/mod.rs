//! Generation sessions, batch plans and outcomes.

pub mod plan;
pub mod report;
pub mod session;
