//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt cannot be blank")]
    BlankPrompt,

    #[error("Malformed image payload: {0}")]
    MalformedPayload(String),

    #[error("Slot {index} is out of range (grid has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("Invalid batch plan: {0}")]
    InvalidPlan(String),
}

impl DomainError {
    /// Check if this error describes a bad image payload
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, DomainError::MalformedPayload(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_out_of_range_display() {
        let error = DomainError::SlotOutOfRange { index: 9, len: 9 };
        assert_eq!(error.to_string(), "Slot 9 is out of range (grid has 9 slots)");
    }

    #[test]
    fn test_is_malformed_payload_check() {
        assert!(DomainError::MalformedPayload("x".to_string()).is_malformed_payload());
        assert!(!DomainError::BlankPrompt.is_malformed_payload());
    }
}
