//! Prompt value object

use serde::{Deserialize, Serialize};

/// A text prompt submitted for image generation (Value Object)
///
/// The content is kept exactly as typed. Two submissions share a
/// deduplication history only when their prompts compare equal byte for byte,
/// so no trimming or case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Create a new prompt
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Prompt cannot be empty");
        Self { content }
    }

    /// Try to create a new prompt, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the prompt text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner text
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Prompt {
    fn from(s: &str) -> Self {
        Prompt::new(s)
    }
}

impl From<String> for Prompt {
    fn from(s: String) -> Self {
        Prompt::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = Prompt::new("a cat in a spacesuit");
        assert_eq!(p.content(), "a cat in a spacesuit");
    }

    #[test]
    fn test_prompt_keeps_surrounding_whitespace() {
        let p = Prompt::new(" a cat ");
        assert_eq!(p.content(), " a cat ");
        assert_ne!(p, Prompt::new("a cat"));
    }

    #[test]
    #[should_panic]
    fn test_empty_prompt_panics() {
        Prompt::new("");
    }

    #[test]
    fn test_try_new_blank() {
        assert!(Prompt::try_new("").is_none());
        assert!(Prompt::try_new("  \t\n").is_none());
    }

    #[test]
    fn test_try_new_valid() {
        assert!(Prompt::try_new("a cat").is_some());
    }
}
