//! Generation sessions

use crate::core::prompt::Prompt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monotonic identifier of a session; the highest tag issued is the live one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionTag(u64);

impl SessionTag {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SessionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One submit-to-completion cycle (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSession {
    tag: SessionTag,
    prompt: Prompt,
    carried_over: bool,
    started_at: DateTime<Utc>,
}

impl GenerationSession {
    pub fn new(tag: SessionTag, prompt: Prompt, carried_over: bool) -> Self {
        Self {
            tag,
            prompt,
            carried_over,
            started_at: Utc::now(),
        }
    }

    pub fn tag(&self) -> SessionTag {
        self.tag
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Whether the seen-hash set from the previous submission was kept
    pub fn carried_over(&self) -> bool {
        self.carried_over
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_increase() {
        let first = SessionTag::default().next();
        let second = first.next();
        assert_eq!(first.value(), 1);
        assert!(second > first);
        assert_eq!(second.to_string(), "#2");
    }
}
