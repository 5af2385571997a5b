//! Per-slot outcomes and the session report

use crate::core::prompt::Prompt;
use crate::generation::session::{GenerationSession, SessionTag};
use crate::image::hash::ContentHash;
use crate::image::payload::ImagePayload;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a single attempt at a slot did not produce an accepted image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AttemptFailure {
    /// Gateway returned an error or the request never completed
    Gateway(String),
    /// Response was not a well-formed embedded image
    Malformed(String),
    /// Image was already shown since the prompt last changed
    Duplicate(ContentHash),
    /// The slot could not take the image
    Rejected(String),
}

impl AttemptFailure {
    /// Retrying cannot help with these
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gateway(e) => write!(f, "gateway error: {e}"),
            Self::Malformed(e) => write!(f, "malformed payload: {e}"),
            Self::Duplicate(hash) => write!(f, "duplicate image {}", hash.short()),
            Self::Rejected(e) => write!(f, "rejected: {e}"),
        }
    }
}

/// Final state of one slot after a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Filled {
        image: ImagePayload,
        hash: ContentHash,
        attempts: usize,
    },
    Unfilled {
        attempts: usize,
        last_failure: Option<AttemptFailure>,
    },
    /// A newer session took over before this slot finished
    Stale,
}

impl SlotOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

/// Summary of one finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub tag: SessionTag,
    pub prompt: Prompt,
    /// Slots that accepted a new image in this session
    pub filled: Vec<usize>,
    /// Slots that did not; they keep whatever image they had before
    pub unfilled: Vec<usize>,
    /// Batch rounds started, retries included
    pub rounds: usize,
    /// A newer submission took over before this one finished
    pub superseded: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl GenerationReport {
    pub fn new(
        session: &GenerationSession,
        filled: Vec<usize>,
        unfilled: Vec<usize>,
        rounds: usize,
        superseded: bool,
    ) -> Self {
        Self {
            tag: session.tag(),
            prompt: session.prompt().clone(),
            filled,
            unfilled,
            rounds,
            superseded,
            started_at: session.started_at(),
            finished_at: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty() && !self.superseded
    }

    /// Message for the user when not every slot got a new image
    pub fn summary(&self) -> Option<String> {
        if self.superseded {
            Some("Generation was superseded by a newer prompt".to_string())
        } else if self.unfilled.is_empty() {
            None
        } else {
            Some(format!(
                "Some images could not be generated ({} of {} slots)",
                self.unfilled.len(),
                self.filled.len() + self.unfilled.len()
            ))
        }
    }
}
