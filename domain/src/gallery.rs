//! Gallery: slot grid plus deduplication history (Aggregate)
//!
//! The gallery is the only state a generation session mutates. Every write
//! goes through [`Gallery::accept`], which checks the session tag and the
//! seen-hash set and stores the image in one step.

use crate::core::error::DomainError;
use crate::core::prompt::Prompt;
use crate::generation::session::{GenerationSession, SessionTag};
use crate::grid::layout::GridLayout;
use crate::grid::slot::{Slot, SlotGrid};
use crate::image::hash::{ContentHash, SeenHashes};
use crate::image::payload::ImagePayload;
use serde::Serialize;

/// Result of offering an image to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// Stored; the hash is now part of the seen set
    Accepted(ContentHash),
    /// Already shown since the prompt last changed
    Duplicate(ContentHash),
    /// The offering session is no longer the live one
    Stale,
}

#[derive(Debug, Clone)]
pub struct Gallery {
    grid: SlotGrid,
    seen: SeenHashes,
    last_prompt: Option<String>,
    current: SessionTag,
    loading: bool,
}

impl Gallery {
    pub fn new(layout: &GridLayout) -> Self {
        Self {
            grid: SlotGrid::new(layout),
            seen: SeenHashes::new(),
            last_prompt: None,
            current: SessionTag::default(),
            loading: false,
        }
    }

    /// Start a session for `prompt`, superseding any session in flight.
    ///
    /// The seen set survives only when the prompt is identical to the
    /// previous submission's.
    pub fn begin_session(&mut self, prompt: &Prompt) -> GenerationSession {
        let carried_over = self.last_prompt.as_deref() == Some(prompt.content());
        if !carried_over {
            self.seen.clear();
        }
        self.last_prompt = Some(prompt.content().to_string());
        self.current = self.current.next();
        self.loading = true;
        GenerationSession::new(self.current, prompt.clone(), carried_over)
    }

    pub fn accept(
        &mut self,
        session: SessionTag,
        index: usize,
        image: ImagePayload,
    ) -> Result<AcceptOutcome, DomainError> {
        if session != self.current {
            return Ok(AcceptOutcome::Stale);
        }

        let hash = image.content_hash();
        if self.seen.contains(&hash) {
            return Ok(AcceptOutcome::Duplicate(hash));
        }

        self.grid.fill(index, image, hash, session)?;
        self.seen.insert(hash);
        Ok(AcceptOutcome::Accepted(hash))
    }

    /// End a session. Only the live session clears the loading flag.
    pub fn finish_session(&mut self, session: SessionTag) -> bool {
        if session != self.current {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn is_current(&self, session: SessionTag) -> bool {
        self.current == session
    }

    pub fn current_session(&self) -> SessionTag {
        self.current
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn seen(&self) -> &SeenHashes {
        &self.seen
    }

    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    pub fn slot_count(&self) -> usize {
        self.grid.len()
    }

    /// Read-only copy for the display layer
    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            slots: self.grid.iter().cloned().collect(),
            loading: self.loading,
            prompt: self.last_prompt.clone(),
            session: self.current,
        }
    }
}

/// What the display layer reads: slot index to image, and the loading flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GallerySnapshot {
    pub slots: Vec<Slot>,
    pub loading: bool,
    pub prompt: Option<String>,
    pub session: SessionTag,
}

impl GallerySnapshot {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn image(&self, index: usize) -> Option<&ImagePayload> {
        self.slots.get(index).and_then(Slot::image)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_filled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> ImagePayload {
        ImagePayload::from_bytes("image/png", bytes)
    }

    fn gallery(slots: usize) -> Gallery {
        Gallery::new(&GridLayout::with_slot_count(slots))
    }

    #[test]
    fn test_begin_session_sets_loading_and_tag() {
        let mut g = gallery(3);
        assert!(!g.is_loading());

        let session = g.begin_session(&Prompt::new("a cat"));
        assert!(g.is_loading());
        assert_eq!(session.tag(), SessionTag::new(1));
        assert!(!session.carried_over());
        assert!(g.is_current(session.tag()));
    }

    #[test]
    fn test_accept_then_duplicate() {
        let mut g = gallery(3);
        let session = g.begin_session(&Prompt::new("a cat"));
        let image = png(b"cat");

        let first = g.accept(session.tag(), 0, image.clone()).unwrap();
        assert_eq!(first, AcceptOutcome::Accepted(image.content_hash()));

        let second = g.accept(session.tag(), 1, image.clone()).unwrap();
        assert_eq!(second, AcceptOutcome::Duplicate(image.content_hash()));
        assert!(!g.grid().get(1).unwrap().is_filled());
        assert_eq!(g.seen().len(), 1);
    }

    #[test]
    fn test_same_prompt_carries_seen_hashes() {
        let mut g = gallery(2);
        let first = g.begin_session(&Prompt::new("a cat"));
        g.accept(first.tag(), 0, png(b"cat")).unwrap();
        let before = g.seen().clone();
        g.finish_session(first.tag());

        let second = g.begin_session(&Prompt::new("a cat"));
        assert!(second.carried_over());
        assert!(g.seen().is_superset(&before));

        let outcome = g.accept(second.tag(), 1, png(b"cat")).unwrap();
        assert!(matches!(outcome, AcceptOutcome::Duplicate(_)));
    }

    #[test]
    fn test_different_prompt_clears_seen_hashes() {
        let mut g = gallery(2);
        let first = g.begin_session(&Prompt::new("a cat"));
        g.accept(first.tag(), 0, png(b"cat")).unwrap();

        let second = g.begin_session(&Prompt::new("a dog"));
        assert!(!second.carried_over());
        assert!(g.seen().is_empty());
        // The old image stays on screen
        assert!(g.grid().get(0).unwrap().is_filled());

        let outcome = g.accept(second.tag(), 1, png(b"cat")).unwrap();
        assert!(matches!(outcome, AcceptOutcome::Accepted(_)));
    }

    #[test]
    fn test_stale_session_cannot_write() {
        let mut g = gallery(2);
        let old = g.begin_session(&Prompt::new("a cat"));
        let new = g.begin_session(&Prompt::new("a dog"));

        assert_eq!(
            g.accept(old.tag(), 0, png(b"late")).unwrap(),
            AcceptOutcome::Stale
        );
        assert!(!g.grid().get(0).unwrap().is_filled());
        assert!(g.seen().is_empty());

        assert!(!g.finish_session(old.tag()));
        assert!(g.is_loading());
        assert!(g.finish_session(new.tag()));
        assert!(!g.is_loading());
    }

    #[test]
    fn test_out_of_range_does_not_record_hash() {
        let mut g = gallery(1);
        let session = g.begin_session(&Prompt::new("a cat"));
        let err = g.accept(session.tag(), 5, png(b"x")).unwrap_err();
        assert!(matches!(err, DomainError::SlotOutOfRange { index: 5, len: 1 }));
        assert!(g.seen().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut g = gallery(3);
        let session = g.begin_session(&Prompt::new("a cat"));
        g.accept(session.tag(), 2, png(b"cat")).unwrap();

        let snapshot = g.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.slot_count(), 3);
        assert_eq!(snapshot.filled_count(), 1);
        assert_eq!(snapshot.image(2), Some(&png(b"cat")));
        assert_eq!(snapshot.prompt.as_deref(), Some("a cat"));
    }
}
