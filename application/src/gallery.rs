//! Shared gallery handle
//!
//! The orchestrator writes to the gallery from concurrently running slot
//! tasks while the display layer reads snapshots. Each operation takes the
//! lock once and never across an await. The current session tag is also
//! published on a watch channel so a waiting session can see it was
//! superseded without polling.

use jasmine_domain::{
    AcceptOutcome, DomainError, Gallery, GallerySnapshot, GenerationSession, GridLayout,
    ImagePayload, Prompt, SessionTag,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct SharedGallery {
    inner: Arc<Mutex<Gallery>>,
    current: Arc<watch::Sender<SessionTag>>,
}

impl SharedGallery {
    pub fn new(layout: &GridLayout) -> Self {
        Self::from_gallery(Gallery::new(layout))
    }

    pub fn from_gallery(gallery: Gallery) -> Self {
        let (current, _) = watch::channel(gallery.current_session());
        Self {
            inner: Arc::new(Mutex::new(gallery)),
            current: Arc::new(current),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Gallery> {
        // Gallery writes are single-step; a poisoned lock still guards consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin_session(&self, prompt: &Prompt) -> GenerationSession {
        let mut gallery = self.lock();
        let session = gallery.begin_session(prompt);
        // Published under the lock so tags are observed in order
        self.current.send_replace(session.tag());
        session
    }

    pub fn accept(
        &self,
        session: SessionTag,
        index: usize,
        image: ImagePayload,
    ) -> Result<AcceptOutcome, DomainError> {
        self.lock().accept(session, index, image)
    }

    pub fn finish_session(&self, session: SessionTag) -> bool {
        self.lock().finish_session(session)
    }

    pub fn is_current(&self, session: SessionTag) -> bool {
        self.lock().is_current(session)
    }

    /// Resolves once a newer session has started
    pub async fn superseded(&self, session: SessionTag) {
        let mut rx = self.current.subscribe();
        // The sender lives as long as `self`, so this only returns on a new tag
        let _ = rx.wait_for(|current| *current != session).await;
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn slot_count(&self) -> usize {
        self.lock().slot_count()
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        self.lock().snapshot()
    }

    /// Run a read-only closure against the gallery
    pub fn with<R>(&self, f: impl FnOnce(&Gallery) -> R) -> R {
        f(&self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let gallery = SharedGallery::new(&GridLayout::with_slot_count(2));
        let other = gallery.clone();

        let session = gallery.begin_session(&Prompt::new("a cat"));
        let image = ImagePayload::from_bytes("image/png", b"cat");
        other.accept(session.tag(), 0, image).unwrap();

        assert!(gallery.is_loading());
        assert_eq!(gallery.snapshot().filled_count(), 1);
        assert_eq!(gallery.with(|g| g.seen().len()), 1);

        assert!(other.finish_session(session.tag()));
        assert!(!gallery.is_loading());
    }

    #[tokio::test]
    async fn test_superseded_resolves_on_newer_session() {
        let gallery = SharedGallery::new(&GridLayout::with_slot_count(1));
        let first = gallery.begin_session(&Prompt::new("a cat"));

        let waiter = {
            let gallery = gallery.clone();
            tokio::spawn(async move { gallery.superseded(first.tag()).await })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        gallery.begin_session(&Prompt::new("a dog"));
        waiter.await.unwrap();
    }
}
