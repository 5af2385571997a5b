//! Generate Images use case
//!
//! Orchestrates one submission: batches of concurrent slot requests,
//! content-hash deduplication, per-slot attempts and batch-level retries.

use crate::config::GenerationParams;
use crate::gallery::SharedGallery;
use crate::ports::image_gateway::{GenerationRequest, ImageGateway};
use crate::ports::progress::{GenerationProgress, NoProgress};
use jasmine_domain::{
    AcceptOutcome, AttemptFailure, BatchPlan, BatchRun, BatchState, DomainError,
    GenerationReport, GenerationSession, ImagePayload, Prompt, RetryBudget, SessionTag,
    SlotOutcome,
};
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Seeds are drawn from `0..SEED_RANGE`
pub const SEED_RANGE: u64 = 1_000_000;

/// Errors that reject a submission before any request is made
#[derive(Error, Debug)]
pub enum GenerateImagesError {
    #[error("Prompt cannot be blank")]
    BlankPrompt,

    #[error("Invalid generation parameters: {0}")]
    InvalidParams(&'static str),

    #[error("Gallery has {actual} slots but {expected} were configured")]
    SlotCountMismatch { expected: usize, actual: usize },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Use case for filling the gallery from one prompt
pub struct GenerateImagesUseCase<G: ImageGateway + 'static> {
    gateway: Arc<G>,
    gallery: SharedGallery,
    params: GenerationParams,
}

impl<G: ImageGateway + 'static> GenerateImagesUseCase<G> {
    pub fn new(gateway: Arc<G>, gallery: SharedGallery) -> Self {
        Self {
            gateway,
            gallery,
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn gallery(&self) -> &SharedGallery {
        &self.gallery
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, prompt: &str) -> Result<GenerationReport, GenerateImagesError> {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Starting a session supersedes any session still running on the same
    /// gallery: the older one can no longer write and stops at its next
    /// batch boundary.
    pub async fn execute_with_progress(
        &self,
        prompt: &str,
        progress: &dyn GenerationProgress,
    ) -> Result<GenerationReport, GenerateImagesError> {
        let prompt = Prompt::try_new(prompt).ok_or(GenerateImagesError::BlankPrompt)?;
        self.params
            .validate()
            .map_err(GenerateImagesError::InvalidParams)?;

        let slot_count = self.gallery.slot_count();
        if slot_count != self.params.slot_count {
            return Err(GenerateImagesError::SlotCountMismatch {
                expected: self.params.slot_count,
                actual: slot_count,
            });
        }
        let plan = BatchPlan::partition(slot_count, self.params.batch_size)?;

        let session = self.gallery.begin_session(&prompt);
        info!(
            "Starting session {} for {:?}: {} slots in {} batches{}",
            session.tag(),
            prompt.content(),
            slot_count,
            plan.len(),
            if session.carried_over() {
                " (same prompt, keeping seen images)"
            } else {
                ""
            }
        );
        progress.on_session_start(&session, slot_count);

        let mut budget = RetryBudget::new(self.params.max_batch_retries);
        let mut filled = BTreeSet::new();
        let mut rounds = 0;
        let mut superseded = false;

        'batches: for batch in plan.batches() {
            let mut run = BatchRun::new(batch.clone());

            while run.state() == BatchState::Pending {
                if rounds > 0 && self.gallery.is_current(session.tag()) {
                    debug!("Cooling down for {:?}", self.params.cooldown);
                    progress.on_cooldown(self.params.cooldown);
                    tokio::select! {
                        _ = tokio::time::sleep(self.params.cooldown) => {}
                        _ = self.gallery.superseded(session.tag()) => {
                            debug!("Session {} superseded during cooldown", session.tag());
                        }
                    }
                }

                if !self.gallery.is_current(session.tag()) {
                    info!(
                        "Session {} superseded, stopping before batch {}",
                        session.tag(),
                        batch.index()
                    );
                    superseded = true;
                    break 'batches;
                }

                let slots = run.begin();
                rounds += 1;
                debug!(
                    "Batch {} round {}: requesting slots {:?}",
                    batch.index(),
                    run.rounds(),
                    slots
                );
                progress.on_batch_start(batch, run.rounds(), &slots);

                let failed = self
                    .run_round(&session, &slots, progress, &mut filled)
                    .await;
                let state = run.settle(failed, &mut budget);

                match state {
                    BatchState::Pending => info!(
                        "Batch {} retrying slots {:?} ({} batch retries left)",
                        batch.index(),
                        run.pending(),
                        budget.remaining()
                    ),
                    BatchState::Exhausted => warn!(
                        "Batch {} gave up on slots {:?}: no batch retries left",
                        batch.index(),
                        run.pending()
                    ),
                    _ => debug!("Batch {} {}", batch.index(), state),
                }
                progress.on_batch_settled(batch, state);
            }
        }

        if !self.gallery.finish_session(session.tag()) {
            superseded = true;
        }

        let unfilled = (0..slot_count).filter(|i| !filled.contains(i)).collect();
        let report = GenerationReport::new(
            &session,
            filled.into_iter().collect(),
            unfilled,
            rounds,
            superseded,
        );

        match report.summary() {
            Some(summary) => warn!("Session {}: {}", session.tag(), summary),
            None => info!(
                "Session {} complete: {} slots filled in {} rounds",
                session.tag(),
                report.filled.len(),
                rounds
            ),
        }
        progress.on_session_complete(&report);

        Ok(report)
    }

    /// Request every slot of a round concurrently and wait for all of them.
    ///
    /// Returns the indices that ended without an accepted image.
    async fn run_round(
        &self,
        session: &GenerationSession,
        slots: &[usize],
        progress: &dyn GenerationProgress,
        filled: &mut BTreeSet<usize>,
    ) -> Vec<usize> {
        let mut join_set = JoinSet::new();

        for &index in slots {
            let gateway = Arc::clone(&self.gateway);
            let gallery = self.gallery.clone();
            let prompt = session.prompt().content().to_string();
            let tag = session.tag();
            let max_attempts = self.params.max_attempts;

            join_set.spawn(async move {
                let outcome =
                    Self::fill_slot(&gateway, &gallery, tag, &prompt, index, max_attempts).await;
                (index, outcome)
            });
        }

        let mut unsettled: BTreeSet<usize> = slots.iter().copied().collect();
        let mut failed = Vec::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, outcome)) => {
                    unsettled.remove(&index);
                    match &outcome {
                        SlotOutcome::Filled {
                            image,
                            hash,
                            attempts,
                        } => {
                            info!(
                                "Slot {} filled after {} attempt(s) ({})",
                                index,
                                attempts,
                                hash.short()
                            );
                            filled.insert(index);
                            progress.on_slot_filled(index, image, hash);
                        }
                        SlotOutcome::Unfilled {
                            attempts,
                            last_failure,
                        } => {
                            warn!(
                                "Slot {} unfilled after {} attempt(s): {}",
                                index,
                                attempts,
                                last_failure
                                    .as_ref()
                                    .map(ToString::to_string)
                                    .unwrap_or_default()
                            );
                            progress.on_slot_unfilled(index, &outcome);
                            failed.push(index);
                        }
                        SlotOutcome::Stale => {
                            debug!("Slot {} dropped: session superseded", index);
                            failed.push(index);
                        }
                    }
                }
                Err(e) => {
                    warn!("Slot task join error: {}", e);
                }
            }
        }

        failed.extend(unsettled);
        failed
    }

    /// Try one slot up to `max_attempts` times
    async fn fill_slot(
        gateway: &G,
        gallery: &SharedGallery,
        session: SessionTag,
        prompt: &str,
        index: usize,
        max_attempts: usize,
    ) -> SlotOutcome {
        let mut last_failure = None;

        for attempt in 1..=max_attempts {
            if !gallery.is_current(session) {
                return SlotOutcome::Stale;
            }

            let request = GenerationRequest::new(prompt, fresh_seed());
            let failure = match gateway.generate(&request).await {
                Err(e) => AttemptFailure::Gateway(e.to_string()),
                Ok(uri) => match ImagePayload::parse(&uri) {
                    Err(e) => AttemptFailure::Malformed(e.to_string()),
                    Ok(image) => match gallery.accept(session, index, image.clone()) {
                        Ok(AcceptOutcome::Accepted(hash)) => {
                            return SlotOutcome::Filled {
                                image,
                                hash,
                                attempts: attempt,
                            };
                        }
                        Ok(AcceptOutcome::Duplicate(hash)) => AttemptFailure::Duplicate(hash),
                        Ok(AcceptOutcome::Stale) => return SlotOutcome::Stale,
                        Err(e) => AttemptFailure::Rejected(e.to_string()),
                    },
                },
            };

            match &failure {
                AttemptFailure::Duplicate(_) => debug!(
                    "Slot {} attempt {}/{} (seed {}): {}",
                    index, attempt, max_attempts, request.seed, failure
                ),
                _ => warn!(
                    "Slot {} attempt {}/{} via {} (seed {}): {}",
                    index,
                    attempt,
                    max_attempts,
                    gateway.name(),
                    request.seed,
                    failure
                ),
            }

            let permanent = failure.is_permanent();
            last_failure = Some(failure);
            if permanent {
                return SlotOutcome::Unfilled {
                    attempts: attempt,
                    last_failure,
                };
            }
        }

        SlotOutcome::Unfilled {
            attempts: max_attempts,
            last_failure,
        }
    }
}

fn fresh_seed() -> u64 {
    rand::thread_rng().gen_range(0..SEED_RANGE)
}
