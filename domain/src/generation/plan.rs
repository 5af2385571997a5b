//! Batch planning and the per-batch retry state machine
//!
//! A session walks its slots in consecutive batches. Each batch is driven by
//! a [`BatchRun`]:
//!
//! ```text
//! Pending ──begin()──▶ InProgress ──settle()──▶ Completed   (nothing failed)
//!    ▲                                     ├──▶ Pending     (failed slots, budget left)
//!    └─────────────────────────────────────┘──▶ Exhausted   (failed slots, no budget)
//! ```
//!
//! A retried batch only re-issues the slot indices that failed.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous group of slots processed together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    index: usize,
    slots: Range<usize>,
}

impl Batch {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slots(&self) -> Range<usize> {
        self.slots.clone()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Partition of `0..slot_count` into batches of `batch_size`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    batches: Vec<Batch>,
}

impl BatchPlan {
    /// The last batch may be smaller than `batch_size`
    pub fn partition(slot_count: usize, batch_size: usize) -> Result<Self, DomainError> {
        if batch_size == 0 {
            return Err(DomainError::InvalidPlan(
                "batch size must be at least 1".to_string(),
            ));
        }

        let batches = (0..slot_count)
            .step_by(batch_size)
            .enumerate()
            .map(|(index, start)| Batch {
                index,
                slots: start..(start + batch_size).min(slot_count),
            })
            .collect();

        Ok(Self { batches })
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Lifecycle state of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Pending,
    InProgress,
    Completed,
    Exhausted,
}

impl BatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Exhausted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Exhausted => "exhausted",
        }
    }
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of batch-level retries left in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    remaining: usize,
}

impl RetryBudget {
    pub fn new(retries: usize) -> Self {
        Self { remaining: retries }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Take one retry; false when none are left
    pub fn try_consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Drives one batch through its rounds
#[derive(Debug, Clone)]
pub struct BatchRun {
    batch: Batch,
    state: BatchState,
    pending: Vec<usize>,
    rounds: usize,
}

impl BatchRun {
    pub fn new(batch: Batch) -> Self {
        let pending = batch.slots().collect();
        Self {
            batch,
            state: BatchState::Pending,
            pending,
            rounds: 0,
        }
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Rounds started so far (1 for the first run)
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Start a round, returning the slot indices to request.
    ///
    /// Returns an empty list unless the run is `Pending`.
    pub fn begin(&mut self) -> Vec<usize> {
        if self.state != BatchState::Pending {
            return Vec::new();
        }
        self.state = BatchState::InProgress;
        self.rounds += 1;
        self.pending.clone()
    }

    /// Finish a round with the indices that ended without an accepted image
    pub fn settle(&mut self, mut failed: Vec<usize>, budget: &mut RetryBudget) -> BatchState {
        if self.state != BatchState::InProgress {
            return self.state;
        }

        failed.retain(|i| self.batch.slots.contains(i));
        failed.sort_unstable();
        failed.dedup();

        self.state = if failed.is_empty() {
            BatchState::Completed
        } else if budget.try_consume() {
            BatchState::Pending
        } else {
            BatchState::Exhausted
        };
        self.pending = failed;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_even() {
        let plan = BatchPlan::partition(9, 3).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.batches()[0].slots(), 0..3);
        assert_eq!(plan.batches()[2].slots(), 6..9);
        assert_eq!(plan.batches()[2].index(), 2);
    }

    #[test]
    fn test_partition_last_batch_smaller() {
        let plan = BatchPlan::partition(7, 3).unwrap();
        let sizes: Vec<usize> = plan.batches().iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn test_partition_batch_larger_than_grid() {
        let plan = BatchPlan::partition(2, 5).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.batches()[0].slots(), 0..2);
    }

    #[test]
    fn test_partition_empty_grid() {
        assert!(BatchPlan::partition(0, 3).unwrap().is_empty());
    }

    #[test]
    fn test_partition_rejects_zero_batch_size() {
        assert!(matches!(
            BatchPlan::partition(9, 0),
            Err(DomainError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_budget() {
        let mut budget = RetryBudget::new(1);
        assert!(budget.try_consume());
        assert!(budget.is_exhausted());
        assert!(!budget.try_consume());
    }

    #[test]
    fn test_run_completes_when_nothing_fails() {
        let plan = BatchPlan::partition(3, 3).unwrap();
        let mut run = BatchRun::new(plan.batches()[0].clone());
        let mut budget = RetryBudget::new(3);

        assert_eq!(run.begin(), vec![0, 1, 2]);
        assert_eq!(run.state(), BatchState::InProgress);
        assert_eq!(run.settle(vec![], &mut budget), BatchState::Completed);
        assert_eq!(budget.remaining(), 3);
        assert!(run.begin().is_empty());
    }

    #[test]
    fn test_run_retries_only_failed_slots() {
        let plan = BatchPlan::partition(6, 3).unwrap();
        let mut run = BatchRun::new(plan.batches()[1].clone());
        let mut budget = RetryBudget::new(3);

        assert_eq!(run.begin(), vec![3, 4, 5]);
        assert_eq!(run.settle(vec![5, 3], &mut budget), BatchState::Pending);
        assert_eq!(budget.remaining(), 2);

        assert_eq!(run.begin(), vec![3, 5]);
        assert_eq!(run.rounds(), 2);
        assert_eq!(run.settle(vec![], &mut budget), BatchState::Completed);
    }

    #[test]
    fn test_run_exhausts_when_budget_is_gone() {
        let plan = BatchPlan::partition(3, 3).unwrap();
        let mut run = BatchRun::new(plan.batches()[0].clone());
        let mut budget = RetryBudget::new(1);

        run.begin();
        assert_eq!(run.settle(vec![2], &mut budget), BatchState::Pending);
        run.begin();
        assert_eq!(run.settle(vec![2], &mut budget), BatchState::Exhausted);
        assert!(run.state().is_terminal());
        assert_eq!(run.pending(), &[2]);
    }

    #[test]
    fn test_settle_ignores_foreign_indices() {
        let plan = BatchPlan::partition(6, 3).unwrap();
        let mut run = BatchRun::new(plan.batches()[0].clone());
        let mut budget = RetryBudget::new(3);

        run.begin();
        assert_eq!(run.settle(vec![4, 5], &mut budget), BatchState::Completed);
    }

    #[test]
    fn test_settle_without_begin_is_noop() {
        let plan = BatchPlan::partition(3, 3).unwrap();
        let mut run = BatchRun::new(plan.batches()[0].clone());
        let mut budget = RetryBudget::new(3);
        assert_eq!(run.settle(vec![0], &mut budget), BatchState::Pending);
        assert_eq!(budget.remaining(), 3);
    }
}
