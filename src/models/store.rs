//! Contract the review session needs from the word store.
use super::{Category, Word, WordReviewState};
use crate::error::StoreError;
use chrono::{DateTime, Utc};

/// Fields written back after one review, as a single atomic update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReviewUpdate {
    pub state: WordReviewState,
    pub category: Category,
}

pub trait WordStore {
    /// Words with `next_review_at <= now`, most overdue first.
    fn due_words(&self, now: DateTime<Utc>) -> Result<Vec<Word>, StoreError>;

    /// Fails with `NotFound` / `NotOwned` when the word is gone or foreign.
    fn apply_review(&self, id: i64, update: &ReviewUpdate) -> Result<(), StoreError>;
}

impl<S: WordStore + ?Sized> WordStore for &S {
    fn due_words(&self, now: DateTime<Utc>) -> Result<Vec<Word>, StoreError> {
        (**self).due_words(now)
    }

    fn apply_review(&self, id: i64, update: &ReviewUpdate) -> Result<(), StoreError> {
        (**self).apply_review(id, update)
    }
}
