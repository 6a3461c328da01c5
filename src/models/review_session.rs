//! Review session management for spaced repetition practice.
//! Walks through the words due at session start and persists every rating
//! through the word store using the SM-2 scheduler.

use super::{Category, Clock, Quality, ReviewUpdate, Word, WordReviewState, WordStore, sm2};
use crate::error::{SessionError, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Nothing was due when the session started.
    EmptyComplete,
    Complete,
}

/// What was persisted for one rating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReviewOutcome {
    pub word_id: i64,
    pub state: WordReviewState,
    pub category: Category,
    pub session_complete: bool,
}

/// One sitting over a fixed queue of due words.
///
/// Rating takes `&mut self`, so only one review can be in flight per session.
/// A new session has to be started to pick up words that became due later.
pub struct ReviewSession<S, C> {
    store: S,
    clock: C,
    queue: Vec<Word>,
    current_index: usize,
    show_answer: bool,
    reviewed: usize,
    state: SessionState,
}

impl<S: WordStore, C: Clock> ReviewSession<S, C> {
    /// Loads the due queue, most overdue first.
    pub fn start(store: S, clock: C) -> Result<Self, StoreError> {
        let now = clock.now();
        let queue = store.due_words(now)?;

        let state = if queue.is_empty() {
            SessionState::EmptyComplete
        } else {
            SessionState::Active
        };
        log::info!("Review session started with {} due words", queue.len());

        Ok(Self {
            store,
            clock,
            queue,
            current_index: 0,
            show_answer: false,
            reviewed: 0,
            state,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state != SessionState::Active
    }

    pub fn current_word(&self) -> Option<&Word> {
        match self.state {
            SessionState::Active => self.queue.get(self.current_index),
            _ => None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_revealed(&self) -> bool {
        self.show_answer
    }

    pub fn reveal(&mut self) {
        self.show_answer = true;
    }

    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed
    }

    pub fn total_count(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.current_index
    }

    /// Words of this session with their latest persisted state.
    pub fn words(&self) -> &[Word] {
        &self.queue
    }

    /// Parses a raw rating first; values other than 1, 3 and 5 change nothing.
    pub fn rate_value(&mut self, value: u8) -> Result<ReviewOutcome, SessionError> {
        let quality = Quality::try_from(value)?;
        self.rate(quality)
    }

    /// Schedules the current word, persists it and moves on.
    ///
    /// If the store rejects the update the session stays on the same word and
    /// the error is returned; retrying recomputes from the unchanged state.
    pub fn rate(&mut self, quality: Quality) -> Result<ReviewOutcome, SessionError> {
        let word = self.current_word().ok_or(SessionError::Finished)?;
        let (word_id, review) = (word.id, word.review);

        let update = ReviewUpdate {
            state: sm2::compute_next_state(quality, &review, self.clock.now()),
            category: Category::from_quality(quality),
        };

        if let Err(e) = self.store.apply_review(word_id, &update) {
            log::warn!("Failed to save review of word {}: {}", word_id, e);
            return Err(e.into());
        }

        // Only reflect the new state once the store has accepted it
        if let Some(word) = self.queue.get_mut(self.current_index) {
            word.review = update.state;
            word.category = update.category;
        }
        self.reviewed += 1;
        self.show_answer = false;
        self.current_index += 1;

        if self.current_index >= self.queue.len() {
            self.state = SessionState::Complete;
            log::info!("Review session complete: {} words reviewed", self.reviewed);
        }

        Ok(ReviewOutcome {
            word_id,
            state: update.state,
            category: update.category,
            session_complete: self.is_completed(),
        })
    }

    pub fn progress_message(&self) -> String {
        match self.state {
            SessionState::EmptyComplete => "No words are due for review".to_string(),
            SessionState::Complete => format!("Session complete: {} words reviewed", self.reviewed),
            SessionState::Active => format!(
                "Word {} of {} ({} reviewed)",
                self.current_index + 1,
                self.total_count(),
                self.reviewed
            ),
        }
    }
}
