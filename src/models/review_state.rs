use super::sm2::DEFAULT_EASE_FACTOR;
use chrono::{DateTime, Utc};

/// SM-2 scheduling fields of a saved word.
///
/// Only `sm2::compute_next_state` produces new values; `next_review_at` is
/// always derived from the interval at the moment of the review.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordReviewState {
    pub repetitions: u32,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub next_review_at: DateTime<Utc>,
}

impl WordReviewState {
    /// State of a freshly saved word: due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            repetitions: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            next_review_at: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}
