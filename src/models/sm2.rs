//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each word has an ease factor (EF) that adjusts based on performance
//! - Failed recall (quality < 3): repetitions reset, word comes back tomorrow
//! - Successful recall: interval grows 1 day → 6 days → previous interval × EF
//! - EF is adjusted after every review, clamped at 1.3 and rounded to 2 decimals
//!
//! The computation is pure: "now" is always passed in by the caller.

use super::{Quality, WordReviewState};
use chrono::{DateTime, Days, Utc};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Longest gap between reviews, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Calculates the complete review state that replaces `current` after a rating.
pub fn compute_next_state(
    quality: Quality,
    current: &WordReviewState,
    now: DateTime<Utc>,
) -> WordReviewState {
    let (interval_days, repetitions) = if quality.is_success() {
        (next_interval(current), current.repetitions.saturating_add(1))
    } else {
        // Failed recall starts over regardless of previous progress
        (1, 0)
    };

    let ease_factor = next_ease_factor(current.ease_factor, quality);

    // Calendar-day addition; saturate rather than fail on absurd intervals
    let next_review_at = now
        .checked_add_days(Days::new(u64::from(interval_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    log::debug!(
        "SM-2 {}: reps {} -> {}, interval {} -> {}, EF {:.2} -> {:.2}",
        quality,
        current.repetitions,
        repetitions,
        current.interval_days,
        interval_days,
        current.ease_factor,
        ease_factor
    );

    WordReviewState {
        repetitions,
        ease_factor,
        interval_days,
        next_review_at,
    }
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), clamped and rounded.
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let q = f64::from(quality.value());
    let new_ef = ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    round_to_hundredths(new_ef.max(MIN_EASE_FACTOR))
}

/// Interval after a successful recall, based on the state before the review.
pub fn next_interval(current: &WordReviewState) -> u32 {
    match current.repetitions {
        0 => 1,
        1 => 6,
        _ => {
            // EF carries two decimals, so multiplying in hundredths keeps ceil exact
            let ease_hundredths = (current.ease_factor * 100.0).round().max(0.0) as u64;
            let days = (u64::from(current.interval_days) * ease_hundredths).div_ceil(100);
            u32::try_from(days).map_or(MAX_INTERVAL_DAYS, |d| d.min(MAX_INTERVAL_DAYS))
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 28, 9, 30, 0).unwrap()
    }

    fn state(repetitions: u32, ease_factor: f64, interval_days: u32) -> WordReviewState {
        WordReviewState {
            repetitions,
            ease_factor,
            interval_days,
            next_review_at: now(),
        }
    }

    #[test]
    fn test_first_easy_review() {
        let next = compute_next_state(Quality::Easy, &state(0, 2.5, 0), now());
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.ease_factor, 2.6);
        assert_eq!(next.next_review_at, Utc.with_ymd_and_hms(2024, 1, 29, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_second_easy_review() {
        let next = compute_next_state(Quality::Easy, &state(1, 2.6, 1), now());
        assert_eq!(next.repetitions, 2);
        assert_eq!(next.interval_days, 6);
        assert_eq!(next.ease_factor, 2.7);
        // Rolls over into February
        assert_eq!(next.next_review_at, Utc.with_ymd_and_hms(2024, 2, 3, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_hard_review_resets() {
        let next = compute_next_state(Quality::Hard, &state(5, 2.0, 30), now());
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 1);
        // 2.0 + (0.1 - 4 * (0.08 + 4 * 0.02)) = 1.46
        assert_eq!(next.ease_factor, 1.46);
    }

    #[test]
    fn test_neutral_review_lowers_ease_but_succeeds() {
        let next = compute_next_state(Quality::Neutral, &state(2, 2.5, 6), now());
        assert_eq!(next.repetitions, 3);
        // Interval uses the ease factor from before the review
        assert_eq!(next.interval_days, 15);
        assert_eq!(next.ease_factor, 2.36);
    }

    #[test]
    fn test_interval_multiplication_has_no_float_drift() {
        // 10 * 1.3 is 13.000000000000002 in f64; the interval must still be 13
        let next = compute_next_state(Quality::Neutral, &state(3, 1.3, 10), now());
        assert_eq!(next.interval_days, 13);
        assert_eq!(next.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_ef_floor_holds_for_all_ratings() {
        let mut ease = MIN_EASE_FACTOR;
        while ease <= 3.5 {
            for quality in Quality::ALL {
                for repetitions in [0, 1, 2, 7] {
                    let next = compute_next_state(quality, &state(repetitions, ease, 12), now());
                    assert!(
                        next.ease_factor >= MIN_EASE_FACTOR,
                        "EF {} fell below floor for {:?} from {}",
                        next.ease_factor,
                        quality,
                        ease
                    );
                }
            }
            ease = round_to_hundredths(ease + 0.05);
        }
    }

    #[test]
    fn test_repeated_failure_always_resets() {
        for (repetitions, interval_days) in [(0, 0), (1, 1), (4, 40), (12, 365)] {
            let mut current = state(repetitions, 2.5, interval_days);
            for _ in 0..3 {
                current = compute_next_state(Quality::Hard, &current, now());
                assert_eq!(current.repetitions, 0);
                assert_eq!(current.interval_days, 1);
            }
            assert_eq!(current.ease_factor, MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn test_intervals_grow_with_fixed_ease() {
        let mut current = state(0, 2.5, 0);
        let mut intervals = Vec::new();
        for _ in 0..5 {
            current = compute_next_state(Quality::Easy, &current, now());
            intervals.push(current.interval_days);
            current.ease_factor = 2.5;
        }
        assert_eq!(intervals, vec![1, 6, 15, 38, 95]);
        assert!(intervals.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_same_inputs_same_output() {
        let current = state(3, 2.18, 17);
        let first = compute_next_state(Quality::Neutral, &current, now());
        let second = compute_next_state(Quality::Neutral, &current, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_interval_is_capped() {
        let next = compute_next_state(Quality::Easy, &state(5, 3.0, 1_200_000), now());
        assert_eq!(next.interval_days, MAX_INTERVAL_DAYS);
        assert_eq!(next.repetitions, 6);
        assert!(next.next_review_at < Utc.with_ymd_and_hms(2125, 1, 1, 0, 0, 0).unwrap());

        let next = compute_next_state(Quality::Easy, &state(9, 2.5, 30_000), now());
        assert_eq!(next.interval_days, MAX_INTERVAL_DAYS);
    }

    #[test]
    fn test_calendar_addition_crosses_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 23, 0, 0).unwrap();
        let next = compute_next_state(Quality::Easy, &WordReviewState::new(now), now);
        assert_eq!(next.next_review_at, Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap());
    }
}
