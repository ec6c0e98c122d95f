//! crates/recall_core/src/srs.rs
//!
//! The SM-2 spaced-repetition transition. A pure function: given a card's
//! scheduling state and a review quality score it computes the next state,
//! and never touches a clock or storage. Persisting the result is the
//! caller's job.

use chrono::{DateTime, Duration, Utc};

/// Minimum value the ease factor may take; repeated failures clamp here.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Starting ease factor for a freshly created card.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Highest allowed review quality score. Scores are self-assessments of
/// recall difficulty on a 0..=5 scale.
pub const MAX_QUALITY: u8 = 5;

/// The scheduling fields of a card, separated from its content so the
/// transition can be computed and tested without a full card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewState {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetitions: i64,
    pub next_review_at: DateTime<Utc>,
}

/// Applies one SM-2 review to `state` and returns the next state.
///
/// `reviewed_at` is only consulted on a failed recall (quality < 3), which
/// schedules the card for the next day. Successful recalls advance from the
/// card's previous scheduled date, so a card reviewed late keeps its drift
/// instead of resetting against real time.
///
/// Callers must validate `quality <= MAX_QUALITY` before invoking; the
/// function is total, but scores above 5 are outside the contract.
pub fn apply_review(state: &ReviewState, quality: u8, reviewed_at: DateTime<Utc>) -> ReviewState {
    let (repetitions, interval_days, next_review_at) = if quality < 3 {
        // Failed recall: reset progress and retry tomorrow.
        (0, 1, reviewed_at + Duration::days(1))
    } else {
        // Successful recall: fixed 1 and 6 day intervals for the first two
        // passes, then grow by the ease factor the current interval was
        // earned under.
        let (repetitions, interval_days) = match state.repetitions {
            0 => (1, 1),
            1 => (2, 6),
            reps => (
                reps + 1,
                (state.interval_days as f64 * state.ease_factor).ceil() as i64,
            ),
        };
        (
            repetitions,
            interval_days,
            state.next_review_at + Duration::days(interval_days),
        )
    };

    // Ease factor update from the SM-2 description:
    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let q = quality as f64;
    let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    let ease_factor = (state.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

    ReviewState {
        ease_factor,
        interval_days,
        repetitions,
        next_review_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state(
        ease_factor: f64,
        interval_days: i64,
        repetitions: i64,
    ) -> ReviewState {
        ReviewState {
            ease_factor,
            interval_days,
            repetitions,
            next_review_at: scheduled(),
        }
    }

    fn scheduled() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn reviewed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 4, 9, 30, 0).unwrap()
    }

    #[test]
    fn failed_review_resets_regardless_of_prior_state() {
        for quality in 0..3 {
            let result = apply_review(&state(2.5, 15, 5), quality, reviewed());
            assert_eq!(result.repetitions, 0);
            assert_eq!(result.interval_days, 1);
            assert_eq!(result.next_review_at, reviewed() + Duration::days(1));
        }
    }

    #[test]
    fn first_successful_review() {
        let result = apply_review(&state(2.5, 0, 0), 4, reviewed());
        assert_eq!(result.repetitions, 1);
        assert_eq!(result.interval_days, 1);
        assert_eq!(result.next_review_at, scheduled() + Duration::days(1));
    }

    #[test]
    fn second_successful_review() {
        let result = apply_review(&state(2.5, 1, 1), 4, reviewed());
        assert_eq!(result.repetitions, 2);
        assert_eq!(result.interval_days, 6);
        assert_eq!(result.next_review_at, scheduled() + Duration::days(6));
    }

    #[test]
    fn third_successful_review_multiplies_interval() {
        let result = apply_review(&state(2.5, 6, 2), 4, reviewed());
        assert_eq!(result.repetitions, 3);
        // 6 * 2.5 = 15
        assert_eq!(result.interval_days, 15);
    }

    #[test]
    fn interval_growth_rounds_up() {
        // 4 * 2.1 = 8.4, which must become 9, not 8.
        let result = apply_review(&state(2.1, 4, 3), 4, reviewed());
        assert_eq!(result.interval_days, 9);
    }

    #[test]
    fn interval_uses_previous_ease_factor() {
        // Quality 3 lowers the ease to 2.36, but the new interval is still
        // earned under the old 2.5: ceil(10 * 2.5) = 25.
        let result = apply_review(&state(2.5, 10, 4), 3, reviewed());
        assert_eq!(result.interval_days, 25);
        assert!((result.ease_factor - 2.36).abs() < 1e-9);
    }

    #[test]
    fn successful_review_advances_from_scheduled_date_not_review_instant() {
        // The review happens three days late; the next date still counts
        // from the old scheduled date.
        let result = apply_review(&state(2.5, 1, 1), 5, reviewed());
        assert_eq!(result.next_review_at, scheduled() + Duration::days(6));
    }

    #[test]
    fn ease_factor_is_monotonic_in_quality() {
        let prior = state(2.5, 6, 2);
        let mut last = f64::NEG_INFINITY;
        for quality in 0..=MAX_QUALITY {
            let ef = apply_review(&prior, quality, reviewed()).ease_factor;
            assert!(ef >= last, "quality {} lowered the ease factor", quality);
            last = ef;
        }
    }

    #[test]
    fn ease_factor_never_falls_below_floor() {
        let mut current = state(2.5, 10, 5);
        for _ in 0..10 {
            current = apply_review(&current, 0, reviewed());
        }
        assert!(current.ease_factor >= MIN_EASE_FACTOR);
        assert!((current.ease_factor - MIN_EASE_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn transition_is_idempotent_for_identical_input() {
        let prior = state(2.37, 12, 3);
        let first = apply_review(&prior, 4, reviewed());
        let second = apply_review(&prior, 4, reviewed());
        assert_eq!(first, second);
    }

    #[test]
    fn failed_review_of_mature_card_matches_formula_exactly() {
        // quality = 2 against {2.5, 6, 2}:
        // EF' = 2.5 + 0.1 - 3 * 0.08 - 3 * 3 * 0.02 = 2.18
        let result = apply_review(&state(2.5, 6, 2), 2, reviewed());
        assert_eq!(result.repetitions, 0);
        assert_eq!(result.interval_days, 1);
        assert_eq!(result.next_review_at, reviewed() + Duration::days(1));
        let expected = (2.5f64 + 0.1 - 3.0 * 0.08 - 3.0 * 3.0 * 0.02).max(MIN_EASE_FACTOR);
        assert!((result.ease_factor - expected).abs() < 1e-9);
        assert!((result.ease_factor - 2.18).abs() < 1e-9);
    }

    #[test]
    fn intervals_grow_across_a_run_of_good_reviews() {
        let mut current = state(2.5, 0, 0);
        for pass in 0..5 {
            current = apply_review(&current, 4, reviewed());
            match pass {
                0 => assert_eq!(current.interval_days, 1),
                1 => assert_eq!(current.interval_days, 6),
                _ => assert!(current.interval_days > 6),
            }
        }
        assert!(current.interval_days > 30);
    }
}
