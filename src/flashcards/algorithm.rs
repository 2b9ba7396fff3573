//! SM-2 Spaced Repetition Algorithm
//!
//! Computes the next review state of a word from its current state and a
//! recall quality rating (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! The easiness factor is updated before the interval, and the third and
//! later intervals multiply the previous interval by the *updated* factor.

use chrono::{DateTime, Duration, Utc};

use super::models::{Quality, ReviewState, MIN_EASINESS};

/// Calculate the next review state using the SM-2 algorithm, reviewed now
pub fn next_state(current: &ReviewState, quality: Quality) -> ReviewState {
    next_state_at(current, quality, Utc::now())
}

/// Calculate the next review state as if the review happened at `now`
pub fn next_state_at(current: &ReviewState, quality: Quality, now: DateTime<Utc>) -> ReviewState {
    let q = quality.value() as f64;

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
    let easiness = current.easiness_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
    let easiness = easiness.max(MIN_EASINESS);

    let (interval, repetitions) = if quality.is_pass() {
        let repetitions = current.repetitions + 1;
        let interval = match repetitions {
            1 => 1,
            2 => 6,
            _ => ((current.interval as f64 * easiness).round() as u32).max(1),
        };
        (interval, repetitions)
    } else {
        // Failed recall: back to tomorrow regardless of history
        (1, 0)
    };

    ReviewState {
        item_id: current.item_id,
        easiness_factor: round_easiness(easiness),
        interval,
        repetitions,
        next_review_at: now + Duration::days(interval as i64),
        last_reviewed_at: Some(now),
    }
}

/// Storage precision of the easiness factor
fn round_easiness(easiness: f64) -> f64 {
    (easiness * 100.0).round() / 100.0
}

/// Interval each quality rating would produce, indexed by quality value
pub fn preview_intervals(state: &ReviewState) -> [u32; 6] {
    let now = Utc::now();
    Quality::ALL.map(|quality| next_state_at(state, quality, now).interval)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    fn plural(count: u32, unit: &str) -> String {
        if count == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", count, unit)
        }
    }

    let days_f = days as f64;
    match days {
        0 => "New".to_string(),
        1..=6 => plural(days, "day"),
        7..=29 => plural((days_f / 7.0).round() as u32, "week"),
        30..=364 => plural((days_f / 30.0).round() as u32, "month"),
        _ => plural((days_f / 365.0).round() as u32, "year"),
    }
}

/// Describe how long until a word comes due
pub fn time_until_review(state: &ReviewState, now: DateTime<Utc>) -> String {
    if state.is_due(now) {
        return "Due now".to_string();
    }

    let remaining = state.next_review_at - now;
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;

    if days > 0 {
        format!("In {} day{}", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("In {} hour{}", hours, if hours > 1 { "s" } else { "" })
    } else {
        "In less than an hour".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn new_state() -> ReviewState {
        ReviewState::new(Uuid::new_v4())
    }

    fn state_with(interval: u32, repetitions: u32, easiness_factor: f64) -> ReviewState {
        ReviewState {
            interval,
            repetitions,
            easiness_factor,
            ..new_state()
        }
    }

    #[test]
    fn test_three_perfect_reviews() {
        let now = Utc::now();

        let first = next_state_at(&new_state(), Quality::PERFECT, now);
        assert_eq!(first.interval, 1);
        assert_eq!(first.repetitions, 1);
        assert_eq!(first.easiness_factor, 2.6);

        let second = next_state_at(&first, Quality::PERFECT, now);
        assert_eq!(second.interval, 6);
        assert_eq!(second.repetitions, 2);
        assert_eq!(second.easiness_factor, 2.7);

        let third = next_state_at(&second, Quality::PERFECT, now);
        assert_eq!(third.repetitions, 3);
        assert_eq!(third.easiness_factor, 2.8);
        // Old interval times the new easiness: round(6 * 2.8)
        assert_eq!(third.interval, 17);
    }

    #[test]
    fn test_failure_resets_to_tomorrow() {
        let now = Utc::now();
        let state = state_with(30, 5, 2.6);

        let result = next_state_at(&state, Quality::WRONG, now);

        assert_eq!(result.interval, 1);
        assert_eq!(result.repetitions, 0);
        assert_eq!(result.easiness_factor, 2.06);
        assert_eq!(result.next_review_at, now + Duration::days(1));
        assert_eq!(result.last_reviewed_at, Some(now));
    }

    #[test]
    fn test_every_failing_quality_resets() {
        for quality in [Quality::BLACKOUT, Quality::WRONG, Quality::HARD] {
            for (interval, repetitions) in [(0, 0), (1, 1), (6, 2), (120, 9)] {
                let result = next_state(&state_with(interval, repetitions, 2.5), quality);
                assert_eq!(result.repetitions, 0);
                assert_eq!(result.interval, 1);
            }
        }
    }

    #[test]
    fn test_passing_quality_increments_repetitions() {
        for quality in [Quality::DIFFICULT, Quality::GOOD, Quality::PERFECT] {
            for repetitions in [0, 1, 2, 7] {
                let state = state_with(10, repetitions, 2.5);
                let result = next_state(&state, quality);
                assert_eq!(result.repetitions, repetitions + 1);
                assert!(result.interval >= 1);
            }
        }
    }

    #[test]
    fn test_easiness_monotonic_in_quality() {
        let state = state_with(10, 4, 2.2);
        let factors: Vec<f64> = Quality::ALL
            .iter()
            .map(|q| next_state(&state, *q).easiness_factor)
            .collect();

        for pair in factors.windows(2) {
            assert!(pair[0] <= pair[1], "{:?}", factors);
        }
    }

    #[test]
    fn test_easiness_never_below_minimum() {
        let mut state = new_state();
        for _ in 0..20 {
            state = next_state(&state, Quality::BLACKOUT);
            assert!(state.easiness_factor >= MIN_EASINESS);
        }
        assert_eq!(state.easiness_factor, MIN_EASINESS);

        // Alternate hard passes and failures near the floor
        for i in 0..20 {
            let quality = if i % 2 == 0 { Quality::DIFFICULT } else { Quality::HARD };
            state = next_state(&state, quality);
            assert!(state.easiness_factor >= MIN_EASINESS);
        }
    }

    #[test]
    fn test_good_rating_keeps_easiness() {
        let result = next_state(&state_with(10, 5, 2.5), Quality::GOOD);
        assert_eq!(result.easiness_factor, 2.5);
        assert_eq!(result.interval, 25);
    }

    #[test]
    fn test_preview_intervals() {
        let preview = preview_intervals(&state_with(6, 2, 2.5));
        assert_eq!(preview[0], 1);
        assert_eq!(preview[2], 1);
        // round(6 * 2.36), round(6 * 2.5), round(6 * 2.6)
        assert_eq!(preview[3], 14);
        assert_eq!(preview[4], 15);
        assert_eq!(preview[5], 16);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "New");
        assert_eq!(format_interval(1), "1 day");
        assert_eq!(format_interval(5), "5 days");
        assert_eq!(format_interval(7), "1 week");
        assert_eq!(format_interval(17), "2 weeks");
        assert_eq!(format_interval(30), "1 month");
        assert_eq!(format_interval(90), "3 months");
        assert_eq!(format_interval(365), "1 year");
        assert_eq!(format_interval(730), "2 years");
    }

    #[test]
    fn test_time_until_review() {
        let now = Utc::now();
        let mut state = new_state();

        state.next_review_at = now;
        assert_eq!(time_until_review(&state, now), "Due now");

        state.next_review_at = now + Duration::days(3) + Duration::hours(2);
        assert_eq!(time_until_review(&state, now), "In 3 days");

        state.next_review_at = now + Duration::hours(5);
        assert_eq!(time_until_review(&state, now), "In 5 hours");

        state.next_review_at = now + Duration::minutes(20);
        assert_eq!(time_until_review(&state, now), "In less than an hour");
    }
}
