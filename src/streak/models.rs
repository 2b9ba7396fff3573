//! Study streak data model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-day study record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    /// Consecutive days studied, ending today or yesterday
    #[serde(default)]
    pub current_streak: u32,
    /// Longest ever streak
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_study_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_days_studied: u32,
}

impl StreakData {
    /// Days between the last study date and `today`, if any study happened
    fn days_since_study(&self, today: NaiveDate) -> Option<i64> {
        self.last_study_date
            .map(|last| (today - last).num_days().abs())
    }

    /// The streak as seen on `today`: broken if a whole day was skipped
    pub fn refreshed(mut self, today: NaiveDate) -> Self {
        if matches!(self.days_since_study(today), Some(days) if days > 1) {
            self.current_streak = 0;
        }
        self
    }

    pub fn has_studied_today(&self, today: NaiveDate) -> bool {
        self.last_study_date == Some(today)
    }

    /// Count `today` as a study day; returns false if it already was
    pub fn record_study(&mut self, today: NaiveDate) -> bool {
        if self.has_studied_today(today) {
            return false;
        }

        self.current_streak = match self.days_since_study(today) {
            Some(1) => self.current_streak + 1,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.total_days_studied += 1;
        self.last_study_date = Some(today);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_first_study_day() {
        let mut streak = StreakData::default();
        assert!(streak.record_study(day(1)));

        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.total_days_studied, 1);
        assert!(streak.has_studied_today(day(1)));
    }

    #[test]
    fn test_same_day_counts_once() {
        let mut streak = StreakData::default();
        streak.record_study(day(1));
        assert!(!streak.record_study(day(1)));
        assert_eq!(streak.total_days_studied, 1);
    }

    #[test]
    fn test_consecutive_days_extend() {
        let mut streak = StreakData::default();
        for d in 1..=4 {
            streak.record_study(day(d));
        }
        assert_eq!(streak.current_streak, 4);
        assert_eq!(streak.longest_streak, 4);
    }

    #[test]
    fn test_gap_restarts_streak() {
        let mut streak = StreakData::default();
        for d in 1..=3 {
            streak.record_study(day(d));
        }
        streak.record_study(day(6));

        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.total_days_studied, 4);
    }

    #[test]
    fn test_refreshed_breaks_stale_streak() {
        let mut streak = StreakData::default();
        streak.record_study(day(1));
        streak.record_study(day(2));

        assert_eq!(streak.clone().refreshed(day(3)).current_streak, 2);
        let stale = streak.refreshed(day(5));
        assert_eq!(stale.current_streak, 0);
        assert_eq!(stale.longest_streak, 2);
    }
}
