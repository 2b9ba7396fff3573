//! Study queue classification
//!
//! Queues are never stored. Each call re-derives them from the deck's words
//! and their current review states, so a rating that moves a word to another
//! bucket is reflected on the next read.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{CardWithState, QueueStats, ReviewState};

/// Interval (in days) from which a word counts as mastered
pub const MASTERED_INTERVAL: u32 = 21;

/// Named study queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyQueue {
    #[default]
    Due,
    New,
    Learning,
    Mastered,
    All,
}

impl StudyQueue {
    pub const ALL_QUEUES: [StudyQueue; 5] = [
        StudyQueue::Due,
        StudyQueue::New,
        StudyQueue::Learning,
        StudyQueue::Mastered,
        StudyQueue::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StudyQueue::Due => "due",
            StudyQueue::New => "new",
            StudyQueue::Learning => "learning",
            StudyQueue::Mastered => "mastered",
            StudyQueue::All => "all",
        }
    }

    /// Whether a word in this state belongs to the queue at `now`
    pub fn contains(self, state: &ReviewState, now: DateTime<Utc>) -> bool {
        match self {
            StudyQueue::Due => state.is_due(now),
            StudyQueue::New => Bucket::of(state) == Bucket::New,
            StudyQueue::Learning => Bucket::of(state) == Bucket::Learning,
            StudyQueue::Mastered => Bucket::of(state) == Bucket::Mastered,
            StudyQueue::All => true,
        }
    }
}

impl fmt::Display for StudyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyQueue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "due" => Ok(StudyQueue::Due),
            "new" => Ok(StudyQueue::New),
            "learning" => Ok(StudyQueue::Learning),
            "mastered" => Ok(StudyQueue::Mastered),
            "all" => Ok(StudyQueue::All),
            other => Err(format!("Unknown queue: {}", other)),
        }
    }
}

/// Progress bucket; every word is in exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    New,
    Learning,
    Mastered,
}

impl Bucket {
    pub fn of(state: &ReviewState) -> Self {
        if state.interval >= MASTERED_INTERVAL {
            Bucket::Mastered
        } else if state.is_new() {
            Bucket::New
        } else {
            // Includes words just failed (repetitions reset, interval 1)
            Bucket::Learning
        }
    }
}

/// Select the cards belonging to `queue`, in presentation order
///
/// Due cards are ordered by due date (oldest first); every other queue keeps
/// deck order.
pub fn classify(cards: &[CardWithState], queue: StudyQueue, now: DateTime<Utc>) -> Vec<CardWithState> {
    let mut selected: Vec<CardWithState> = cards
        .iter()
        .filter(|c| queue.contains(&c.state, now))
        .cloned()
        .collect();

    if queue == StudyQueue::Due {
        selected.sort_by(|a, b| a.state.next_review_at.cmp(&b.state.next_review_at));
    }

    selected
}

/// Count every queue with a single scan
pub fn stats(cards: &[CardWithState], now: DateTime<Utc>) -> QueueStats {
    let mut stats = QueueStats {
        total: cards.len(),
        ..Default::default()
    };

    for card in cards {
        match Bucket::of(&card.state) {
            Bucket::New => stats.new += 1,
            Bucket::Learning => stats.learning += 1,
            Bucket::Mastered => stats.mastered += 1,
        }
        if card.state.is_due(now) {
            stats.due += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::{VocabularyItem, WordFields};
    use chrono::Duration;

    fn card(interval: u32, repetitions: u32, due_in_days: i64, now: DateTime<Utc>) -> CardWithState {
        let word = VocabularyItem::new(WordFields::new("term", "definition"));
        let mut state = ReviewState::due_at(word.id, now + Duration::days(due_in_days));
        state.interval = interval;
        state.repetitions = repetitions;
        CardWithState { word, state }
    }

    #[test]
    fn test_buckets_partition_every_state() {
        let now = Utc::now();
        for interval in [0, 1, 6, 20, 21, 45] {
            for repetitions in [0, 1, 3] {
                let c = card(interval, repetitions, 0, now);
                let memberships = [StudyQueue::New, StudyQueue::Learning, StudyQueue::Mastered]
                    .iter()
                    .filter(|q| q.contains(&c.state, now))
                    .count();
                assert_eq!(memberships, 1, "interval={} repetitions={}", interval, repetitions);
            }
        }
    }

    #[test]
    fn test_failed_word_is_learning() {
        let now = Utc::now();
        let c = card(1, 0, 1, now);
        assert_eq!(Bucket::of(&c.state), Bucket::Learning);
    }

    #[test]
    fn test_due_overlaps_other_queues() {
        let now = Utc::now();
        let cards = vec![
            card(0, 0, -1, now),  // new, due
            card(6, 2, -2, now),  // learning, due
            card(30, 4, 10, now), // mastered, not due
            card(25, 4, -3, now), // mastered, due
        ];

        let due = classify(&cards, StudyQueue::Due, now);
        assert_eq!(due.len(), 3);
        // Oldest due date first
        assert_eq!(due[0].word.id, cards[3].word.id);
        assert_eq!(due[1].word.id, cards[1].word.id);
        assert_eq!(due[2].word.id, cards[0].word.id);

        assert_eq!(classify(&cards, StudyQueue::New, now).len(), 1);
        assert_eq!(classify(&cards, StudyQueue::Learning, now).len(), 1);
        assert_eq!(classify(&cards, StudyQueue::Mastered, now).len(), 2);

        let all = classify(&cards, StudyQueue::All, now);
        let ids: Vec<_> = all.iter().map(|c| c.word.id).collect();
        let expected: Vec<_> = cards.iter().map(|c| c.word.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_stats() {
        let now = Utc::now();
        let cards = vec![
            card(0, 0, 0, now),
            card(0, 0, 0, now),
            card(1, 1, 1, now),
            card(21, 3, 21, now),
        ];

        let stats = stats(&cards, now);
        assert_eq!(
            stats,
            QueueStats {
                total: 4,
                due: 2,
                new: 2,
                learning: 1,
                mastered: 1,
            }
        );
    }

    #[test]
    fn test_empty_deck() {
        let now = Utc::now();
        assert!(classify(&[], StudyQueue::Due, now).is_empty());
        assert_eq!(stats(&[], now), QueueStats::default());
    }

    #[test]
    fn test_queue_from_str() {
        assert_eq!("Due".parse::<StudyQueue>().unwrap(), StudyQueue::Due);
        assert_eq!("mastered".parse::<StudyQueue>().unwrap(), StudyQueue::Mastered);
        assert!("later".parse::<StudyQueue>().is_err());
    }
}
