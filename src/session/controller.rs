//! Study session state machine
//!
//! `Idle → Presenting → Flipped → Presenting → … → Exhausted`
//!
//! The presentation order is frozen when the session starts. After every
//! rating the queue is derived again from storage and words that left it are
//! dropped from the order, so a word that was just scheduled into the future
//! is not served twice.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::quiz::AnswerPolicy;
use crate::flashcards::{CardWithState, DeckStorage, FlashcardStorageError, Quality, ReviewState, StudyQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// No queue loaded
    Idle,
    /// Showing the front of the current word
    Presenting,
    /// Answer revealed, waiting for a rating
    Flipped,
    /// Queue finished (or empty)
    Exhausted,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot {action} while the session is {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: SessionPhase,
    },

    #[error(transparent)]
    Storage(#[from] FlashcardStorageError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Running totals of a session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub reviewed: usize,
    pub correct: usize,
    /// Words rated below 3 at least once, in the order they were first missed
    pub missed: Vec<Uuid>,
}

impl SessionSummary {
    fn record(&mut self, word_id: Uuid, quality: Quality) {
        self.reviewed += 1;
        if quality.is_pass() {
            self.correct += 1;
        } else if !self.missed.contains(&word_id) {
            self.missed.push(word_id);
        }
    }
}

/// One study session over a single deck
pub struct StudySession<'a> {
    storage: &'a mut DeckStorage,
    deck_id: Uuid,
    queue: StudyQueue,
    order: Vec<Uuid>,
    index: usize,
    phase: SessionPhase,
    policy: AnswerPolicy,
    summary: SessionSummary,
}

impl<'a> StudySession<'a> {
    pub fn new(storage: &'a mut DeckStorage, deck_id: Uuid) -> Result<Self> {
        storage.get_deck(deck_id)?;
        Ok(Self {
            storage,
            deck_id,
            queue: StudyQueue::default(),
            order: Vec::new(),
            index: 0,
            phase: SessionPhase::Idle,
            policy: AnswerPolicy::default(),
            summary: SessionSummary::default(),
        })
    }

    /// Session over the active deck
    pub fn for_active(storage: &'a mut DeckStorage) -> Self {
        let deck_id = storage.active_deck_id();
        Self {
            storage,
            deck_id,
            queue: StudyQueue::default(),
            order: Vec::new(),
            index: 0,
            phase: SessionPhase::Idle,
            policy: AnswerPolicy::default(),
            summary: SessionSummary::default(),
        }
    }

    pub fn with_answer_policy(mut self, policy: AnswerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn deck_id(&self) -> Uuid {
        self.deck_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn queue(&self) -> StudyQueue {
        self.queue
    }

    /// Zero-based position in the current order
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of words still in the session order
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn storage(&self) -> &DeckStorage {
        &*self.storage
    }

    fn expect_phase(&self, allowed: &[SessionPhase], action: &'static str) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Presenting | SessionPhase::Flipped)
    }

    /// Load a queue and present its first word
    pub fn start(&mut self, queue: StudyQueue) -> Result<SessionPhase> {
        self.start_at(queue, Utc::now())
    }

    pub fn start_at(&mut self, queue: StudyQueue, now: DateTime<Utc>) -> Result<SessionPhase> {
        let cards = self.storage.queue(self.deck_id, queue, now)?;

        self.queue = queue;
        self.order = cards.iter().map(|c| c.word.id).collect();
        self.index = 0;
        self.summary = SessionSummary::default();
        self.phase = if self.order.is_empty() {
            SessionPhase::Exhausted
        } else {
            SessionPhase::Presenting
        };

        log::debug!(
            "Started '{}' session on deck {} with {} words",
            queue,
            self.deck_id,
            self.order.len()
        );
        Ok(self.phase)
    }

    /// The word currently shown, with its latest review state
    pub fn current(&self) -> Result<Option<CardWithState>> {
        if !self.is_active() {
            return Ok(None);
        }
        let Some(&word_id) = self.order.get(self.index) else {
            return Ok(None);
        };

        let deck = self.storage.get_deck(self.deck_id)?;
        let word = deck
            .word(word_id)
            .cloned()
            .ok_or(FlashcardStorageError::WordNotFound(word_id))?;
        let state = self.storage.review_state(self.deck_id, word_id)?;
        Ok(Some(CardWithState { word, state }))
    }

    /// Show the answer side; ratings are accepted only after this
    pub fn reveal(&mut self) -> Result<()> {
        self.expect_phase(&[SessionPhase::Presenting], "reveal")?;
        self.phase = SessionPhase::Flipped;
        Ok(())
    }

    /// Rate the revealed word and move on
    pub fn rate(&mut self, quality: Quality) -> Result<ReviewState> {
        self.rate_at(quality, Utc::now())
    }

    pub fn rate_at(&mut self, quality: Quality, now: DateTime<Utc>) -> Result<ReviewState> {
        self.expect_phase(&[SessionPhase::Flipped], "rate")?;

        let word_id = self.order[self.index];
        let state = self
            .storage
            .submit_review(self.deck_id, word_id, quality, now)?;
        self.summary.record(word_id, quality);

        let remaining: HashSet<Uuid> = self
            .storage
            .queue(self.deck_id, self.queue, now)?
            .into_iter()
            .map(|c| c.word.id)
            .collect();

        let next_id = self.order[self.index + 1..]
            .iter()
            .find(|id| remaining.contains(*id))
            .copied();
        self.order.retain(|id| remaining.contains(id));

        match next_id {
            Some(id) => {
                self.index = self.order.iter().position(|w| *w == id).unwrap_or(0);
                self.phase = SessionPhase::Presenting;
            }
            None => {
                self.index = 0;
                self.phase = SessionPhase::Exhausted;
                log::debug!(
                    "Session exhausted after {} reviews ({} correct)",
                    self.summary.reviewed,
                    self.summary.correct
                );
            }
        }

        Ok(state)
    }

    /// Record a multiple-choice answer through the answer policy
    pub fn answer(&mut self, correct: bool) -> Result<ReviewState> {
        self.answer_at(correct, Utc::now())
    }

    pub fn answer_at(&mut self, correct: bool, now: DateTime<Utc>) -> Result<ReviewState> {
        self.expect_phase(&[SessionPhase::Presenting, SessionPhase::Flipped], "answer")?;
        self.phase = SessionPhase::Flipped;
        self.rate_at(self.policy.quality_for(correct), now)
    }

    /// Step back without rating; false at the first word
    pub fn previous(&mut self) -> bool {
        if !self.is_active() || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.phase = SessionPhase::Presenting;
        true
    }

    /// Step forward without rating; false at the last word
    pub fn next(&mut self) -> bool {
        if !self.is_active() || self.index + 1 >= self.order.len() {
            return false;
        }
        self.index += 1;
        self.phase = SessionPhase::Presenting;
        true
    }

    /// Randomize the presentation order and restart at the first word;
    /// does nothing unless a word is being shown
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.is_active() {
            return;
        }
        self.order.shuffle(rng);
        self.index = 0;
        self.phase = SessionPhase::Presenting;
    }

    /// Forget all progress on the deck and return to idle
    pub fn reset(&mut self) -> Result<()> {
        self.storage.reset_progress(self.deck_id)?;
        self.order.clear();
        self.index = 0;
        self.phase = SessionPhase::Idle;
        self.summary = SessionSummary::default();
        Ok(())
    }
}
