//! Vocabulary decks and spaced repetition for Lexicard
//!
//! This module provides:
//! - Deck management with a protected starter deck
//! - Word CRUD and CSV import/export
//! - SM-2 spaced repetition algorithm
//! - Deck-scoped review state tracking and study queues

pub mod algorithm;
pub mod delimited;
pub mod models;
pub mod queue;
pub mod seed;
pub mod storage;

pub use delimited::{HeaderRow, ImportReport, RejectedRow};
pub use models::*;
pub use queue::StudyQueue;
pub use storage::{DeckStorage, FlashcardStorageError};
