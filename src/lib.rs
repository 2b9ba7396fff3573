//! Lexicard: SM-2 spaced repetition for vocabulary decks

pub mod config;
pub mod flashcards;
mod persist;
pub mod session;
pub mod streak;

pub use config::AppConfig;
pub use flashcards::{DeckStorage, Quality, StudyQueue};
pub use session::StudySession;
pub use streak::StreakStorage;
