pub mod deck;
pub mod decks;
pub mod export;
pub mod import;
pub mod queue;
pub mod quiz;
pub mod reset;
pub mod stats;
pub mod streak;
pub mod study;
pub mod word;
