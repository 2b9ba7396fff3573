//! Study sessions over a deck's queues

pub mod controller;
pub mod quiz;

pub use controller::{SessionError, SessionPhase, SessionSummary, StudySession};
pub use quiz::{generate_options, AnswerPolicy, QuizOption};
