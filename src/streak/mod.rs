//! Daily study streak tracking module

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{StreakStorage, StreakStorageError};
