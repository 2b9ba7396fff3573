//! User configuration (`config.toml` in the data directory)
//!
//! ```toml
//! dataDir = "/home/me/vocab"
//!
//! [study]
//! defaultQueue = "due"
//! shuffle = false
//!
//! [quiz]
//! correctQuality = 5
//! incorrectQuality = 1
//! optionCount = 4
//! ```
//!
//! Every key is optional. `LEXICARD_DATA_DIR` overrides `dataDir`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::{Quality, StudyQueue};
use crate::session::AnswerPolicy;

pub const CONFIG_FILE: &str = "config.toml";
pub const DATA_DIR_ENV: &str = "LEXICARD_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Quiz needs at least 2 options, got {0}")]
    InvalidOptionCount(usize),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub study: StudyConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyConfig {
    /// Queue studied when none is given
    pub default_queue: StudyQueue,
    /// Shuffle the session order on start
    pub shuffle: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizConfig {
    pub correct_quality: Quality,
    pub incorrect_quality: Quality,
    pub option_count: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        let policy = AnswerPolicy::default();
        Self {
            correct_quality: policy.correct,
            incorrect_quality: policy.incorrect,
            option_count: 4,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            log::debug!("No config at {:?}, using defaults", path);
            AppConfig::default()
        };

        if config.quiz.option_count < 2 {
            return Err(ConfigError::InvalidOptionCount(config.quiz.option_count));
        }

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        Ok(config)
    }

    /// Load `config.toml` from a data directory
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load(&data_dir.join(CONFIG_FILE))
    }

    pub fn answer_policy(&self) -> AnswerPolicy {
        AnswerPolicy {
            correct: self.quiz.correct_quality,
            incorrect: self.quiz.incorrect_quality,
        }
    }
}
