use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use lexicard_lib::config::AppConfig;
use lexicard_lib::flashcards::{Deck, DeckStorage, VocabularyItem};
use lexicard_lib::streak::StreakStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub storage: DeckStorage,
    pub streak: StreakStorage,
}

impl App {
    /// Open the given data directory, or the configured/default one
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let default_dir = DeckStorage::default_data_dir()
            .context("Failed to get data directory")?;

        let config_dir = data_dir.clone().unwrap_or_else(|| default_dir.clone());
        let config = AppConfig::load_from_dir(&config_dir)
            .with_context(|| format!("Failed to load config from {}", config_dir.display()))?;

        let data_dir = data_dir
            .or_else(|| config.data_dir.clone())
            .unwrap_or(default_dir);

        let storage = DeckStorage::open(data_dir.clone())
            .with_context(|| format!("Failed to open decks in {}", data_dir.display()))?;
        let streak = StreakStorage::new(data_dir);

        Ok(Self {
            config,
            storage,
            streak,
        })
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self.storage.list_decks();
        let name_lower = name.to_lowercase();

        // Exact match first
        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
            return Ok(deck.clone());
        }

        // Prefix match
        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                name,
                decks
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                matches
                    .iter()
                    .map(|d| format!("  - {}", d.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// The named deck, or the active deck when no name is given
    pub fn resolve_deck(&self, name: Option<&str>) -> Result<Deck> {
        match name {
            Some(name) => self.find_deck(name),
            None => Ok(self.storage.active_deck().clone()),
        }
    }

    /// Find a word in a deck by its term (case-insensitive)
    pub fn find_word<'d>(&self, deck: &'d Deck, term: &str) -> Result<&'d VocabularyItem> {
        let term_lower = term.to_lowercase();
        deck.words
            .iter()
            .find(|w| w.term.to_lowercase() == term_lower)
            .with_context(|| format!("No word '{}' in deck '{}'", term, deck.name))
    }

    /// Count today as a study day
    pub fn record_study_day(&self) -> Result<()> {
        self.streak
            .record_today()
            .context("Failed to update study streak")?;
        Ok(())
    }
}
