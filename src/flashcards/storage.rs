//! Storage operations for decks, words and review states
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! ├── decks.json           # Array of all decks with their words
//! ├── active_deck.json     # Id of the active deck
//! └── states/
//!     └── {deck-id}.json   # Word id -> review state, per deck
//! ```
//!
//! Everything is loaded once by [`DeckStorage::open`]. Each mutation writes
//! the new snapshot to disk first and only then replaces the in-memory copy,
//! so a failed write leaves the loaded state matching what is on disk.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::algorithm::next_state_at;
use super::delimited::{export_to_delimited_text, import_from_delimited_text, ImportReport};
use super::models::*;
use super::queue::{self, StudyQueue};
use super::seed;
use crate::persist::{read_json, write_json, PersistError};

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Word not found: {0}")]
    WordNotFound(Uuid),

    #[error("Cannot delete protected deck: {0}")]
    ProtectedDeck(Uuid),

    #[error("Invalid word: {0}")]
    InvalidWord(&'static str),

    #[error("Import produced no words ({0} rows rejected)")]
    EmptyImport(usize),

    #[error("Data directory not found")]
    DataDirNotFound,
}

impl From<PersistError> for FlashcardStorageError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::Io(e) => FlashcardStorageError::Io(e),
            PersistError::Json(e) => FlashcardStorageError::Json(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

type StateTable = BTreeMap<Uuid, ReviewState>;

/// Storage manager for decks and their review states
pub struct DeckStorage {
    /// Base path for app data (e.g., ~/.local/share/lexicard)
    base_path: PathBuf,
    /// All decks; the protected deck is always first
    decks: Vec<Deck>,
    active_deck_id: Option<Uuid>,
    states: HashMap<Uuid, StateTable>,
}

impl DeckStorage {
    /// Default data directory for the current user
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("lexicard"))
            .ok_or(FlashcardStorageError::DataDirNotFound)
    }

    /// Load all decks, the active deck pointer and every review state table
    pub fn open(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_path.join("states"))?;

        let mut storage = Self {
            decks: read_json(&base_path.join("decks.json"))?.unwrap_or_default(),
            active_deck_id: read_json(&base_path.join("active_deck.json"))?,
            states: HashMap::new(),
            base_path,
        };

        storage.ensure_protected_deck()?;

        for deck in &storage.decks {
            if let Some(table) = read_json::<StateTable>(&storage.state_path(deck.id))? {
                storage.states.insert(deck.id, table);
            }
        }

        log::info!(
            "Loaded {} decks from {:?}",
            storage.decks.len(),
            storage.base_path
        );
        Ok(storage)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn decks_path(&self) -> PathBuf {
        self.base_path.join("decks.json")
    }

    fn active_deck_path(&self) -> PathBuf {
        self.base_path.join("active_deck.json")
    }

    fn state_path(&self, deck_id: Uuid) -> PathBuf {
        self.base_path
            .join("states")
            .join(format!("{}.json", deck_id))
    }

    /// Put the starter deck first, recreating it if it went missing
    fn ensure_protected_deck(&mut self) -> Result<()> {
        let protected_id = seed::protected_deck_id();
        let mut decks = self.decks.clone();

        match decks.iter().position(|d| d.id == protected_id) {
            Some(0) if decks[0].is_protected => return Ok(()),
            Some(pos) => {
                let mut deck = decks.remove(pos);
                deck.is_protected = true;
                decks.insert(0, deck);
            }
            None => {
                log::info!("Creating starter deck '{}'", seed::PROTECTED_DECK_NAME);
                decks.insert(0, seed::protected_deck(Utc::now()));
            }
        }

        write_json(&self.decks_path(), &decks)?;
        self.decks = decks;
        Ok(())
    }

    // ==================== Deck Operations ====================

    /// List all decks, protected deck first
    pub fn list_decks(&self) -> &[Deck] {
        &self.decks
    }

    /// Get a specific deck
    pub fn get_deck(&self, deck_id: Uuid) -> Result<&Deck> {
        self.decks
            .iter()
            .find(|d| d.id == deck_id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))
    }

    fn deck_index(&self, deck_id: Uuid) -> Result<usize> {
        self.decks
            .iter()
            .position(|d| d.id == deck_id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))
    }

    pub fn protected_deck(&self) -> &Deck {
        &self.decks[0]
    }

    /// Create a new, empty deck
    pub fn create_deck(&mut self, name: String, description: String) -> Result<Deck> {
        let deck = Deck::new(name, description);
        self.insert_deck(deck.clone())?;

        log::info!("Created deck '{}' ({})", deck.name, deck.id);
        Ok(deck)
    }

    fn insert_deck(&mut self, deck: Deck) -> Result<()> {
        let mut decks = self.decks.clone();
        decks.push(deck);
        self.save_decks(decks)
    }

    fn save_decks(&mut self, decks: Vec<Deck>) -> Result<()> {
        write_json(&self.decks_path(), &decks)?;
        self.decks = decks;
        Ok(())
    }

    /// Delete a deck and its review states (the protected deck is refused)
    pub fn delete_deck(&mut self, deck_id: Uuid) -> Result<()> {
        let deck = self.get_deck(deck_id)?;
        if deck.is_protected {
            return Err(FlashcardStorageError::ProtectedDeck(deck_id));
        }

        let decks: Vec<Deck> = self
            .decks
            .iter()
            .filter(|d| d.id != deck_id)
            .cloned()
            .collect();
        self.save_decks(decks)?;

        self.remove_states(deck_id)?;

        // If this was the active deck, fall back to the protected deck
        if self.active_deck_id == Some(deck_id) {
            let protected_id = self.protected_deck().id;
            self.set_active(protected_id)?;
        }

        log::info!("Deleted deck {}", deck_id);
        Ok(())
    }

    // ==================== Active Deck ====================

    /// Id of the active deck; falls back to the protected deck
    pub fn active_deck_id(&self) -> Uuid {
        self.active_deck().id
    }

    pub fn active_deck(&self) -> &Deck {
        self.active_deck_id
            .and_then(|id| self.decks.iter().find(|d| d.id == id))
            .unwrap_or_else(|| self.protected_deck())
    }

    /// Make a deck the active one
    pub fn set_active(&mut self, deck_id: Uuid) -> Result<()> {
        self.get_deck(deck_id)?;

        write_json(&self.active_deck_path(), &deck_id)?;
        self.active_deck_id = Some(deck_id);

        log::info!("Set active deck to {}", deck_id);
        Ok(())
    }

    // ==================== Word Operations ====================

    /// Append a new word to a deck
    ///
    /// Fields are trimmed and synonyms split on `;` so the word survives an
    /// export and re-import unchanged.
    pub fn add_word(&mut self, deck_id: Uuid, fields: WordFields) -> Result<VocabularyItem> {
        let idx = self.deck_index(deck_id)?;
        let fields = fields
            .normalized()
            .map_err(FlashcardStorageError::InvalidWord)?;
        let word = VocabularyItem::new(fields);

        let mut decks = self.decks.clone();
        decks[idx].words.push(word.clone());
        self.save_decks(decks)?;

        log::debug!("Added word '{}' to deck {}", word.term, deck_id);
        Ok(word)
    }

    /// Remove a word and its review state from a deck
    pub fn remove_word(&mut self, deck_id: Uuid, word_id: Uuid) -> Result<()> {
        let idx = self.deck_index(deck_id)?;
        if self.decks[idx].word(word_id).is_none() {
            return Err(FlashcardStorageError::WordNotFound(word_id));
        }

        let mut decks = self.decks.clone();
        decks[idx].words.retain(|w| w.id != word_id);
        self.save_decks(decks)?;

        if let Some(table) = self.states.get(&deck_id) {
            if table.contains_key(&word_id) {
                let mut table = table.clone();
                table.remove(&word_id);
                self.save_states(deck_id, table)?;
            }
        }

        log::debug!("Removed word {} from deck {}", word_id, deck_id);
        Ok(())
    }

    // ==================== Import / Export ====================

    /// Create a new deck from delimited text
    ///
    /// Rejected rows are reported, not fatal. A text without a single usable
    /// row creates nothing.
    pub fn import_deck(
        &mut self,
        name: String,
        description: String,
        text: &str,
    ) -> Result<(Deck, ImportReport)> {
        let report = import_from_delimited_text(text);
        if !report.is_success() {
            return Err(FlashcardStorageError::EmptyImport(report.rejected.len()));
        }

        let mut deck = Deck::new(name, description);
        deck.words = report.items.clone();
        self.insert_deck(deck.clone())?;

        log::info!(
            "Imported deck '{}' with {} words ({} rows rejected)",
            deck.name,
            deck.words.len(),
            report.rejected.len()
        );
        Ok((deck, report))
    }

    /// Export a deck's words as delimited text
    pub fn export_deck(&self, deck_id: Uuid) -> Result<String> {
        let deck = self.get_deck(deck_id)?;
        Ok(export_to_delimited_text(deck)?)
    }

    // ==================== State Operations ====================

    /// Get the review state of a word; unreviewed words read as new
    pub fn review_state(&self, deck_id: Uuid, word_id: Uuid) -> Result<ReviewState> {
        let deck = self.get_deck(deck_id)?;
        if deck.word(word_id).is_none() {
            return Err(FlashcardStorageError::WordNotFound(word_id));
        }
        Ok(self.state_or_initial(deck, word_id))
    }

    fn state_or_initial(&self, deck: &Deck, word_id: Uuid) -> ReviewState {
        self.states
            .get(&deck.id)
            .and_then(|table| table.get(&word_id))
            .cloned()
            // Never-reviewed words have been due since the deck was created
            .unwrap_or_else(|| ReviewState::due_at(word_id, deck.created_at))
    }

    /// Persist the review state of a word
    pub fn save_review_state(&mut self, deck_id: Uuid, state: ReviewState) -> Result<()> {
        let deck = self.get_deck(deck_id)?;
        if deck.word(state.item_id).is_none() {
            return Err(FlashcardStorageError::WordNotFound(state.item_id));
        }

        let mut table = self.states.get(&deck_id).cloned().unwrap_or_default();
        table.insert(state.item_id, state);
        self.save_states(deck_id, table)
    }

    fn save_states(&mut self, deck_id: Uuid, table: StateTable) -> Result<()> {
        write_json(&self.state_path(deck_id), &table)?;
        self.states.insert(deck_id, table);
        Ok(())
    }

    fn remove_states(&mut self, deck_id: Uuid) -> Result<()> {
        let path = self.state_path(deck_id);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        self.states.remove(&deck_id);
        Ok(())
    }

    /// All words of a deck with their current review states, in deck order
    pub fn cards_with_state(&self, deck_id: Uuid) -> Result<Vec<CardWithState>> {
        let deck = self.get_deck(deck_id)?;
        Ok(deck
            .words
            .iter()
            .map(|word| CardWithState {
                word: word.clone(),
                state: self.state_or_initial(deck, word.id),
            })
            .collect())
    }

    /// Delete every review state of a deck
    pub fn reset_progress(&mut self, deck_id: Uuid) -> Result<()> {
        self.get_deck(deck_id)?;
        self.remove_states(deck_id)?;

        log::info!("Reset progress for deck {}", deck_id);
        Ok(())
    }

    // ==================== Review Operations ====================

    /// Schedule and persist a review of one word
    pub fn submit_review(
        &mut self,
        deck_id: Uuid,
        word_id: Uuid,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ReviewState> {
        let current = self.review_state(deck_id, word_id)?;
        let next = next_state_at(&current, quality, now);

        self.save_review_state(deck_id, next.clone())?;

        log::debug!(
            "Reviewed {} with quality {}: interval {} -> {}, EF {:.2}",
            word_id,
            quality.value(),
            current.interval,
            next.interval,
            next.easiness_factor
        );
        Ok(next)
    }

    /// Cards of a deck that belong to `queue` at `now`
    pub fn queue(
        &self,
        deck_id: Uuid,
        study_queue: StudyQueue,
        now: DateTime<Utc>,
    ) -> Result<Vec<CardWithState>> {
        let cards = self.cards_with_state(deck_id)?;
        Ok(queue::classify(&cards, study_queue, now))
    }

    /// Queue counts for a deck
    pub fn stats(&self, deck_id: Uuid, now: DateTime<Utc>) -> Result<QueueStats> {
        let cards = self.cards_with_state(deck_id)?;
        Ok(queue::stats(&cards, now))
    }
}
