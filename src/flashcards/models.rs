//! Data models for the vocabulary deck system

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Easiness factor assigned to a word that has never been reviewed
pub const INITIAL_EASINESS: f64 = 2.5;

/// Lower bound of the easiness factor
pub const MIN_EASINESS: f64 = 1.3;

/// A deck is a named, ordered collection of vocabulary words
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub words: Vec<VocabularyItem>,
    /// The protected deck can never be deleted
    #[serde(default)]
    pub is_protected: bool,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            words: Vec::new(),
            is_protected: false,
            created_at: Utc::now(),
        }
    }

    pub fn word(&self, word_id: Uuid) -> Option<&VocabularyItem> {
        self.words.iter().find(|w| w.id == word_id)
    }
}

/// A single vocabulary word. Content never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: Uuid,
    pub term: String,
    pub part_of_speech: String,
    pub definition: String,
    pub example: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl VocabularyItem {
    /// Build a word with a fresh id, filling unset optional fields with defaults
    pub fn new(fields: WordFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: WordFields) -> Self {
        let WordFields {
            term,
            definition,
            part_of_speech,
            example,
            synonyms,
        } = fields;

        let part_of_speech = part_of_speech
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PART_OF_SPEECH.to_string());
        let example = example
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| placeholder_example(&term));

        Self {
            id,
            term,
            part_of_speech,
            definition,
            example,
            synonyms,
        }
    }
}

/// Part of speech used when none is supplied
pub const DEFAULT_PART_OF_SPEECH: &str = "noun";

/// Example sentence synthesized for words imported without one
pub fn placeholder_example(term: &str) -> String {
    format!("The word \"{}\" is commonly used in academic contexts.", term)
}

/// User-supplied content for a new word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFields {
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl WordFields {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            ..Default::default()
        }
    }

    /// Trim every field and split `;`-joined synonyms, the same shape the
    /// CSV importer produces. Fails when the term or definition is blank.
    pub fn normalized(self) -> Result<Self, &'static str> {
        let term = self.term.trim().to_string();
        let definition = self.definition.trim().to_string();
        if term.is_empty() || definition.is_empty() {
            return Err("Missing word or definition");
        }

        let optional = |field: Option<String>| {
            field
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
        };

        let synonyms = self
            .synonyms
            .iter()
            .flat_map(|s| s.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            term,
            definition,
            part_of_speech: optional(self.part_of_speech),
            example: optional(self.example),
            synonyms,
        })
    }
}

impl From<&VocabularyItem> for WordFields {
    fn from(word: &VocabularyItem) -> Self {
        Self {
            term: word.term.clone(),
            definition: word.definition.clone(),
            part_of_speech: Some(word.part_of_speech.clone()),
            example: Some(word.example.clone()),
            synonyms: word.synonyms.clone(),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Quality must be between 0 and 5, got {0}")]
pub struct InvalidQuality(pub i64);

/// Recall quality rating on the SM-2 scale (0-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quality(u8);

impl Quality {
    pub const BLACKOUT: Quality = Quality(0);
    pub const WRONG: Quality = Quality(1);
    pub const HARD: Quality = Quality(2);
    pub const DIFFICULT: Quality = Quality(3);
    pub const GOOD: Quality = Quality(4);
    pub const PERFECT: Quality = Quality(5);

    pub const ALL: [Quality; 6] = [
        Self::BLACKOUT,
        Self::WRONG,
        Self::HARD,
        Self::DIFFICULT,
        Self::GOOD,
        Self::PERFECT,
    ];

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings of 3 and above count as a successful recall
    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Blackout",
            1 => "Wrong",
            2 => "Hard",
            3 => "Difficult",
            4 => "Good",
            _ => "Perfect",
        }
    }

    pub fn description(self) -> &'static str {
        match self.0 {
            0 => "Complete failure to recall",
            1 => "Incorrect, but recognized after",
            2 => "Incorrect, but easy to recall",
            3 => "Correct with serious difficulty",
            4 => "Correct after hesitation",
            _ => "Perfect response",
        }
    }
}

impl TryFrom<i64> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=5).contains(&value) {
            Ok(Quality(value as u8))
        } else {
            Err(InvalidQuality(value))
        }
    }
}

impl From<Quality> for i64 {
    fn from(quality: Quality) -> Self {
        quality.0 as i64
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

/// Spaced repetition state of one word within one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    pub item_id: Uuid,
    /// SM-2 easiness factor, never below 1.3
    #[serde(default = "default_easiness")]
    pub easiness_factor: f64,
    /// Current interval in days
    #[serde(default)]
    pub interval: u32,
    /// Consecutive successful recalls
    #[serde(default)]
    pub repetitions: u32,
    pub next_review_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

fn default_easiness() -> f64 {
    INITIAL_EASINESS
}

impl ReviewState {
    /// Zero state for a word that is due right away
    pub fn new(item_id: Uuid) -> Self {
        Self::due_at(item_id, Utc::now())
    }

    /// Zero state for a word that becomes due at `at`
    pub fn due_at(item_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            item_id,
            easiness_factor: INITIAL_EASINESS,
            interval: 0,
            repetitions: 0,
            next_review_at: at,
            last_reviewed_at: None,
        }
    }

    /// Never reviewed (or reset)
    pub fn is_new(&self) -> bool {
        self.interval == 0 && self.repetitions == 0
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

/// A word together with its review state, as served to study sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithState {
    pub word: VocabularyItem,
    pub state: ReviewState,
}

/// Aggregate queue counts for a deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub learning: usize,
    pub mastered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_new() {
        let state = ReviewState::new(Uuid::new_v4());
        assert!(state.is_new());
        assert_eq!(state.easiness_factor, 2.5);
        assert_eq!(state.interval, 0);
        assert_eq!(state.repetitions, 0);
        assert!(state.last_reviewed_at.is_none());
        assert!(state.is_due(Utc::now()));
    }

    #[test]
    fn test_quality_rejects_out_of_range() {
        assert_eq!(Quality::try_from(6), Err(InvalidQuality(6)));
        assert_eq!(Quality::try_from(-1), Err(InvalidQuality(-1)));
        assert_eq!(Quality::try_from(5).unwrap(), Quality::PERFECT);
        assert!(!Quality::HARD.is_pass());
        assert!(Quality::DIFFICULT.is_pass());
    }

    #[test]
    fn test_quality_deserialize_validates() {
        let q: Quality = serde_json::from_str("4").unwrap();
        assert_eq!(q, Quality::GOOD);
        assert!(serde_json::from_str::<Quality>("9").is_err());
    }

    #[test]
    fn test_word_defaults() {
        let word = VocabularyItem::new(WordFields::new("Laconic", "Using very few words"));
        assert_eq!(word.part_of_speech, "noun");
        assert_eq!(
            word.example,
            "The word \"Laconic\" is commonly used in academic contexts."
        );
        assert!(word.synonyms.is_empty());
    }

    #[test]
    fn test_word_fields_normalized() {
        let mut fields = WordFields::new("  Padded ", " a definition\t");
        fields.example = Some("   ".to_string());
        fields.part_of_speech = Some(" verb ".to_string());
        fields.synonyms = vec!["a;b".to_string(), " c ".to_string(), ";".to_string()];

        let fields = fields.normalized().unwrap();
        assert_eq!(fields.term, "Padded");
        assert_eq!(fields.definition, "a definition");
        assert_eq!(fields.part_of_speech.as_deref(), Some("verb"));
        assert_eq!(fields.example, None);
        assert_eq!(fields.synonyms, vec!["a", "b", "c"]);

        assert!(WordFields::new("", "").normalized().is_err());
        assert!(WordFields::new("term", "   ").normalized().is_err());
    }

    #[test]
    fn test_review_state_json_uses_camel_case() {
        let state = ReviewState::new(Uuid::new_v4());
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("easinessFactor").is_some());
        assert!(json.get("nextReviewAt").is_some());
        assert!(json.get("lastReviewedAt").is_none());
    }
}
