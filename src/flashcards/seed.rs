//! Built-in starter deck
//!
//! The starter deck is the protected deck: it is recreated on startup when
//! missing and can never be deleted. Its ids are derived from names (UUID v5)
//! so a recreated deck keeps the ids of the words reviewed before.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::{Deck, VocabularyItem, WordFields};

const SEED_NAMESPACE: Uuid = Uuid::from_u128(0x6c65_7869_6361_7264_8000_0000_0000_0001);

pub const PROTECTED_DECK_NAME: &str = "GRE High-Frequency";
pub const PROTECTED_DECK_DESCRIPTION: &str = "Essential GRE vocabulary words";

struct SeedWord {
    term: &'static str,
    part_of_speech: &'static str,
    definition: &'static str,
    example: &'static str,
    synonyms: &'static [&'static str],
}

/// Id of the protected starter deck
pub fn protected_deck_id() -> Uuid {
    Uuid::new_v5(&SEED_NAMESPACE, b"deck/gre-high-frequency")
}

/// Build the protected starter deck
pub fn protected_deck(created_at: DateTime<Utc>) -> Deck {
    let deck_id = protected_deck_id();
    let words = SEED_WORDS
        .iter()
        .map(|seed| {
            let id = Uuid::new_v5(&deck_id, seed.term.to_lowercase().as_bytes());
            VocabularyItem::with_id(
                id,
                WordFields {
                    term: seed.term.to_string(),
                    definition: seed.definition.to_string(),
                    part_of_speech: Some(seed.part_of_speech.to_string()),
                    example: Some(seed.example.to_string()),
                    synonyms: seed.synonyms.iter().map(|s| s.to_string()).collect(),
                },
            )
        })
        .collect();

    Deck {
        id: deck_id,
        name: PROTECTED_DECK_NAME.to_string(),
        description: PROTECTED_DECK_DESCRIPTION.to_string(),
        words,
        is_protected: true,
        created_at,
    }
}

const SEED_WORDS: &[SeedWord] = &[
    SeedWord {
        term: "Ephemeral",
        part_of_speech: "adjective",
        definition: "Lasting for a very short time; transitory",
        example: "The ephemeral beauty of cherry blossoms makes them all the more precious.",
        synonyms: &["fleeting", "transient", "momentary", "brief"],
    },
    SeedWord {
        term: "Sycophant",
        part_of_speech: "noun",
        definition: "A person who acts obsequiously toward someone important to gain advantage",
        example: "The CEO surrounded himself with sycophants who never challenged his decisions.",
        synonyms: &["flatterer", "toady", "bootlicker", "yes-man"],
    },
    SeedWord {
        term: "Ubiquitous",
        part_of_speech: "adjective",
        definition: "Present, appearing, or found everywhere",
        example: "Smartphones have become ubiquitous in modern society.",
        synonyms: &["omnipresent", "pervasive", "universal", "everywhere"],
    },
    SeedWord {
        term: "Taciturn",
        part_of_speech: "adjective",
        definition: "Reserved or uncommunicative in speech; saying little",
        example: "The taciturn old man rarely spoke more than a few words at a time.",
        synonyms: &["reticent", "reserved", "silent", "uncommunicative"],
    },
    SeedWord {
        term: "Pulchritude",
        part_of_speech: "noun",
        definition: "Beauty, especially of a physical nature",
        example: "The pulchritude of the alpine landscape left the hikers speechless.",
        synonyms: &["beauty", "loveliness", "attractiveness", "comeliness"],
    },
    SeedWord {
        term: "Obsequious",
        part_of_speech: "adjective",
        definition: "Obedient or attentive to an excessive or servile degree",
        example: "His obsequious behavior toward the wealthy clients made his colleagues uncomfortable.",
        synonyms: &["servile", "submissive", "fawning", "sycophantic"],
    },
    SeedWord {
        term: "Mendacious",
        part_of_speech: "adjective",
        definition: "Not telling the truth; lying",
        example: "The politician's mendacious statements were quickly fact-checked by journalists.",
        synonyms: &["untruthful", "deceitful", "dishonest", "lying"],
    },
    SeedWord {
        term: "Languid",
        part_of_speech: "adjective",
        definition: "Displaying or having a disinclination for physical exertion or effort; slow and relaxed",
        example: "She spent a languid afternoon reading by the pool.",
        synonyms: &["leisurely", "unhurried", "relaxed", "slow"],
    },
    SeedWord {
        term: "Ineffable",
        part_of_speech: "adjective",
        definition: "Too great or extreme to be expressed or described in words",
        example: "She felt an ineffable joy upon seeing her newborn child for the first time.",
        synonyms: &["indescribable", "inexpressible", "unspeakable", "unutterable"],
    },
    SeedWord {
        term: "Gregarious",
        part_of_speech: "adjective",
        definition: "Fond of company; sociable",
        example: "His gregarious personality made him the life of every party.",
        synonyms: &["sociable", "outgoing", "friendly", "convivial"],
    },
    SeedWord {
        term: "Fastidious",
        part_of_speech: "adjective",
        definition: "Very attentive to and concerned about accuracy and detail",
        example: "The fastidious editor caught every grammatical error in the manuscript.",
        synonyms: &["meticulous", "particular", "finicky", "scrupulous"],
    },
    SeedWord {
        term: "Enervate",
        part_of_speech: "verb",
        definition: "To cause someone to feel drained of energy or vitality",
        example: "The long hike in the heat enervated even the most experienced climbers.",
        synonyms: &["exhaust", "tire", "fatigue", "weaken"],
    },
    SeedWord {
        term: "Dilettante",
        part_of_speech: "noun",
        definition: "A person who cultivates an area of interest without real commitment or knowledge",
        example: "Critics dismissed him as a dilettante who dabbled in art without true understanding.",
        synonyms: &["amateur", "dabbler", "nonprofessional", "hobbyist"],
    },
    SeedWord {
        term: "Capricious",
        part_of_speech: "adjective",
        definition: "Given to sudden and unaccountable changes of mood or behavior",
        example: "The capricious weather made it difficult to plan outdoor activities.",
        synonyms: &["fickle", "unpredictable", "changeable", "volatile"],
    },
    SeedWord {
        term: "Bellicose",
        part_of_speech: "adjective",
        definition: "Demonstrating aggression and willingness to fight",
        example: "The bellicose rhetoric between the two nations raised fears of war.",
        synonyms: &["aggressive", "hostile", "warlike", "combative"],
    },
    SeedWord {
        term: "Ameliorate",
        part_of_speech: "verb",
        definition: "To make something bad or unsatisfactory better",
        example: "The new policies were designed to ameliorate working conditions.",
        synonyms: &["improve", "better", "enhance", "alleviate"],
    },
    SeedWord {
        term: "Vacillate",
        part_of_speech: "verb",
        definition: "To alternate or waver between different opinions or actions; be indecisive",
        example: "She vacillated between accepting the job offer and staying at her current position.",
        synonyms: &["waver", "hesitate", "oscillate", "fluctuate"],
    },
    SeedWord {
        term: "Querulous",
        part_of_speech: "adjective",
        definition: "Complaining in a petulant or whining manner",
        example: "The querulous customer demanded to speak with the manager again.",
        synonyms: &["complaining", "whining", "peevish", "petulant"],
    },
    SeedWord {
        term: "Perfunctory",
        part_of_speech: "adjective",
        definition: "Carried out with a minimum of effort or reflection",
        example: "He gave the report a perfunctory glance before signing off on it.",
        synonyms: &["cursory", "superficial", "hasty", "token"],
    },
    SeedWord {
        term: "Ostentatious",
        part_of_speech: "adjective",
        definition: "Characterized by vulgar or pretentious display; designed to impress",
        example: "The ostentatious mansion was filled with expensive but tasteless decorations.",
        synonyms: &["showy", "flashy", "pretentious", "flamboyant"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_protected_deck_is_stable() {
        let a = protected_deck(Utc::now());
        let b = protected_deck(Utc::now());

        assert!(a.is_protected);
        assert_eq!(a.id, b.id);
        assert_eq!(a.words.len(), 20);
        assert_eq!(a.words, b.words);

        let ids: HashSet<Uuid> = a.words.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), a.words.len());
    }
}
