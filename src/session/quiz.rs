//! Multiple-choice study support

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flashcards::{Quality, VocabularyItem};

/// Maps a right/wrong multiple-choice answer onto a quality rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPolicy {
    pub correct: Quality,
    pub incorrect: Quality,
}

impl Default for AnswerPolicy {
    fn default() -> Self {
        Self {
            correct: Quality::PERFECT,
            incorrect: Quality::WRONG,
        }
    }
}

impl AnswerPolicy {
    pub fn quality_for(&self, correct: bool) -> Quality {
        if correct {
            self.correct
        } else {
            self.incorrect
        }
    }
}

/// One answer choice shown for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub word_id: Uuid,
    pub term: String,
    pub definition: String,
    pub is_correct: bool,
}

impl QuizOption {
    fn from_word(word: &VocabularyItem, is_correct: bool) -> Self {
        Self {
            word_id: word.id,
            term: word.term.clone(),
            definition: word.definition.clone(),
            is_correct,
        }
    }
}

/// Build shuffled answer choices: the word's own definition plus up to
/// `count - 1` definitions of other words from `pool`
pub fn generate_options<R: Rng + ?Sized>(
    current: &VocabularyItem,
    pool: &[VocabularyItem],
    count: usize,
    rng: &mut R,
) -> Vec<QuizOption> {
    let others: Vec<&VocabularyItem> = pool.iter().filter(|w| w.id != current.id).collect();

    let mut options = vec![QuizOption::from_word(current, true)];
    options.extend(
        others
            .choose_multiple(rng, count.saturating_sub(1))
            .map(|w| QuizOption::from_word(w, false)),
    );
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::WordFields;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(n: usize) -> Vec<VocabularyItem> {
        (0..n)
            .map(|i| VocabularyItem::new(WordFields::new(format!("term{}", i), format!("definition {}", i))))
            .collect()
    }

    #[test]
    fn test_options_contain_one_correct_answer() {
        let pool = words(10);
        let mut rng = StdRng::seed_from_u64(7);

        let options = generate_options(&pool[3], &pool, 4, &mut rng);
        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|o| o.is_correct).count(), 1);

        let correct = options.iter().find(|o| o.is_correct).unwrap();
        assert_eq!(correct.word_id, pool[3].id);
        assert!(options
            .iter()
            .filter(|o| !o.is_correct)
            .all(|o| o.word_id != pool[3].id));
    }

    #[test]
    fn test_small_pool_gives_fewer_options() {
        let pool = words(2);
        let mut rng = StdRng::seed_from_u64(1);

        let options = generate_options(&pool[0], &pool, 4, &mut rng);
        assert_eq!(options.len(), 2);

        let alone = generate_options(&pool[0], &pool[..1], 4, &mut rng);
        assert_eq!(alone.len(), 1);
        assert!(alone[0].is_correct);
    }

    #[test]
    fn test_answer_policy() {
        let policy = AnswerPolicy::default();
        assert_eq!(policy.quality_for(true), Quality::PERFECT);
        assert_eq!(policy.quality_for(false), Quality::WRONG);
    }
}
