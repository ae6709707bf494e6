//! The built-in vocabulary catalog: a fixed, read-only word list defined at
//! build time. Leaf component; custom words live in
//! [`crate::vocabulary::CustomVocabularyStore`] instead.

use crate::model::{Category, Difficulty, VocabularyWord};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

static CATALOG: Lazy<Vec<VocabularyWord>> = Lazy::new(|| {
    fn entry(
        id: &str,
        word: &str,
        definition: &str,
        example_sentence: &str,
        blank_position: usize,
        difficulty: Difficulty,
        category: Category,
        part_of_speech: &str,
    ) -> VocabularyWord {
        VocabularyWord {
            id: id.to_string(),
            word: word.to_string(),
            definition: definition.to_string(),
            example_sentence: example_sentence.to_string(),
            blank_position,
            difficulty,
            category,
            part_of_speech: part_of_speech.to_string(),
        }
    }

    vec![
        entry(
            "1",
            "accomplish",
            "to complete or achieve something successfully",
            "We need to accomplish this project by the end of the month.",
            3,
            Difficulty::Intermediate,
            Category::Business,
            "verb",
        ),
        entry(
            "2",
            "accommodate",
            "to provide space or facilities for someone or something",
            "The hotel can accommodate up to 200 guests.",
            4,
            Difficulty::Intermediate,
            Category::Travel,
            "verb",
        ),
        entry(
            "3",
            "acquire",
            "to obtain or get something",
            "The company plans to acquire new technology this year.",
            5,
            Difficulty::Advanced,
            Category::Business,
            "verb",
        ),
        entry(
            "4",
            "adequate",
            "sufficient or satisfactory",
            "We need adequate funding for this research project.",
            2,
            Difficulty::Intermediate,
            Category::Academic,
            "adjective",
        ),
        entry(
            "5",
            "adjacent",
            "next to or adjoining something",
            "The parking lot is adjacent to the main building.",
            4,
            Difficulty::Advanced,
            Category::Daily,
            "adjective",
        ),
        entry(
            "6",
            "agenda",
            "a list of items to be discussed at a meeting",
            "Please review the agenda before tomorrow's meeting.",
            3,
            Difficulty::Intermediate,
            Category::Business,
            "noun",
        ),
        entry(
            "7",
            "allocate",
            "to distribute or assign resources",
            "We need to allocate more budget to marketing.",
            3,
            Difficulty::Advanced,
            Category::Business,
            "verb",
        ),
        entry(
            "8",
            "anticipate",
            "to expect or predict something",
            "We anticipate a 20% increase in sales next quarter.",
            1,
            Difficulty::Intermediate,
            Category::Business,
            "verb",
        ),
        entry(
            "9",
            "appreciate",
            "to recognize the value or significance of something",
            "I really appreciate your help with this project.",
            2,
            Difficulty::Beginner,
            Category::Daily,
            "verb",
        ),
        entry(
            "10",
            "appropriate",
            "suitable or proper for a particular situation",
            "Please wear appropriate attire for the business meeting.",
            2,
            Difficulty::Intermediate,
            Category::Business,
            "adjective",
        ),
    ]
});

/// The full catalog, in definition order.
pub fn words() -> &'static [VocabularyWord] {
    &CATALOG
}

pub fn word_by_id(id: &str) -> Option<&'static VocabularyWord> {
    CATALOG.iter().find(|word| word.id == id)
}

pub fn words_by_difficulty(difficulty: Difficulty) -> Vec<&'static VocabularyWord> {
    CATALOG
        .iter()
        .filter(|word| word.difficulty == difficulty)
        .collect()
}

pub fn words_by_category(category: Category) -> Vec<&'static VocabularyWord> {
    CATALOG
        .iter()
        .filter(|word| word.category == category)
        .collect()
}

/// Up to `count` catalog words in random order.
pub fn random_words(count: usize) -> Vec<VocabularyWord> {
    let mut shuffled: Vec<VocabularyWord> = CATALOG.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled.truncate(count);
    shuffled
}
