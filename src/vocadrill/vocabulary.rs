//! # Custom Vocabulary Store
//!
//! Owns the user-authored word list: CRUD, read-only filters, search, and
//! the vocabulary-only JSON import/export format (a bare array of word
//! objects). Insertion order is preserved for display; it carries no other
//! meaning.

use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Category, CustomWord, Difficulty};
use crate::store::{keys, KeyValueStore};

/// Input for [`CustomVocabularyStore::add_word`]. Id, `is_custom`,
/// `created_at`, and `created_by` are assigned by the store.
#[derive(Debug, Clone)]
pub struct WordDraft {
    pub word: String,
    pub definition: String,
    pub example_sentence: String,
    pub blank_position: usize,
    pub difficulty: Difficulty,
    pub category: Category,
    pub part_of_speech: String,
    pub notes: Option<String>,
}

/// Typed partial update for [`CustomVocabularyStore::update_word`]. `None`
/// fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct WordUpdate {
    pub word: Option<String>,
    pub definition: Option<String>,
    pub example_sentence: Option<String>,
    pub blank_position: Option<usize>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub part_of_speech: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of a vocabulary-only import. Per-entry best-effort: `errors`
/// lists the rejected entries, `success` is true iff at least one entry
/// made it in.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub success: bool,
    pub imported: usize,
    pub errors: Vec<String>,
}

pub struct CustomVocabularyStore {
    words: Vec<CustomWord>,
}

// Generated ids are time-based with a random suffix. Uniqueness is
// probabilistic; collisions are treated as negligible.
fn generate_word_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("custom_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

impl CustomVocabularyStore {
    /// Load the persisted word list, falling back to empty when the blob is
    /// absent or unreadable.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let words = store
            .read(keys::CUSTOM_VOCABULARY)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();
        Self { words }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        let blob = serde_json::to_string(&self.words)?;
        store.write(keys::CUSTOM_VOCABULARY, &blob)
    }

    /// Append a new word and persist. The created record is returned; the
    /// in-memory list keeps it even when the write fails.
    pub fn add_word<S: KeyValueStore>(&mut self, store: &mut S, draft: WordDraft) -> Result<CustomWord> {
        let word = CustomWord {
            id: generate_word_id(),
            word: draft.word,
            definition: draft.definition,
            example_sentence: draft.example_sentence,
            blank_position: draft.blank_position,
            difficulty: draft.difficulty,
            category: draft.category,
            part_of_speech: draft.part_of_speech,
            is_custom: true,
            created_at: Utc::now(),
            created_by: "user".to_string(),
            notes: draft.notes,
        };
        self.words.push(word.clone());
        self.save(store)?;
        Ok(word)
    }

    /// Merge the given fields into the matching record. Returns false when
    /// the id is unknown.
    pub fn update_word<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        id: &str,
        updates: WordUpdate,
    ) -> Result<bool> {
        let Some(word) = self.words.iter_mut().find(|w| w.id == id) else {
            return Ok(false);
        };

        if let Some(value) = updates.word {
            word.word = value;
        }
        if let Some(value) = updates.definition {
            word.definition = value;
        }
        if let Some(value) = updates.example_sentence {
            word.example_sentence = value;
        }
        if let Some(value) = updates.blank_position {
            word.blank_position = value;
        }
        if let Some(value) = updates.difficulty {
            word.difficulty = value;
        }
        if let Some(value) = updates.category {
            word.category = value;
        }
        if let Some(value) = updates.part_of_speech {
            word.part_of_speech = value;
        }
        if let Some(value) = updates.notes {
            word.notes = Some(value);
        }

        self.save(store)?;
        Ok(true)
    }

    /// Remove the matching record. Returns false when the id is unknown.
    pub fn delete_word<S: KeyValueStore>(&mut self, store: &mut S, id: &str) -> Result<bool> {
        let before = self.words.len();
        self.words.retain(|w| w.id != id);
        if self.words.len() == before {
            return Ok(false);
        }
        self.save(store)?;
        Ok(true)
    }

    /// Defensive copy, insertion order preserved.
    pub fn words(&self) -> Vec<CustomWord> {
        self.words.clone()
    }

    pub fn word_by_id(&self, id: &str) -> Option<&CustomWord> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn words_by_category(&self, category: Category) -> Vec<CustomWord> {
        self.words
            .iter()
            .filter(|w| w.category == category)
            .cloned()
            .collect()
    }

    pub fn words_by_difficulty(&self, difficulty: Difficulty) -> Vec<CustomWord> {
        self.words
            .iter()
            .filter(|w| w.difficulty == difficulty)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match against word, definition, and
    /// example sentence; a record matches if any of the three contain the
    /// query.
    pub fn search(&self, query: &str) -> Vec<CustomWord> {
        let query_lower = query.to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&query_lower)
                    || w.definition.to_lowercase().contains(&query_lower)
                    || w.example_sentence.to_lowercase().contains(&query_lower)
            })
            .cloned()
            .collect()
    }

    pub fn clear_all<S: KeyValueStore>(&mut self, store: &mut S) -> Result<()> {
        self.words.clear();
        self.save(store)
    }

    /// The full list as a pretty-printed JSON array.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.words)?)
    }

    /// Import a bare JSON array of word objects. Each entry needs at least
    /// `word`, `definition`, and `exampleSentence`; anything else falls back
    /// to defaults (blankPosition 0, intermediate, daily, noun).
    pub fn import_json<S: KeyValueStore>(&mut self, store: &mut S, data: &str) -> ImportReport {
        let parsed: serde_json::Value = match serde_json::from_str(data) {
            Ok(value) => value,
            Err(_) => {
                return ImportReport {
                    success: false,
                    imported: 0,
                    errors: vec!["Invalid JSON format".to_string()],
                }
            }
        };

        let Some(entries) = parsed.as_array() else {
            return ImportReport {
                success: false,
                imported: 0,
                errors: vec!["Invalid format: expected an array of words".to_string()],
            };
        };

        let mut imported = 0;
        let mut errors = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let word = non_empty_string(entry, "word");
            let definition = non_empty_string(entry, "definition");
            let example_sentence = non_empty_string(entry, "exampleSentence");

            let (Some(word), Some(definition), Some(example_sentence)) =
                (word, definition, example_sentence)
            else {
                errors.push(format!("Word {}: Missing required fields", index + 1));
                continue;
            };

            let draft = WordDraft {
                word,
                definition,
                example_sentence,
                blank_position: entry
                    .get("blankPosition")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0) as usize,
                difficulty: field_or_default(entry, "difficulty", Difficulty::Intermediate),
                category: field_or_default(entry, "category", Category::Daily),
                part_of_speech: non_empty_string(entry, "partOfSpeech")
                    .unwrap_or_else(|| "noun".to_string()),
                notes: non_empty_string(entry, "notes"),
            };

            match self.add_word(store, draft) {
                Ok(_) => imported += 1,
                Err(e) => errors.push(format!("Word {}: {}", index + 1, e)),
            }
        }

        ImportReport {
            success: imported > 0,
            imported,
            errors,
        }
    }
}

fn non_empty_string(entry: &serde_json::Value, field: &str) -> Option<String> {
    entry
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn field_or_default<T: serde::de::DeserializeOwned>(
    entry: &serde_json::Value,
    field: &str,
    default: T,
) -> T {
    entry
        .get(field)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or(default)
}
