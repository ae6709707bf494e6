//! # App Data Coordinator
//!
//! Top-level aggregator: owns the settings slice of the store and assembles
//! the other two managers' state into one portable document. It never
//! mutates progress or vocabulary directly — restoring state goes through
//! the owning manager (or, for progress, a wholesale blob replace followed
//! by a reload). Pure request/response; no intermediate states.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;
use crate::model::{
    AppData, AppSettings, BackupEntry, BackupFrequency, Category, Difficulty, StorageUsage, Theme,
};
use crate::progress::ProgressTracker;
use crate::store::{keys, KeyValueStore};
use crate::vocabulary::{CustomVocabularyStore, WordDraft};

/// Version stamp written into every exported document.
pub const APP_DATA_VERSION: &str = "1.0.0";

/// Assumed store capacity for usage estimation (5 MiB, the usual
/// browser-local-storage budget the original design was sized against).
pub const ASSUMED_CAPACITY_BYTES: usize = 5 * 1024 * 1024;

const BACKUP_HISTORY_CAP: usize = 10;

/// Typed partial settings update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub auto_save: Option<bool>,
    pub backup_frequency: Option<BackupFrequency>,
    pub sound_enabled: Option<bool>,
    pub speech_rate: Option<f64>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
}

impl SettingsUpdate {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            auto_save: Some(settings.auto_save),
            backup_frequency: Some(settings.backup_frequency),
            sound_enabled: Some(settings.sound_enabled),
            speech_rate: Some(settings.speech_rate),
            theme: Some(settings.theme),
            notifications: Some(settings.notifications),
        }
    }
}

/// Short user-facing outcome for import/clear operations. Never fatal.
#[derive(Debug, Clone)]
pub struct DataOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct BackupOutcome {
    pub success: bool,
    pub message: String,
    pub data: Option<String>,
}

/// Lenient shape for custom words arriving in a full-data import. Unknown
/// fields (old ids, timestamps) are ignored; the words are re-added through
/// the vocabulary store and get fresh identity.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PortableWord {
    word: String,
    definition: String,
    example_sentence: String,
    blank_position: usize,
    difficulty: Option<Difficulty>,
    category: Option<Category>,
    part_of_speech: String,
    notes: Option<String>,
}

pub struct AppDataCoordinator {
    settings: AppSettings,
}

impl AppDataCoordinator {
    /// Load persisted settings, falling back to defaults when absent or
    /// unreadable.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let settings = store
            .read(keys::SETTINGS)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();
        Self { settings }
    }

    pub fn save_settings<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        let blob = serde_json::to_string(&self.settings)?;
        store.write(keys::SETTINGS, &blob)
    }

    pub fn settings(&self) -> AppSettings {
        self.settings.clone()
    }

    /// Merge the given fields, persist, and return the updated snapshot.
    /// The caller owns the autosave timer and should reconfigure it when
    /// `auto_save` changed.
    pub fn update_settings<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        update: SettingsUpdate,
    ) -> Result<AppSettings> {
        if let Some(value) = update.auto_save {
            self.settings.auto_save = value;
        }
        if let Some(value) = update.backup_frequency {
            self.settings.backup_frequency = value;
        }
        if let Some(value) = update.sound_enabled {
            self.settings.sound_enabled = value;
        }
        if let Some(value) = update.speech_rate {
            self.settings.speech_rate = value;
        }
        if let Some(value) = update.theme {
            self.settings.theme = value;
        }
        if let Some(value) = update.notifications {
            self.settings.notifications = value;
        }
        self.save_settings(store)?;
        Ok(self.settings.clone())
    }

    /// Assemble the complete portable snapshot as pretty-printed JSON.
    pub fn export_all(
        &self,
        progress: &ProgressTracker,
        vocab: &CustomVocabularyStore,
    ) -> Result<String> {
        let data = AppData {
            progress: progress.progress(),
            custom_words: vocab.words(),
            settings: self.settings.clone(),
            last_backup: Utc::now(),
            version: APP_DATA_VERSION.to_string(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Restore all three managers from a portable snapshot.
    ///
    /// Progress is replaced wholesale (direct store write, then a tracker
    /// reload). Custom words are cleared and re-added one by one, so they
    /// get new ids and creation timestamps. Settings are merged.
    pub fn import_all<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        progress: &mut ProgressTracker,
        vocab: &mut CustomVocabularyStore,
        data: &str,
    ) -> DataOutcome {
        let parsed: serde_json::Value = match serde_json::from_str(data) {
            Ok(value) => value,
            Err(e) => {
                return DataOutcome {
                    success: false,
                    message: format!("Failed to import data: {}", e),
                }
            }
        };

        let (Some(progress_blob), Some(custom_words), Some(settings)) = (
            parsed.get("progress"),
            parsed.get("customWords").and_then(|v| v.as_array()),
            parsed.get("settings"),
        ) else {
            return DataOutcome {
                success: false,
                message: "Invalid data format".to_string(),
            };
        };

        match self.restore(
            store,
            progress,
            vocab,
            progress_blob,
            custom_words,
            settings,
        ) {
            Ok(()) => {
                let message = match parsed
                    .get("lastBackup")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse::<DateTime<Utc>>().ok())
                {
                    Some(backed_up) => format!(
                        "Successfully imported data from {}",
                        backed_up.format("%Y-%m-%d")
                    ),
                    None => "Successfully imported data".to_string(),
                };
                DataOutcome {
                    success: true,
                    message,
                }
            }
            Err(e) => DataOutcome {
                success: false,
                message: format!("Failed to import data: {}", e),
            },
        }
    }

    fn restore<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        progress: &mut ProgressTracker,
        vocab: &mut CustomVocabularyStore,
        progress_blob: &serde_json::Value,
        custom_words: &[serde_json::Value],
        settings: &serde_json::Value,
    ) -> Result<()> {
        // Full replace, bypassing the tracker's incremental API.
        store.write(keys::PROGRESS, &serde_json::to_string(progress_blob)?)?;
        *progress = ProgressTracker::load(store);

        vocab.clear_all(store)?;
        for entry in custom_words {
            let Ok(word) = serde_json::from_value::<PortableWord>(entry.clone()) else {
                continue;
            };
            vocab.add_word(
                store,
                WordDraft {
                    word: word.word,
                    definition: word.definition,
                    example_sentence: word.example_sentence,
                    blank_position: word.blank_position,
                    difficulty: word.difficulty.unwrap_or(Difficulty::Intermediate),
                    category: word.category.unwrap_or(Category::Daily),
                    part_of_speech: if word.part_of_speech.is_empty() {
                        "noun".to_string()
                    } else {
                        word.part_of_speech
                    },
                    notes: word.notes,
                },
            )?;
        }

        let incoming: AppSettings =
            serde_json::from_value(settings.clone()).unwrap_or_default();
        self.update_settings(store, SettingsUpdate::from_settings(&incoming))?;
        Ok(())
    }

    /// Export everything and record a `{timestamp, size}` entry at the front
    /// of the capped history.
    pub fn create_backup<S: KeyValueStore>(
        &self,
        store: &mut S,
        progress: &ProgressTracker,
        vocab: &CustomVocabularyStore,
    ) -> BackupOutcome {
        let result = (|| -> Result<String> {
            let data = self.export_all(progress, vocab)?;

            let mut history = Self::backup_history(store);
            history.insert(
                0,
                BackupEntry {
                    timestamp: Utc::now(),
                    size: data.len(),
                },
            );
            history.truncate(BACKUP_HISTORY_CAP);
            store.write(keys::BACKUP_HISTORY, &serde_json::to_string(&history)?)?;

            Ok(data)
        })();

        match result {
            Ok(data) => BackupOutcome {
                success: true,
                message: "Backup created successfully".to_string(),
                data: Some(data),
            },
            Err(e) => BackupOutcome {
                success: false,
                message: format!("Failed to create backup: {}", e),
                data: None,
            },
        }
    }

    /// Backup history entries, most recent first. Absent or unreadable
    /// history reads as empty.
    pub fn backup_history<S: KeyValueStore>(store: &S) -> Vec<BackupEntry> {
        store
            .read(keys::BACKUP_HISTORY)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default()
    }

    /// Erase every persisted key and reset all managers to defaults.
    pub fn clear_all_data<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        progress: &mut ProgressTracker,
        vocab: &mut CustomVocabularyStore,
    ) -> DataOutcome {
        let result = (|| -> Result<()> {
            for key in keys::ALL {
                store.remove(key)?;
            }
            progress.reset(store)?;
            vocab.clear_all(store)?;
            self.settings = AppSettings::default();
            self.save_settings(store)
        })();

        match result {
            Ok(()) => DataOutcome {
                success: true,
                message: "All data cleared successfully".to_string(),
            },
            Err(e) => DataOutcome {
                success: false,
                message: format!("Failed to clear data: {}", e),
            },
        }
    }

    /// Rough storage footprint: key + value lengths summed over every
    /// persisted entry, against the assumed fixed capacity.
    pub fn storage_usage<S: KeyValueStore>(store: &S) -> StorageUsage {
        let used = store
            .entries()
            .unwrap_or_default()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum();
        StorageUsage {
            used,
            available: ASSUMED_CAPACITY_BYTES,
            percentage: used as f64 / ASSUMED_CAPACITY_BYTES as f64 * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::QuizResult;
    use crate::store::memory::InMemoryStore;
    use crate::vocabulary::WordDraft;

    fn managers(store: &InMemoryStore) -> (ProgressTracker, CustomVocabularyStore, AppDataCoordinator) {
        (
            ProgressTracker::load(store),
            CustomVocabularyStore::load(store),
            AppDataCoordinator::load(store),
        )
    }

    fn answer(word_id: &str, is_correct: bool) -> QuizResult {
        QuizResult {
            word_id: word_id.to_string(),
            is_correct,
            user_answer: String::new(),
            correct_answer: String::new(),
            timestamp: Utc::now(),
            time_taken: 1.0,
        }
    }

    fn draft(word: &str) -> WordDraft {
        WordDraft {
            word: word.to_string(),
            definition: "def".to_string(),
            example_sentence: "An example sentence.".to_string(),
            blank_position: 1,
            difficulty: Difficulty::Advanced,
            category: Category::Academic,
            part_of_speech: "noun".to_string(),
            notes: Some("remember this one".to_string()),
        }
    }

    #[test]
    fn update_settings_merges_and_persists() {
        let mut store = InMemoryStore::new();
        let (_, _, mut coordinator) = managers(&store);

        let updated = coordinator
            .update_settings(
                &mut store,
                SettingsUpdate {
                    theme: Some(Theme::Dark),
                    auto_save: Some(false),
                    ..SettingsUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.theme, Theme::Dark);
        assert!(!updated.auto_save);
        // Untouched fields keep their defaults.
        assert_eq!(updated.speech_rate, 0.8);

        let reloaded = AppDataCoordinator::load(&store);
        assert_eq!(reloaded.settings(), updated);
    }

    #[test]
    fn export_then_import_reproduces_progress_and_settings() {
        let mut store = InMemoryStore::new();
        let (mut progress, mut vocab, mut coordinator) = managers(&store);
        let word = catalog::word_by_id("1").unwrap();

        progress
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();
        progress
            .record_quiz_result(&mut store, &answer("2", false), word)
            .unwrap();
        let original = vocab.add_word(&mut store, draft("ledger")).unwrap();
        coordinator
            .update_settings(
                &mut store,
                SettingsUpdate {
                    theme: Some(Theme::Light),
                    ..SettingsUpdate::default()
                },
            )
            .unwrap();

        let document = coordinator.export_all(&progress, &vocab).unwrap();

        // Fresh manager set over a fresh store.
        let mut new_store = InMemoryStore::new();
        let (mut new_progress, mut new_vocab, mut new_coordinator) = managers(&new_store);
        let outcome = new_coordinator.import_all(
            &mut new_store,
            &mut new_progress,
            &mut new_vocab,
            &document,
        );
        assert!(outcome.success, "{}", outcome.message);

        let restored = new_progress.progress();
        assert_eq!(restored.total_words_studied, 2);
        assert_eq!(restored.correct_answers, 1);
        assert!(new_progress.is_weak("2"));
        assert!(new_progress.is_mastered("1"));
        assert_eq!(new_coordinator.settings().theme, Theme::Light);

        // Word content survives; identity does not.
        let words = new_vocab.words();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "ledger");
        assert_eq!(words[0].category, Category::Academic);
        assert_eq!(words[0].notes.as_deref(), Some("remember this one"));
        assert_ne!(words[0].id, original.id);
    }

    #[test]
    fn import_rejects_documents_missing_sections() {
        let mut store = InMemoryStore::new();
        let (mut progress, mut vocab, mut coordinator) = managers(&store);

        let outcome =
            coordinator.import_all(&mut store, &mut progress, &mut vocab, r#"{"progress":{}}"#);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Invalid data format");

        let outcome = coordinator.import_all(&mut store, &mut progress, &mut vocab, "not json");
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Failed to import data"));
    }

    #[test]
    fn import_replaces_existing_custom_words() {
        let mut store = InMemoryStore::new();
        let (mut progress, mut vocab, mut coordinator) = managers(&store);
        vocab.add_word(&mut store, draft("stale")).unwrap();

        let document = r#"{
            "progress": {},
            "customWords": [{"word":"fresh","definition":"d","exampleSentence":"s"}],
            "settings": {}
        }"#;
        let outcome = coordinator.import_all(&mut store, &mut progress, &mut vocab, document);
        assert!(outcome.success);

        let words = vocab.words();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "fresh");
        assert_eq!(words[0].difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn backup_records_capped_newest_first_history() {
        let mut store = InMemoryStore::new();
        let (progress, vocab, coordinator) = managers(&store);

        for _ in 0..12 {
            let outcome = coordinator.create_backup(&mut store, &progress, &vocab);
            assert!(outcome.success);
            assert!(outcome.data.is_some());
        }

        let history = AppDataCoordinator::backup_history(&store);
        assert_eq!(history.len(), 10);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn clear_all_data_resets_everything() {
        let mut store = InMemoryStore::new();
        let (mut progress, mut vocab, mut coordinator) = managers(&store);
        let word = catalog::word_by_id("1").unwrap();
        progress
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();
        vocab.add_word(&mut store, draft("ledger")).unwrap();
        coordinator
            .update_settings(
                &mut store,
                SettingsUpdate {
                    theme: Some(Theme::Dark),
                    ..SettingsUpdate::default()
                },
            )
            .unwrap();
        coordinator.create_backup(&mut store, &progress, &vocab);

        let outcome = coordinator.clear_all_data(&mut store, &mut progress, &mut vocab);
        assert!(outcome.success);

        assert_eq!(progress.progress().total_words_studied, 0);
        assert!(vocab.words().is_empty());
        assert_eq!(coordinator.settings(), AppSettings::default());
        assert!(AppDataCoordinator::backup_history(&store).is_empty());
    }

    #[test]
    fn storage_usage_grows_monotonically() {
        let mut store = InMemoryStore::new();
        let (mut progress, mut vocab, _) = managers(&store);
        let word = catalog::word_by_id("1").unwrap();

        let mut last = AppDataCoordinator::storage_usage(&store).percentage;
        for i in 0..4 {
            progress
                .record_quiz_result(&mut store, &answer("1", true), word)
                .unwrap();
            vocab
                .add_word(&mut store, draft(&format!("word{}", i)))
                .unwrap();

            let usage = AppDataCoordinator::storage_usage(&store);
            assert!(usage.percentage >= last);
            assert_eq!(usage.available, ASSUMED_CAPACITY_BYTES);
            last = usage.percentage;
        }
        assert!(last > 0.0);
    }
}
