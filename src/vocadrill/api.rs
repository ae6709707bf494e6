//! # API Facade
//!
//! Single entry point for all vocadrill operations, regardless of the UI
//! driving them. The facade owns the store and the three managers
//! explicitly (no global singletons) and dispatches each call to the owning
//! manager, handing back an updated snapshot for the caller to render.
//!
//! Generic over [`KeyValueStore`]:
//! - Production: `VocaApi<FileStore>`
//! - Testing: `VocaApi<InMemoryStore>`
//!
//! State lives behind `Arc<Mutex<_>>` for one reason only: the auto-save
//! timer thread needs to reach it. Every operation is synchronous and
//! atomic from the caller's perspective. A poisoned lock is recovered via
//! `into_inner` — the timer's tick is an idempotent re-persist, so the
//! guarded state is never torn.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::autosave::{AutoSaveHandle, AUTO_SAVE_INTERVAL};
use crate::coordinator::{AppDataCoordinator, BackupOutcome, DataOutcome, SettingsUpdate};
use crate::error::Result;
use crate::model::{
    AppSettings, BackupEntry, Category, CustomWord, Difficulty, QuizResult, StorageUsage,
    UserProgress, VocabularyWord,
};
use crate::progress::ProgressTracker;
use crate::store::KeyValueStore;
use crate::vocabulary::{CustomVocabularyStore, ImportReport, WordDraft, WordUpdate};

struct AppState<S> {
    store: S,
    progress: ProgressTracker,
    vocab: CustomVocabularyStore,
    coordinator: AppDataCoordinator,
}

impl<S: KeyValueStore> AppState<S> {
    fn save_all(&mut self) -> Result<()> {
        let AppState {
            store,
            progress,
            vocab,
            coordinator,
        } = self;
        progress.save(store)?;
        vocab.save(store)?;
        coordinator.save_settings(store)
    }
}

/// The main API facade.
pub struct VocaApi<S: KeyValueStore + Send + 'static> {
    state: Arc<Mutex<AppState<S>>>,
    autosave: Option<AutoSaveHandle>,
    autosave_interval: Duration,
}

impl<S: KeyValueStore + Send + 'static> VocaApi<S> {
    /// Build the facade over a store, loading prior state (or defaults) and
    /// starting the auto-save timer if the loaded settings enable it.
    pub fn new(store: S) -> Self {
        Self::with_autosave_interval(store, AUTO_SAVE_INTERVAL)
    }

    /// Same as [`VocaApi::new`] with a custom auto-save interval. Mostly
    /// useful to embedding hosts and tests.
    pub fn with_autosave_interval(store: S, interval: Duration) -> Self {
        let progress = ProgressTracker::load(&store);
        let vocab = CustomVocabularyStore::load(&store);
        let coordinator = AppDataCoordinator::load(&store);

        let mut api = Self {
            state: Arc::new(Mutex::new(AppState {
                store,
                progress,
                vocab,
                coordinator,
            })),
            autosave: None,
            autosave_interval: interval,
        };
        api.reconfigure_auto_save();
        api
    }

    fn lock(&self) -> MutexGuard<'_, AppState<S>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Tear down any running timer, then start a fresh one if auto-save is
    /// enabled. Never leaves two timers running.
    fn reconfigure_auto_save(&mut self) {
        if let Some(mut handle) = self.autosave.take() {
            handle.stop();
        }

        let enabled = self.lock().coordinator.settings().auto_save;
        if enabled {
            let state = Arc::clone(&self.state);
            self.autosave = Some(AutoSaveHandle::start(self.autosave_interval, move || {
                let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                // Best-effort: a failed background save is retried on the
                // next tick anyway.
                let _ = state.save_all();
            }));
        }
    }

    /// Persist every manager's in-memory state right now.
    pub fn save_all(&self) -> Result<()> {
        self.lock().save_all()
    }

    // --- progress ---

    pub fn progress(&self) -> UserProgress {
        self.lock().progress.progress()
    }

    /// Fold a quiz answer into the progress record and return the updated
    /// snapshot.
    pub fn record_quiz_result(
        &mut self,
        result: &QuizResult,
        word: &VocabularyWord,
    ) -> Result<UserProgress> {
        let state = &mut *self.lock();
        state
            .progress
            .record_quiz_result(&mut state.store, result, word)?;
        Ok(state.progress.progress())
    }

    pub fn accuracy_rate(&self) -> f64 {
        self.lock().progress.accuracy_rate()
    }

    pub fn weak_words(&self) -> Vec<String> {
        self.lock().progress.weak_words()
    }

    pub fn mastered_words(&self) -> Vec<String> {
        self.lock().progress.mastered_words()
    }

    pub fn reset_progress(&mut self) -> Result<UserProgress> {
        let state = &mut *self.lock();
        state.progress.reset(&mut state.store)?;
        Ok(state.progress.progress())
    }

    // --- custom vocabulary ---

    pub fn custom_words(&self) -> Vec<CustomWord> {
        self.lock().vocab.words()
    }

    pub fn word_by_id(&self, id: &str) -> Option<CustomWord> {
        self.lock().vocab.word_by_id(id).cloned()
    }

    pub fn words_by_category(&self, category: Category) -> Vec<CustomWord> {
        self.lock().vocab.words_by_category(category)
    }

    pub fn words_by_difficulty(&self, difficulty: Difficulty) -> Vec<CustomWord> {
        self.lock().vocab.words_by_difficulty(difficulty)
    }

    pub fn search_words(&self, query: &str) -> Vec<CustomWord> {
        self.lock().vocab.search(query)
    }

    pub fn add_word(&mut self, draft: WordDraft) -> Result<CustomWord> {
        let state = &mut *self.lock();
        state.vocab.add_word(&mut state.store, draft)
    }

    pub fn update_word(&mut self, id: &str, updates: WordUpdate) -> Result<bool> {
        let state = &mut *self.lock();
        state.vocab.update_word(&mut state.store, id, updates)
    }

    pub fn delete_word(&mut self, id: &str) -> Result<bool> {
        let state = &mut *self.lock();
        state.vocab.delete_word(&mut state.store, id)
    }

    pub fn clear_words(&mut self) -> Result<()> {
        let state = &mut *self.lock();
        state.vocab.clear_all(&mut state.store)
    }

    pub fn export_words(&self) -> Result<String> {
        self.lock().vocab.export_json()
    }

    pub fn import_words(&mut self, data: &str) -> ImportReport {
        let state = &mut *self.lock();
        state.vocab.import_json(&mut state.store, data)
    }

    // --- settings & data management ---

    pub fn settings(&self) -> AppSettings {
        self.lock().coordinator.settings()
    }

    /// Merge a partial settings update. Reconfigures the auto-save timer
    /// when the `auto_save` flag changed.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<AppSettings> {
        let (before, updated) = {
            let state = &mut *self.lock();
            let before = state.coordinator.settings().auto_save;
            let updated = state.coordinator.update_settings(&mut state.store, update)?;
            (before, updated)
        };
        if updated.auto_save != before {
            self.reconfigure_auto_save();
        }
        Ok(updated)
    }

    pub fn export_all(&self) -> Result<String> {
        let state = &*self.lock();
        state.coordinator.export_all(&state.progress, &state.vocab)
    }

    pub fn import_all(&mut self, data: &str) -> DataOutcome {
        let (before, outcome, after) = {
            let state = &mut *self.lock();
            let before = state.coordinator.settings().auto_save;
            let AppState {
                store,
                progress,
                vocab,
                coordinator,
            } = state;
            let outcome = coordinator.import_all(store, progress, vocab, data);
            let after = coordinator.settings().auto_save;
            (before, outcome, after)
        };
        if after != before {
            self.reconfigure_auto_save();
        }
        outcome
    }

    pub fn create_backup(&mut self) -> BackupOutcome {
        let state = &mut *self.lock();
        let AppState {
            store,
            progress,
            vocab,
            coordinator,
        } = state;
        coordinator.create_backup(store, progress, vocab)
    }

    pub fn backup_history(&self) -> Vec<BackupEntry> {
        AppDataCoordinator::backup_history(&self.lock().store)
    }

    pub fn clear_all_data(&mut self) -> DataOutcome {
        let state = &mut *self.lock();
        let AppState {
            store,
            progress,
            vocab,
            coordinator,
        } = state;
        coordinator.clear_all_data(store, progress, vocab)
    }

    pub fn storage_usage(&self) -> StorageUsage {
        AppDataCoordinator::storage_usage(&self.lock().store)
    }
}
