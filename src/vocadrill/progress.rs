//! # Progress Tracker
//!
//! Owns the per-word mastery state and aggregate quiz statistics. State is
//! loaded once from the store (silently falling back to zeroed defaults when
//! the blob is absent or corrupt) and persisted synchronously after every
//! mutation.
//!
//! Two membership rules worth calling out:
//! - A correct answer removes the word from the weak set and adds it to the
//!   mastered set.
//! - A wrong answer adds the word to the weak set but **never** removes it
//!   from the mastered set, so a word can be weak and mastered at the same
//!   time. Callers should treat the two sets as independent flags.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{QuizResult, UserProgress, VocabularyWord};
use crate::store::{keys, KeyValueStore};

pub struct ProgressTracker {
    progress: UserProgress,
}

impl ProgressTracker {
    /// Load prior progress from the store. Absent or unreadable state is
    /// treated as "no data yet", never as an error.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let progress = store
            .read(keys::PROGRESS)
            .ok()
            .flatten()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();
        Self { progress }
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        let blob = serde_json::to_string(&self.progress)?;
        store.write(keys::PROGRESS, &blob)
    }

    /// Defensive copy of the current state.
    pub fn progress(&self) -> UserProgress {
        self.progress.clone()
    }

    /// Fold one quiz answer into the progress record and persist.
    ///
    /// In-memory state is updated even when the write fails; persistence is
    /// best-effort.
    pub fn record_quiz_result<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        result: &QuizResult,
        word: &VocabularyWord,
    ) -> Result<()> {
        self.record_at(result, word, Utc::now());
        self.save(store)
    }

    fn record_at(&mut self, result: &QuizResult, word: &VocabularyWord, now: DateTime<Utc>) {
        let progress = &mut self.progress;
        progress.total_words_studied += 1;

        if result.is_correct {
            progress.correct_answers += 1;
            progress.weak_words.retain(|id| id != &result.word_id);
            if !progress.mastered_words.contains(&result.word_id) {
                progress.mastered_words.push(result.word_id.clone());
            }
        } else {
            progress.incorrect_answers += 1;
            if !progress.weak_words.contains(&result.word_id) {
                progress.weak_words.push(result.word_id.clone());
            }
        }

        // Category and difficulty tallies count every answer, right or wrong.
        progress.category_progress.increment(word.category);
        progress.difficulty_progress.increment(word.difficulty);

        // Streak: whole days since the last study activity. Same day leaves
        // the streak alone; the next day extends it; any longer gap restarts
        // it at 1.
        let days_elapsed = now
            .signed_duration_since(progress.last_study_date)
            .num_days();
        if days_elapsed == 1 {
            progress.streak_days += 1;
        } else if days_elapsed > 1 {
            progress.streak_days = 1;
        }
        progress.last_study_date = now;
    }

    /// Percentage of correct answers, 0 when nothing has been answered.
    pub fn accuracy_rate(&self) -> f64 {
        let total = self.progress.correct_answers + self.progress.incorrect_answers;
        if total == 0 {
            return 0.0;
        }
        f64::from(self.progress.correct_answers) / f64::from(total) * 100.0
    }

    pub fn weak_words(&self) -> Vec<String> {
        self.progress.weak_words.clone()
    }

    pub fn mastered_words(&self) -> Vec<String> {
        self.progress.mastered_words.clone()
    }

    pub fn is_weak(&self, word_id: &str) -> bool {
        self.progress.weak_words.iter().any(|id| id == word_id)
    }

    pub fn is_mastered(&self, word_id: &str) -> bool {
        self.progress.mastered_words.iter().any(|id| id == word_id)
    }

    /// Restore zeroed defaults and persist.
    pub fn reset<S: KeyValueStore>(&mut self, store: &mut S) -> Result<()> {
        self.progress = UserProgress::new();
        self.save(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{Category, Difficulty};
    use crate::store::memory::InMemoryStore;
    use chrono::Duration;

    fn answer(word_id: &str, is_correct: bool) -> QuizResult {
        QuizResult {
            word_id: word_id.to_string(),
            is_correct,
            user_answer: "whatever".into(),
            correct_answer: "whatever".into(),
            timestamp: Utc::now(),
            time_taken: 2.5,
        }
    }

    #[test]
    fn total_studied_counts_every_recorded_answer() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("1").unwrap();

        for i in 0..5 {
            tracker
                .record_quiz_result(&mut store, &answer("1", i % 2 == 0), word)
                .unwrap();
        }
        assert_eq!(tracker.progress().total_words_studied, 5);
    }

    #[test]
    fn correct_answer_clears_weak_and_sets_mastered() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("1").unwrap();

        tracker
            .record_quiz_result(&mut store, &answer("1", false), word)
            .unwrap();
        assert!(tracker.is_weak("1"));

        tracker
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();
        assert!(!tracker.is_weak("1"));
        assert!(tracker.is_mastered("1"));
    }

    #[test]
    fn wrong_answer_keeps_prior_mastery() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("2").unwrap();

        tracker
            .record_quiz_result(&mut store, &answer("2", true), word)
            .unwrap();
        tracker
            .record_quiz_result(&mut store, &answer("2", false), word)
            .unwrap();

        // Dual membership: weak AND still mastered.
        assert!(tracker.is_weak("2"));
        assert!(tracker.is_mastered("2"));
    }

    #[test]
    fn weak_and_mastered_sets_have_no_duplicates() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("3").unwrap();

        for _ in 0..3 {
            tracker
                .record_quiz_result(&mut store, &answer("3", false), word)
                .unwrap();
        }
        for _ in 0..3 {
            tracker
                .record_quiz_result(&mut store, &answer("3", true), word)
                .unwrap();
        }
        assert_eq!(tracker.weak_words().len(), 0);
        assert_eq!(tracker.mastered_words().len(), 1);
    }

    #[test]
    fn tallies_count_regardless_of_correctness() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("2").unwrap(); // travel / intermediate

        tracker
            .record_quiz_result(&mut store, &answer("2", true), word)
            .unwrap();
        tracker
            .record_quiz_result(&mut store, &answer("2", false), word)
            .unwrap();

        let progress = tracker.progress();
        assert_eq!(progress.category_progress.get(Category::Travel), 2);
        assert_eq!(progress.difficulty_progress.get(Difficulty::Intermediate), 2);
        assert_eq!(progress.category_progress.get(Category::Academic), 0);
    }

    #[test]
    fn accuracy_rate_edges() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("1").unwrap();

        assert_eq!(tracker.accuracy_rate(), 0.0);

        tracker
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();
        assert_eq!(tracker.accuracy_rate(), 100.0);

        tracker
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();
        tracker
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();
        tracker
            .record_quiz_result(&mut store, &answer("1", false), word)
            .unwrap();
        assert_eq!(tracker.accuracy_rate(), 75.0);
    }

    #[test]
    fn streak_same_day_unchanged_next_day_increments_gap_resets() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("1").unwrap();
        let day0 = Utc::now();

        tracker.record_at(&answer("1", true), word, day0);
        let base_streak = tracker.progress().streak_days;

        // Same calendar day: unchanged.
        tracker.record_at(&answer("1", true), word, day0 + Duration::hours(2));
        assert_eq!(tracker.progress().streak_days, base_streak);

        // Next day: +1.
        tracker.record_at(&answer("1", true), word, day0 + Duration::days(1) + Duration::hours(3));
        assert_eq!(tracker.progress().streak_days, base_streak + 1);

        // Skip two days: reset to 1.
        tracker.record_at(&answer("1", true), word, day0 + Duration::days(4));
        assert_eq!(tracker.progress().streak_days, 1);
    }

    #[test]
    fn corrupt_blob_falls_back_to_defaults() {
        let mut store = InMemoryStore::new();
        store.write(keys::PROGRESS, "not json at all").unwrap();

        let tracker = ProgressTracker::load(&store);
        assert_eq!(tracker.progress().total_words_studied, 0);
        assert!(tracker.weak_words().is_empty());
    }

    #[test]
    fn progress_survives_a_reload() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("4").unwrap();
        tracker
            .record_quiz_result(&mut store, &answer("4", false), word)
            .unwrap();

        let reloaded = ProgressTracker::load(&store);
        assert_eq!(reloaded.progress().total_words_studied, 1);
        assert!(reloaded.is_weak("4"));
    }

    #[test]
    fn reset_restores_zeroed_defaults() {
        let mut store = InMemoryStore::new();
        let mut tracker = ProgressTracker::load(&store);
        let word = catalog::word_by_id("1").unwrap();
        tracker
            .record_quiz_result(&mut store, &answer("1", true), word)
            .unwrap();

        tracker.reset(&mut store).unwrap();
        let progress = tracker.progress();
        assert_eq!(progress.total_words_studied, 0);
        assert_eq!(progress.streak_days, 0);
        assert!(progress.mastered_words.is_empty());

        let reloaded = ProgressTracker::load(&store);
        assert_eq!(reloaded.progress().total_words_studied, 0);
    }
}
