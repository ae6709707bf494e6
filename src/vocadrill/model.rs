use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token used when rendering a fill-in-the-blank sentence.
pub const BLANK_TOKEN: &str = "_____";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Travel,
    Daily,
    Academic,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Business,
        Category::Travel,
        Category::Daily,
        Category::Academic,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Business => write!(f, "business"),
            Category::Travel => write!(f, "travel"),
            Category::Daily => write!(f, "daily"),
            Category::Academic => write!(f, "academic"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "business" => Ok(Category::Business),
            "travel" => Ok(Category::Travel),
            "daily" => Ok(Category::Daily),
            "academic" => Ok(Category::Academic),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// A catalog-defined word. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub example_sentence: String,
    /// Zero-based token index of the word within the example sentence.
    pub blank_position: usize,
    pub difficulty: Difficulty,
    pub category: Category,
    pub part_of_speech: String,
}

impl VocabularyWord {
    /// Renders the example sentence with the target token blanked out.
    /// An out-of-range blank position leaves the sentence untouched.
    pub fn blanked_example(&self) -> String {
        let mut tokens: Vec<&str> = self.example_sentence.split_whitespace().collect();
        if let Some(slot) = tokens.get_mut(self.blank_position) {
            *slot = BLANK_TOKEN;
        }
        tokens.join(" ")
    }
}

/// A user-authored word. Same shape as [`VocabularyWord`] plus authorship
/// metadata; ids are generated at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWord {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub example_sentence: String,
    pub blank_position: usize,
    pub difficulty: Difficulty,
    pub category: Category,
    pub part_of_speech: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CustomWord {
    pub fn as_vocabulary_word(&self) -> VocabularyWord {
        VocabularyWord {
            id: self.id.clone(),
            word: self.word.clone(),
            definition: self.definition.clone(),
            example_sentence: self.example_sentence.clone(),
            blank_position: self.blank_position,
            difficulty: self.difficulty,
            category: self.category,
            part_of_speech: self.part_of_speech.clone(),
        }
    }
}

/// One answered quiz question. Never persisted standalone; folded into
/// [`UserProgress`] by the progress tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub word_id: String,
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds spent on the question.
    pub time_taken: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub business: u32,
    pub travel: u32,
    pub daily: u32,
    pub academic: u32,
}

impl CategoryTally {
    pub fn increment(&mut self, category: Category) {
        match category {
            Category::Business => self.business += 1,
            Category::Travel => self.travel += 1,
            Category::Daily => self.daily += 1,
            Category::Academic => self.academic += 1,
        }
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Business => self.business,
            Category::Travel => self.travel,
            Category::Daily => self.daily,
            Category::Academic => self.academic,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTally {
    pub beginner: u32,
    pub intermediate: u32,
    pub advanced: u32,
}

impl DifficultyTally {
    pub fn increment(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Beginner => self.beginner += 1,
            Difficulty::Intermediate => self.intermediate += 1,
            Difficulty::Advanced => self.advanced += 1,
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

/// Aggregate learning state for this installation. Single row; the `user_id`
/// field is kept for wire compatibility but there is no multi-user dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: String,
    pub total_words_studied: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub streak_days: u32,
    pub last_study_date: DateTime<Utc>,
    /// Word ids most recently answered incorrectly. No duplicates.
    pub weak_words: Vec<String>,
    /// Word ids answered correctly at least once. Not mutually exclusive
    /// with `weak_words`: a later wrong answer never clears mastery.
    pub mastered_words: Vec<String>,
    pub category_progress: CategoryTally,
    pub difficulty_progress: DifficultyTally,
}

impl UserProgress {
    pub fn new() -> Self {
        Self {
            user_id: "default".to_string(),
            total_words_studied: 0,
            correct_answers: 0,
            incorrect_answers: 0,
            streak_days: 0,
            last_study_date: Utc::now(),
            weak_words: Vec::new(),
            mastered_words: Vec::new(),
            category_progress: CategoryTally::default(),
            difficulty_progress: DifficultyTally::default(),
        }
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupFrequency::Daily => write!(f, "daily"),
            BackupFrequency::Weekly => write!(f, "weekly"),
            BackupFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for BackupFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(BackupFrequency::Daily),
            "weekly" => Ok(BackupFrequency::Weekly),
            "monthly" => Ok(BackupFrequency::Monthly),
            other => Err(format!("Unknown backup frequency: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::System => write!(f, "system"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Application preferences. `backup_frequency` is advisory only; nothing
/// schedules backups from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub auto_save: bool,
    pub backup_frequency: BackupFrequency,
    pub sound_enabled: bool,
    pub speech_rate: f64,
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            backup_frequency: BackupFrequency::Weekly,
            sound_enabled: true,
            speech_rate: 0.8,
            theme: Theme::System,
            notifications: true,
        }
    }
}

/// The complete portable snapshot of the application: what `export_all`
/// produces and `import_all` consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub progress: UserProgress,
    pub custom_words: Vec<CustomWord>,
    pub settings: AppSettings,
    pub last_backup: DateTime<Utc>,
    pub version: String,
}

/// One line of the capped backup history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    pub timestamp: DateTime<Utc>,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageUsage {
    /// Sum of key + value lengths over all persisted entries, in bytes.
    pub used: usize,
    /// Assumed capacity; an estimate, not a platform quota query.
    pub available: usize,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_word() -> VocabularyWord {
        VocabularyWord {
            id: "1".into(),
            word: "accomplish".into(),
            definition: "to complete or achieve something successfully".into(),
            example_sentence: "We need to accomplish this project by the end of the month.".into(),
            blank_position: 3,
            difficulty: Difficulty::Intermediate,
            category: Category::Business,
            part_of_speech: "verb".into(),
        }
    }

    #[test]
    fn blanks_the_target_token() {
        let word = sample_word();
        assert_eq!(
            word.blanked_example(),
            "We need to _____ this project by the end of the month."
        );
    }

    #[test]
    fn out_of_range_blank_position_is_a_noop() {
        let mut word = sample_word();
        word.blank_position = 99;
        assert_eq!(word.blanked_example(), word.example_sentence);
    }

    #[test]
    fn progress_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&UserProgress::new()).unwrap();
        assert!(json.contains("\"totalWordsStudied\""));
        assert!(json.contains("\"lastStudyDate\""));
        assert!(json.contains("\"categoryProgress\""));
    }

    #[test]
    fn settings_default_when_fields_absent() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(settings.auto_save);
        assert_eq!(settings.backup_frequency, BackupFrequency::Weekly);
        assert_eq!(settings.speech_rate, 0.8);
    }

    #[test]
    fn difficulty_round_trips_through_lowercase() {
        let json = serde_json::to_string(&Difficulty::Advanced).unwrap();
        assert_eq!(json, "\"advanced\"");
        assert_eq!("advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn custom_word_omits_absent_notes() {
        let word = CustomWord {
            id: "custom_1".into(),
            word: "ledger".into(),
            definition: "a book of accounts".into(),
            example_sentence: "She checked the ledger twice.".into(),
            blank_position: 3,
            difficulty: Difficulty::Beginner,
            category: Category::Business,
            part_of_speech: "noun".into(),
            is_custom: true,
            created_at: Utc::now(),
            created_by: "user".into(),
            notes: None,
        };
        let json = serde_json::to_string(&word).unwrap();
        assert!(!json.contains("notes"));
        assert!(json.contains("\"isCustom\":true"));
    }
}
