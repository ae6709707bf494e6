use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vocadrill::model::{Category, Difficulty};

#[derive(Parser, Debug)]
#[command(name = "vocadrill")]
#[command(about = "Local-first vocabulary trainer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a fill-in-the-blank quiz session
    #[command(alias = "q")]
    Quiz {
        /// Number of questions to ask
        #[arg(short, long, default_value_t = 5)]
        count: usize,

        /// Only quiz words from this category
        #[arg(long)]
        category: Option<Category>,

        /// Only quiz words of this difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Only quiz words currently marked weak
        #[arg(long)]
        weak: bool,
    },

    /// Show learning statistics
    Stats,

    /// List the built-in word catalog
    Catalog {
        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        difficulty: Option<Difficulty>,
    },

    /// Add a custom word
    #[command(alias = "a")]
    Add {
        word: String,

        definition: String,

        /// Example sentence containing the word
        example: String,

        /// Zero-based index of the word within the example sentence
        #[arg(long, default_value_t = 0)]
        blank_position: usize,

        #[arg(long, default_value = "intermediate")]
        difficulty: Difficulty,

        #[arg(long, default_value = "daily")]
        category: Category,

        #[arg(long, default_value = "noun")]
        part_of_speech: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List custom words
    #[command(alias = "ls")]
    List {
        /// Filter by a search term (matches word, definition, example)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Update fields of a custom word
    Edit {
        /// Id of the word to update
        id: String,

        #[arg(long)]
        word: Option<String>,

        #[arg(long)]
        definition: Option<String>,

        #[arg(long)]
        example: Option<String>,

        #[arg(long)]
        blank_position: Option<usize>,

        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        part_of_speech: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a custom word
    #[command(alias = "rm")]
    Remove {
        /// Id of the word to remove
        id: String,
    },

    /// Export custom words as JSON
    ExportWords {
        /// Output file (stdout if omitted)
        output: Option<PathBuf>,
    },

    /// Import custom words from a JSON array file
    ImportWords { file: PathBuf },

    /// Export the complete application data (progress, words, settings)
    Export {
        /// Output file (stdout if omitted)
        output: Option<PathBuf>,
    },

    /// Import complete application data, replacing current state
    Import { file: PathBuf },

    /// Create a backup file and record it in the backup history
    Backup,

    /// Show the backup history
    Backups,

    /// Get or set settings
    Config {
        /// Setting key (auto-save, backup-frequency, sound, speech-rate,
        /// theme, notifications)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },

    /// Reset learning progress to zero
    ResetProgress,

    /// Erase all persisted data
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
