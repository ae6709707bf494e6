use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use rand::seq::SliceRandom;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use vocadrill::api::VocaApi;
use vocadrill::catalog;
use vocadrill::coordinator::SettingsUpdate;
use vocadrill::error::{Result, VocabError};
use vocadrill::model::{Category, CustomWord, Difficulty, QuizResult, VocabularyWord};
use vocadrill::store::fs::FileStore;
use vocadrill::vocabulary::{WordDraft, WordUpdate};

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut api = init_api()?;

    match cli.command {
        Some(Commands::Quiz {
            count,
            category,
            difficulty,
            weak,
        }) => handle_quiz(&mut api, count, category, difficulty, weak),
        Some(Commands::Stats) | None => handle_stats(&api),
        Some(Commands::Catalog {
            category,
            difficulty,
        }) => handle_catalog(category, difficulty),
        Some(Commands::Add {
            word,
            definition,
            example,
            blank_position,
            difficulty,
            category,
            part_of_speech,
            notes,
        }) => handle_add(
            &mut api,
            WordDraft {
                word,
                definition,
                example_sentence: example,
                blank_position,
                difficulty,
                category,
                part_of_speech,
                notes,
            },
        ),
        Some(Commands::List { search }) => handle_list(&api, search),
        Some(Commands::Edit {
            id,
            word,
            definition,
            example,
            blank_position,
            difficulty,
            category,
            part_of_speech,
            notes,
        }) => handle_edit(
            &mut api,
            &id,
            WordUpdate {
                word,
                definition,
                example_sentence: example,
                blank_position,
                difficulty,
                category,
                part_of_speech,
                notes,
            },
        ),
        Some(Commands::Remove { id }) => handle_remove(&mut api, &id),
        Some(Commands::ExportWords { output }) => handle_export_words(&api, output),
        Some(Commands::ImportWords { file }) => handle_import_words(&mut api, &file),
        Some(Commands::Export { output }) => handle_export(&api, output),
        Some(Commands::Import { file }) => handle_import(&mut api, &file),
        Some(Commands::Backup) => handle_backup(&mut api),
        Some(Commands::Backups) => handle_backups(&api),
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
        Some(Commands::ResetProgress) => handle_reset(&mut api),
        Some(Commands::Clear { yes }) => handle_clear(&mut api, yes),
    }
}

fn init_api() -> Result<VocaApi<FileStore>> {
    let data_dir = match std::env::var_os("VOCADRILL_HOME") {
        Some(home) => PathBuf::from(home),
        None => ProjectDirs::from("com", "vocadrill", "vocadrill")
            .ok_or_else(|| VocabError::Store("Could not determine data directory".to_string()))?
            .data_dir()
            .to_path_buf(),
    };
    Ok(VocaApi::new(FileStore::new(data_dir)))
}

/// Assemble the quiz pool from the catalog plus custom words, honoring the
/// requested filters.
fn quiz_pool(
    api: &VocaApi<FileStore>,
    category: Option<Category>,
    difficulty: Option<Difficulty>,
    weak_only: bool,
) -> Vec<VocabularyWord> {
    let weak_words = api.weak_words();

    let mut pool: Vec<VocabularyWord> = catalog::words().to_vec();
    pool.extend(api.custom_words().iter().map(CustomWord::as_vocabulary_word));

    pool.retain(|word| {
        category.map_or(true, |c| word.category == c)
            && difficulty.map_or(true, |d| word.difficulty == d)
            && (!weak_only || weak_words.contains(&word.id))
    });
    pool
}

fn handle_quiz(
    api: &mut VocaApi<FileStore>,
    count: usize,
    category: Option<Category>,
    difficulty: Option<Difficulty>,
    weak: bool,
) -> Result<()> {
    let mut pool = quiz_pool(api, category, difficulty, weak);
    if pool.is_empty() {
        if weak {
            println!("{}", "No weak words to practice. Nice work!".green());
        } else {
            println!("No words match those filters.");
        }
        return Ok(());
    }

    pool.shuffle(&mut rand::thread_rng());
    pool.truncate(count);

    let stdin = io::stdin();
    let mut answered = 0u32;
    let mut correct = 0u32;

    for (number, word) in pool.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            format!("Q{}.", number + 1).yellow(),
            word.blanked_example()
        );
        println!("    {} {}", "hint:".dimmed(), word.definition.dimmed());
        print!("    your answer: ");
        io::stdout().flush().map_err(VocabError::Io)?;

        let started = Instant::now();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(VocabError::Io)? == 0 {
            break; // EOF ends the session early
        }
        let given = line.trim().to_string();
        let is_correct = given.eq_ignore_ascii_case(&word.word);

        let result = QuizResult {
            word_id: word.id.clone(),
            is_correct,
            user_answer: given,
            correct_answer: word.word.clone(),
            timestamp: Utc::now(),
            time_taken: started.elapsed().as_secs_f64(),
        };
        api.record_quiz_result(&result, word)?;

        answered += 1;
        if is_correct {
            correct += 1;
            println!("    {}", "correct!".green());
        } else {
            println!("    {} the word was '{}'", "wrong!".red(), word.word);
        }
    }

    if answered > 0 {
        println!();
        println!(
            "Session: {}/{} correct. Overall accuracy: {:.1}%",
            correct,
            answered,
            api.accuracy_rate()
        );
    }
    Ok(())
}

fn handle_stats(api: &VocaApi<FileStore>) -> Result<()> {
    let progress = api.progress();

    println!("{}", "Learning statistics".bold());
    println!("  words studied:    {}", progress.total_words_studied);
    println!(
        "  answers:          {} correct / {} incorrect ({:.1}%)",
        progress.correct_answers,
        progress.incorrect_answers,
        api.accuracy_rate()
    );
    println!("  streak:           {} day(s)", progress.streak_days);
    println!(
        "  last studied:     {}",
        progress.last_study_date.format("%Y-%m-%d %H:%M")
    );
    println!(
        "  weak words:       {}",
        progress.weak_words.len().to_string().red()
    );
    println!(
        "  mastered words:   {}",
        progress.mastered_words.len().to_string().green()
    );

    println!("  by category:");
    for category in Category::ALL {
        println!(
            "    {:<10} {}",
            category.to_string(),
            progress.category_progress.get(category)
        );
    }
    println!("  by difficulty:");
    for difficulty in Difficulty::ALL {
        println!(
            "    {:<13} {}",
            difficulty.to_string(),
            progress.difficulty_progress.get(difficulty)
        );
    }

    let usage = api.storage_usage();
    println!(
        "  storage:          {} bytes ({:.2}% of assumed capacity)",
        usage.used, usage.percentage
    );
    Ok(())
}

fn handle_catalog(category: Option<Category>, difficulty: Option<Difficulty>) -> Result<()> {
    for word in catalog::words() {
        if category.is_some_and(|c| word.category != c) {
            continue;
        }
        if difficulty.is_some_and(|d| word.difficulty != d) {
            continue;
        }
        print_word_line(&word.id, &word.word, word.difficulty, word.category, &word.definition);
    }
    Ok(())
}

fn handle_add(api: &mut VocaApi<FileStore>, draft: WordDraft) -> Result<()> {
    let created = api.add_word(draft)?;
    println!(
        "{} '{}' ({})",
        "Added".green(),
        created.word,
        created.id.dimmed()
    );
    Ok(())
}

fn handle_list(api: &VocaApi<FileStore>, search: Option<String>) -> Result<()> {
    let words = match search {
        Some(term) => api.search_words(&term),
        None => api.custom_words(),
    };
    if words.is_empty() {
        println!("No custom words found.");
        return Ok(());
    }
    for word in &words {
        print_word_line(&word.id, &word.word, word.difficulty, word.category, &word.definition);
        if let Some(notes) = &word.notes {
            println!("      {}", notes.dimmed());
        }
    }
    Ok(())
}

fn print_word_line(
    id: &str,
    word: &str,
    difficulty: Difficulty,
    category: Category,
    definition: &str,
) {
    println!(
        "  {} {} [{}/{}] {}",
        id.dimmed(),
        word.bold(),
        difficulty,
        category,
        definition
    );
}

fn handle_edit(api: &mut VocaApi<FileStore>, id: &str, updates: WordUpdate) -> Result<()> {
    if api.update_word(id, updates)? {
        println!("{}", "Updated.".green());
    } else {
        println!("{}", format!("No custom word with id '{}'.", id).yellow());
    }
    Ok(())
}

fn handle_remove(api: &mut VocaApi<FileStore>, id: &str) -> Result<()> {
    if api.delete_word(id)? {
        println!("{}", "Removed.".green());
    } else {
        println!("{}", format!("No custom word with id '{}'.", id).yellow());
    }
    Ok(())
}

fn write_or_print(document: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, document).map_err(VocabError::Io)?;
            println!("{} {}", "Exported to".green(), path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

fn handle_export_words(api: &VocaApi<FileStore>, output: Option<PathBuf>) -> Result<()> {
    write_or_print(&api.export_words()?, output)
}

fn handle_import_words(api: &mut VocaApi<FileStore>, file: &PathBuf) -> Result<()> {
    let data = std::fs::read_to_string(file).map_err(VocabError::Io)?;
    let report = api.import_words(&data);

    for error in &report.errors {
        println!("{}", error.yellow());
    }
    if report.success {
        println!("{}", format!("Imported {} word(s).", report.imported).green());
    } else {
        println!("{}", "Nothing imported.".red());
    }
    Ok(())
}

fn handle_export(api: &VocaApi<FileStore>, output: Option<PathBuf>) -> Result<()> {
    write_or_print(&api.export_all()?, output)
}

fn handle_import(api: &mut VocaApi<FileStore>, file: &PathBuf) -> Result<()> {
    let data = std::fs::read_to_string(file).map_err(VocabError::Io)?;
    let outcome = api.import_all(&data);
    if outcome.success {
        println!("{}", outcome.message.green());
    } else {
        println!("{}", outcome.message.red());
    }
    Ok(())
}

fn handle_backup(api: &mut VocaApi<FileStore>) -> Result<()> {
    let outcome = api.create_backup();
    if !outcome.success {
        println!("{}", outcome.message.red());
        return Ok(());
    }

    let filename = format!("vocadrill-{}.json", Utc::now().format("%Y-%m-%d_%H-%M-%S"));
    if let Some(data) = &outcome.data {
        std::fs::write(&filename, data).map_err(VocabError::Io)?;
    }
    println!("{} ({})", outcome.message.green(), filename);
    Ok(())
}

fn handle_backups(api: &VocaApi<FileStore>) -> Result<()> {
    let history = api.backup_history();
    if history.is_empty() {
        println!("No backups recorded.");
        return Ok(());
    }
    for entry in &history {
        println!(
            "  {}  {} bytes",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.size
        );
    }
    Ok(())
}

fn handle_config(
    api: &mut VocaApi<FileStore>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let settings = api.settings();

    let Some(key) = key else {
        println!("auto-save        = {}", settings.auto_save);
        println!("backup-frequency = {}", settings.backup_frequency);
        println!("sound            = {}", settings.sound_enabled);
        println!("speech-rate      = {}", settings.speech_rate);
        println!("theme            = {}", settings.theme);
        println!("notifications    = {}", settings.notifications);
        return Ok(());
    };

    let Some(value) = value else {
        let current = match key.as_str() {
            "auto-save" => settings.auto_save.to_string(),
            "backup-frequency" => settings.backup_frequency.to_string(),
            "sound" => settings.sound_enabled.to_string(),
            "speech-rate" => settings.speech_rate.to_string(),
            "theme" => settings.theme.to_string(),
            "notifications" => settings.notifications.to_string(),
            other => {
                println!("Unknown config key: {}", other);
                return Ok(());
            }
        };
        println!("{} = {}", key, current);
        return Ok(());
    };

    let update = match key.as_str() {
        "auto-save" => SettingsUpdate {
            auto_save: Some(parse_bool(&value)?),
            ..SettingsUpdate::default()
        },
        "backup-frequency" => SettingsUpdate {
            backup_frequency: Some(value.parse().map_err(VocabError::Api)?),
            ..SettingsUpdate::default()
        },
        "sound" => SettingsUpdate {
            sound_enabled: Some(parse_bool(&value)?),
            ..SettingsUpdate::default()
        },
        "speech-rate" => SettingsUpdate {
            speech_rate: Some(
                value
                    .parse()
                    .map_err(|_| VocabError::Api(format!("Invalid speech rate: {}", value)))?,
            ),
            ..SettingsUpdate::default()
        },
        "theme" => SettingsUpdate {
            theme: Some(value.parse().map_err(VocabError::Api)?),
            ..SettingsUpdate::default()
        },
        "notifications" => SettingsUpdate {
            notifications: Some(parse_bool(&value)?),
            ..SettingsUpdate::default()
        },
        other => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    api.update_settings(update)?;
    println!("{}", "Settings updated.".green());
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(VocabError::Api(format!("Expected true/false, got '{}'", other))),
    }
}

fn handle_reset(api: &mut VocaApi<FileStore>) -> Result<()> {
    api.reset_progress()?;
    println!("{}", "Progress reset.".green());
    Ok(())
}

fn handle_clear(api: &mut VocaApi<FileStore>, yes: bool) -> Result<()> {
    if !yes {
        println!("This erases all progress, custom words, settings, and backup history.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    let outcome = api.clear_all_data();
    if outcome.success {
        println!("{}", outcome.message.green());
    } else {
        println!("{}", outcome.message.red());
    }
    Ok(())
}
