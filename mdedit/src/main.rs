//! mdedit - Markdown editor with live HTML preview
//!
//! A command-line front end over an editing session: render previews,
//! extract tables of contents, count words and edit documents with autosave.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(dead_code)]

mod cli;
mod document;
mod editor_config;
mod file_utils;
mod session;
mod stats;
mod theme;

// Markdown text processing
mod markdown;

// Autosave scheduling
mod autosave;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, Switch, ThemeChange};
use editor_config::EditorConfig;
use markdown::MarkdownOptions;
use session::{EditorSession, NullEvents, SessionEvents};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Duration;
use theme::ThemeKind;

/// Main entry point for the mdedit CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }

    let config = cli.config;

    match cli.command {
        Commands::Render {
            file,
            output,
            fragment,
            theme,
            no_target_blank,
            safe,
        } => {
            let options = RenderArgs {
                fragment,
                theme,
                no_target_blank,
                safe,
            };
            handle_render_command(config.as_deref(), &file, output.as_deref(), options)?;
        }

        Commands::Toc { file } => {
            let content = read_document(&file)?;
            let toc = markdown::extract_toc(&content);
            if !toc.is_empty() {
                println!("{}", toc);
            }
        }

        Commands::Headings { file } => {
            let content = read_document(&file)?;
            for heading in markdown::extract_headings(&content) {
                println!("{}\t{}\t{}", heading.level, heading.slug, heading.text);
            }
        }

        Commands::Count { file } => {
            let content = read_document(&file)?;
            let words = markdown::count_words(&content);
            println!("{} {}", words, pluralize(words, "word", "words"));
        }

        Commands::Stats { paths } => {
            handle_stats_command(&paths)?;
        }

        Commands::New { path, title, force } => {
            handle_new_command(&config_path(config)?, &path, title, force)?;
        }

        Commands::Edit { file, delay } => {
            handle_edit_command(&config_path(config)?, &file, delay)?;
        }

        Commands::Config { action } => {
            handle_config_command(&config_path(config)?, action)?;
        }
    }

    Ok(())
}

/// Options of the render command
struct RenderArgs {
    fragment: bool,
    theme: Option<ThemeKind>,
    no_target_blank: bool,
    safe: bool,
}

/// Handle the render command
fn handle_render_command(
    config_path: Option<&Path>,
    file: &Path,
    output: Option<&Path>,
    args: RenderArgs,
) -> Result<()> {
    let config = read_config(config_path)?;

    let mut session = EditorSession::from_config(&config, Box::new(NullEvents));
    session.set_autosave_enabled(false);
    if let Some(theme) = args.theme {
        session.set_theme(theme);
    }

    let mut options = MarkdownOptions::default();
    options.html.complete_page = !args.fragment;
    options.html.href_target_blank = !args.no_target_blank;
    options.html.escape_raw_html = args.safe;
    session.set_markdown_options(options);

    session
        .open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let html = session.preview();
    log::info!(
        "Rendered {} with the {} theme",
        file.display(),
        session.theme().current()
    );

    match output {
        Some(output) => {
            file_utils::write_file(output, &html)
                .with_context(|| format!("Failed to write HTML to {}", output.display()))?;
            println!("✓ Successfully wrote: {}", output.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}

/// Handle the stats command
fn handle_stats_command(paths: &[PathBuf]) -> Result<()> {
    let files = stats::discover_markdown_files(paths).context("Failed to scan for Markdown files")?;
    if files.is_empty() {
        println!("No Markdown files found");
        return Ok(());
    }

    let all_stats = stats::collect_stats(&files).context("Failed to read Markdown files")?;

    let mut total_words = 0;
    let mut total_headings = 0;
    for file_stats in &all_stats {
        println!(
            "{:>8} {:<5} {:>4} {:<8} {}",
            file_stats.words,
            pluralize(file_stats.words, "word", "words"),
            file_stats.headings,
            pluralize(file_stats.headings, "heading", "headings"),
            file_stats.path.display()
        );
        total_words += file_stats.words;
        total_headings += file_stats.headings;
    }

    println!(
        "{:>8} {:<5} {:>4} {:<8} total ({} files)",
        total_words,
        pluralize(total_words, "word", "words"),
        total_headings,
        pluralize(total_headings, "heading", "headings"),
        all_stats.len()
    );

    Ok(())
}

/// Handle the new command
fn handle_new_command(
    config_path: &Path,
    path: &Path,
    title: Option<String>,
    force: bool,
) -> Result<()> {
    let path = file_utils::ensure_extension(path);

    if path.exists() {
        if !force {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite it",
                path.display()
            );
        }
        let backup = file_utils::create_backup(&path)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        println!("Backed up existing file to {}", backup.display());
    }

    let mut config = EditorConfig::load_or_create(config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;

    let mut session = EditorSession::from_config(&config, Box::new(NullEvents));
    session.set_autosave_enabled(false);
    if let Some(title) = title {
        session.set_content(format!("# {}\n\n", title));
    }
    session
        .save_as(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    config.add_recent_file(&absolute(&path));
    config
        .save(config_path)
        .with_context(|| format!("Failed to save configuration {}", config_path.display()))?;

    println!("✓ Created {}", path.display());
    Ok(())
}

/// Session host that reports to the terminal
struct TerminalEvents;

impl SessionEvents for TerminalEvents {
    fn status(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn title_changed(&mut self, title: &str) {
        log::info!("{}", title);
    }
}

/// Handle the edit command
fn handle_edit_command(config_path: &Path, file: &Path, delay: Option<u64>) -> Result<()> {
    let mut config = EditorConfig::load_or_create(config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;

    let mut session = EditorSession::from_config(&config, Box::new(TerminalEvents));
    if let Some(seconds) = delay {
        session.set_autosave_delay(Duration::from_secs(seconds));
    }

    if file.exists() {
        session
            .open(file)
            .with_context(|| format!("Failed to open {}", file.display()))?;
    } else {
        session
            .save_as(file)
            .with_context(|| format!("Failed to create {}", file.display()))?;
    }

    let stdin = std::io::stdin();
    let mut edits = 0usize;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        session.append(&format!("{}\n", line));
        edits += 1;
    }
    log::info!("Applied {} edits", edits);

    // End of input is an explicit save when autosave will not do it
    if !session.autosave_enabled() && session.is_dirty() {
        session
            .save()
            .with_context(|| format!("Failed to save {}", file.display()))?;
    }

    let words = session.word_count();
    session
        .shutdown()
        .with_context(|| format!("Failed to save {}", file.display()))?;

    config.add_recent_file(&absolute(file));
    config
        .save(config_path)
        .with_context(|| format!("Failed to save configuration {}", config_path.display()))?;

    println!("{} {} in {}", words, pluralize(words, "word", "words"), file.display());
    Ok(())
}

/// Handle the config command
fn handle_config_command(config_path: &Path, action: ConfigAction) -> Result<()> {
    let mut config = EditorConfig::load_or_create(config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;

    match action {
        ConfigAction::Show => {
            println!("# {}", config_path.display());
            let content =
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
            print!("{}", content);
            return Ok(());
        }

        ConfigAction::Recent => {
            if config.recent_files.is_empty() {
                println!("No recent files");
            }
            for (i, path) in config.recent_files.iter().enumerate() {
                println!("{:>2}. {}", i + 1, path.display());
            }
            return Ok(());
        }

        ConfigAction::Theme { change } => {
            let current = ThemeKind::from_dark_mode(config.dark_mode);
            let next = match change {
                ThemeChange::Light => ThemeKind::Light,
                ThemeChange::Dark => ThemeKind::Dark,
                ThemeChange::Toggle => current.toggle(),
            };
            config.dark_mode = next == ThemeKind::Dark;
            println!("Theme: {}", next);
        }

        ConfigAction::Autosave { state, delay } => {
            config.autosave_enabled = state == Switch::On;
            if let Some(seconds) = delay {
                config.autosave_delay = seconds;
            }
            println!(
                "Autosave: {} ({}s delay)",
                if config.autosave_enabled { "on" } else { "off" },
                config.autosave_delay
            );
        }
    }

    config
        .save(config_path)
        .with_context(|| format!("Failed to save configuration {}", config_path.display()))?;

    Ok(())
}

/// Read a document for one of the read-only commands
fn read_document(file: &Path) -> Result<String> {
    file_utils::read_file(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Configuration file given on the command line, or the default location
fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => EditorConfig::default_path().context("Failed to locate the configuration file"),
    }
}

/// Load the configuration without creating it
///
/// Without a home directory the defaults apply.
fn read_config(explicit: Option<&Path>) -> Result<EditorConfig> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match EditorConfig::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}, using default settings", e);
                return Ok(EditorConfig::default());
            }
        },
    };
    if !config_path.exists() {
        return Ok(EditorConfig::default());
    }
    EditorConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))
}

/// Absolute form of a path for the recent files list
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
