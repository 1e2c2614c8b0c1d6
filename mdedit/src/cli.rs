//! Command-line interface definitions for mdedit

use crate::theme::ThemeKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Theme change requested by `config theme`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeChange {
    /// Light color scheme
    Light,
    /// Dark color scheme
    Dark,
    /// Switch to the other scheme
    Toggle,
}

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    /// Enable
    On,
    /// Disable
    Off,
}

/// CLI structure for the mdedit application
#[derive(Parser)]
#[command(name = "mdedit")]
#[command(version)]
#[command(about = "Markdown editor with live HTML preview", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ~/.markdown-editor/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for mdedit
#[derive(Subcommand)]
pub enum Commands {
    /// Render a Markdown file to HTML
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Write the HTML to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit an HTML fragment instead of a standalone page
        #[arg(long)]
        fragment: bool,

        /// Preview theme, `light` or `dark` (defaults to the configured theme)
        #[arg(long, value_name = "THEME")]
        theme: Option<ThemeKind>,

        /// Do not open external links in a new tab
        #[arg(long)]
        no_target_blank: bool,

        /// Escape raw HTML found in the document
        #[arg(long)]
        safe: bool,
    },

    /// Print the table of contents of a Markdown file
    Toc {
        /// Markdown file to read
        file: PathBuf,
    },

    /// List the headings of a Markdown file (level, slug, text)
    Headings {
        /// Markdown file to read
        file: PathBuf,
    },

    /// Count the words in a Markdown file
    Count {
        /// Markdown file to read
        file: PathBuf,
    },

    /// Word and heading statistics for files and directories
    Stats {
        /// Markdown files or directories to scan
        #[arg(value_name = "PATH", default_value = ".")]
        paths: Vec<PathBuf>,
    },

    /// Create a new Markdown document
    New {
        /// Path of the new document (.md is added if missing)
        path: PathBuf,

        /// Title written as the first heading
        #[arg(short, long)]
        title: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Edit a document headlessly: each stdin line is appended as an edit
    Edit {
        /// Document to edit (created if missing)
        file: PathBuf,

        /// Autosave delay in seconds (defaults to the configured delay)
        #[arg(long, value_name = "SECONDS")]
        delay: Option<u64>,
    },

    /// View or change the editor configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions of the `config` subcommand
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,

    /// Set or toggle the theme
    Theme {
        /// New theme
        #[arg(value_enum)]
        change: ThemeChange,
    },

    /// Enable or disable autosave
    Autosave {
        /// New state
        #[arg(value_enum)]
        state: Switch,

        /// Autosave delay in seconds
        #[arg(long, value_name = "SECONDS")]
        delay: Option<u64>,
    },

    /// List recently opened files
    Recent,
}
