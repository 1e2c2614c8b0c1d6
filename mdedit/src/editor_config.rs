//! Editor configuration from config.toml

use crate::theme::ThemeColors;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Maximum number of entries kept in the recent files list
pub const MAX_RECENT_FILES: usize = 10;

/// Persisted editor settings
///
/// Fields missing from the file take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Use the dark theme
    pub dark_mode: bool,

    /// Editor font size in points
    pub font_size: u32,

    /// Editor font family (CSS font list)
    pub font_family: String,

    /// Tab width in spaces
    pub tab_size: u32,

    /// Show line numbers in the editor
    pub line_numbers: bool,

    /// Save automatically after edits
    pub autosave_enabled: bool,

    /// Seconds of inactivity before an autosave
    pub autosave_delay: u64,

    /// Most recently opened or saved files, newest first
    pub recent_files: Vec<PathBuf>,

    /// Window width in pixels
    pub window_width: u32,

    /// Window height in pixels
    pub window_height: u32,

    /// Replacement for the built-in light palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_colors: Option<ThemeColors>,

    /// Replacement for the built-in dark palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_colors: Option<ThemeColors>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: 14,
            font_family: "Roboto Mono, monospace".to_string(),
            tab_size: 4,
            line_numbers: true,
            autosave_enabled: true,
            autosave_delay: 5,
            recent_files: Vec::new(),
            window_width: 1024,
            window_height: 768,
            light_colors: None,
            dark_colors: None,
        }
    }
}

impl EditorConfig {
    /// Default configuration file location: `~/.markdown-editor/config.toml`
    pub fn default_path() -> Result<PathBuf, EditorConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".markdown-editor").join("config.toml"))
            .ok_or(EditorConfigError::NoHomeDirectory)
    }

    /// Load configuration from a config.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EditorConfig)` - Successfully loaded configuration
    /// * `Err(EditorConfigError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EditorConfigError> {
        let content = fs::read_to_string(&path).map_err(EditorConfigError::IoError)?;

        let config: EditorConfig =
            toml::from_str(&content).map_err(EditorConfigError::ParseError)?;

        Ok(config)
    }

    /// Load configuration, writing the defaults first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, EditorConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Creating default configuration at {}", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        Self::load(path)
    }

    /// Save configuration to a config.toml file, creating its directory
    ///
    /// # Parameters
    /// * `path` - Path where the configuration file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(EditorConfigError)` - Error serializing or writing the file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EditorConfigError> {
        let content = toml::to_string_pretty(self).map_err(EditorConfigError::SerializeError)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(EditorConfigError::IoError)?;
        }
        fs::write(&path, content).map_err(EditorConfigError::IoError)?;

        Ok(())
    }

    /// Move `path` to the front of the recent files list
    pub fn add_recent_file(&mut self, path: &Path) {
        self.recent_files.retain(|existing| existing != path);
        self.recent_files.insert(0, path.to_path_buf());
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Autosave delay as a duration
    pub fn autosave_delay_duration(&self) -> Duration {
        Duration::from_secs(self.autosave_delay)
    }
}

/// Errors that can occur when loading or saving editor configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum EditorConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),

    /// The home directory could not be determined
    NoHomeDirectory,
}

impl std::fmt::Display for EditorConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorConfigError::IoError(e) => write!(f, "IO error: {}", e),
            EditorConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            EditorConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
            EditorConfigError::NoHomeDirectory => {
                write!(f, "Could not determine the home directory")
            }
        }
    }
}

impl std::error::Error for EditorConfigError {}
