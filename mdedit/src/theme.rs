//! Light and dark color themes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    /// Light color scheme
    #[default]
    Light,
    /// Dark color scheme
    Dark,
}

impl ThemeKind {
    /// The other theme
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme matching a dark-mode flag
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme '{}'. Expected 'light' or 'dark'", other)),
        }
    }
}

/// Color palette for a theme (CSS color values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub background: String,
    pub background_secondary: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub accent: String,
    pub accent_hover: String,
    pub editor_background: String,
    pub preview_background: String,
    pub toolbar: String,
    pub status_bar: String,
    pub highlight: String,
}

impl ThemeColors {
    /// Default light palette
    pub fn light() -> Self {
        Self {
            background: "#f9f7f7".to_string(),
            background_secondary: "#f0f0f0".to_string(),
            text: "#2d3436".to_string(),
            text_secondary: "#636e72".to_string(),
            border: "#dfe6e9".to_string(),
            accent: "#74b9ff".to_string(),
            accent_hover: "#0984e3".to_string(),
            editor_background: "#ffffff".to_string(),
            preview_background: "#f9f7f7".to_string(),
            toolbar: "#f5f5f5".to_string(),
            status_bar: "#f0f0f0".to_string(),
            highlight: "rgba(116, 185, 255, 0.2)".to_string(),
        }
    }

    /// Default dark palette
    pub fn dark() -> Self {
        Self {
            background: "#2d3436".to_string(),
            background_secondary: "#222626".to_string(),
            text: "#dfe6e9".to_string(),
            text_secondary: "#b2bec3".to_string(),
            border: "#636e72".to_string(),
            accent: "#6c5ce7".to_string(),
            accent_hover: "#a29bfe".to_string(),
            editor_background: "#232323".to_string(),
            preview_background: "#2d3436".to_string(),
            toolbar: "#222626".to_string(),
            status_bar: "#1e2022".to_string(),
            highlight: "rgba(108, 92, 231, 0.2)".to_string(),
        }
    }

    /// Stylesheet for a standalone preview page
    pub fn preview_css(&self) -> String {
        format!(
            r#"body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
    line-height: 1.6;
    color: {text};
    background-color: {background};
    max-width: 900px;
    margin: 0 auto;
    padding: 20px 40px;
}}

a {{
    color: {accent};
}}

a:hover {{
    color: {accent_hover};
}}

pre, code {{
    font-family: 'Roboto Mono', 'Courier New', monospace;
    background-color: {background_secondary};
}}

pre {{
    padding: 12px;
    border: 1px solid {border};
    border-radius: 4px;
    overflow-x: auto;
}}

blockquote {{
    margin-left: 0;
    padding-left: 16px;
    border-left: 4px solid {border};
    color: {text_secondary};
}}

table {{
    border-collapse: collapse;
}}

th, td {{
    border: 1px solid {border};
    padding: 6px 12px;
}}

mark {{
    background-color: {highlight};
}}

.footnote-definition {{
    font-size: 0.9em;
    color: {text_secondary};
}}
"#,
            text = self.text,
            background = self.preview_background,
            accent = self.accent,
            accent_hover = self.accent_hover,
            background_secondary = self.background_secondary,
            border = self.border,
            text_secondary = self.text_secondary,
            highlight = self.highlight,
        )
    }
}

/// Current theme plus the palettes for both kinds
#[derive(Debug, Clone)]
pub struct Theme {
    current: ThemeKind,
    light: ThemeColors,
    dark: ThemeColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeKind::Light)
    }
}

impl Theme {
    /// Create a theme with the default palettes
    pub fn new(current: ThemeKind) -> Self {
        Self {
            current,
            light: ThemeColors::light(),
            dark: ThemeColors::dark(),
        }
    }

    /// Active theme kind
    pub fn current(&self) -> ThemeKind {
        self.current
    }

    /// Switch to a specific theme
    pub fn set(&mut self, kind: ThemeKind) {
        self.current = kind;
    }

    /// Switch between light and dark, returning the new kind
    pub fn toggle(&mut self) -> ThemeKind {
        self.current = self.current.toggle();
        self.current
    }

    /// Whether the dark theme is active
    pub fn is_dark(&self) -> bool {
        self.current == ThemeKind::Dark
    }

    /// Palette of the active theme
    pub fn colors(&self) -> &ThemeColors {
        self.colors_for(self.current)
    }

    /// Palette of a specific theme
    pub fn colors_for(&self, kind: ThemeKind) -> &ThemeColors {
        match kind {
            ThemeKind::Light => &self.light,
            ThemeKind::Dark => &self.dark,
        }
    }

    /// Replace the palette of a theme
    pub fn set_custom_colors(&mut self, kind: ThemeKind, colors: ThemeColors) {
        match kind {
            ThemeKind::Light => self.light = colors,
            ThemeKind::Dark => self.dark = colors,
        }
    }
}
