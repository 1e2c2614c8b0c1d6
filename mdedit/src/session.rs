//! Editing session
//!
//! Ties the document store, theme, autosave and the Markdown functions
//! together. The host (a GUI, or the CLI) observes the session through the
//! [`SessionEvents`] callbacks instead of the session reaching into the host.

use crate::autosave::Autosaver;
use crate::document::{Document, DocumentError};
use crate::editor_config::EditorConfig;
use crate::markdown::{self, HeadingEntry, MarkdownOptions};
use crate::theme::{Theme, ThemeKind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Prefix of every window title
pub const APP_TITLE: &str = "Markdown Editor";

/// Notifications from the session to its host
///
/// All methods default to doing nothing. Callbacks may run on the autosave
/// worker thread.
pub trait SessionEvents: Send {
    /// The rendered preview changed
    fn preview_updated(&mut self, _html: &str) {}

    /// A short status message for the status bar
    fn status(&mut self, _message: &str) {}

    /// An operation failed
    fn error(&mut self, _message: &str) {}

    /// The window title changed
    fn title_changed(&mut self, _title: &str) {}

    /// The theme switched between light and dark
    fn theme_changed(&mut self, _dark: bool) {}
}

/// Host that ignores every notification
pub struct NullEvents;

impl SessionEvents for NullEvents {}

/// State reachable from both the session and the autosave worker
struct Shared {
    document: Mutex<Document>,
    events: Mutex<Box<dyn SessionEvents>>,
}

impl Shared {
    fn document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn events(&self) -> MutexGuard<'_, Box<dyn SessionEvents>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Save when the document has a file and unsaved changes
    fn autosave(&self) -> bool {
        let mut document = self.document();
        if document.path().is_none() || !document.is_dirty() {
            return false;
        }

        let result = document.save();
        drop(document);

        match result {
            Ok(()) => {
                log::info!("Auto-saved");
                self.events().status("Auto-saved");
                true
            }
            Err(e) => {
                log::warn!("Autosave failed: {}", e);
                self.events().error(&format!("Failed to save file: {}", e));
                false
            }
        }
    }
}

/// A single-document editing session
pub struct EditorSession {
    shared: Arc<Shared>,
    theme: Theme,
    options: MarkdownOptions,
    autosave_enabled: bool,
    autosave_delay: Duration,

    /// Started on the first edit while autosave is enabled
    autosaver: Option<Autosaver>,
}

impl EditorSession {
    /// Create a session with default settings
    pub fn new(events: Box<dyn SessionEvents>) -> Self {
        Self::from_config(&EditorConfig::default(), events)
    }

    /// Create a session using the theme and autosave settings of `config`
    pub fn from_config(config: &EditorConfig, events: Box<dyn SessionEvents>) -> Self {
        let mut theme = Theme::new(ThemeKind::from_dark_mode(config.dark_mode));
        if let Some(colors) = &config.light_colors {
            theme.set_custom_colors(ThemeKind::Light, colors.clone());
        }
        if let Some(colors) = &config.dark_colors {
            theme.set_custom_colors(ThemeKind::Dark, colors.clone());
        }

        Self {
            shared: Arc::new(Shared {
                document: Mutex::new(Document::new()),
                events: Mutex::new(events),
            }),
            theme,
            options: MarkdownOptions::default(),
            autosave_enabled: config.autosave_enabled,
            autosave_delay: config.autosave_delay_duration(),
            autosaver: None,
        }
    }

    /// Replace the Markdown rendering options
    pub fn set_markdown_options(&mut self, options: MarkdownOptions) {
        self.options = options;
    }

    /// Copy of the current buffer
    pub fn content(&self) -> String {
        self.shared.document().content().to_string()
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.shared.document().is_dirty()
    }

    /// File associated with the document
    pub fn path(&self) -> Option<PathBuf> {
        self.shared.document().path().map(Path::to_path_buf)
    }

    /// Window title for the current document
    pub fn title(&self) -> String {
        format!("{} - {}", APP_TITLE, self.shared.document().display_name())
    }

    /// Replace the buffer, schedule an autosave and refresh the preview
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.shared.document().set_content(content);
        self.after_edit();
    }

    /// Append text to the buffer as one edit
    pub fn append(&mut self, text: &str) {
        self.shared.document().append(text);
        self.after_edit();
    }

    fn after_edit(&mut self) {
        if self.autosave_enabled {
            self.autosaver().touch();
        }
        let html = self.preview();
        self.shared.events().preview_updated(&html);
    }

    fn autosaver(&mut self) -> &Autosaver {
        let shared = &self.shared;
        let delay = self.autosave_delay;
        self.autosaver.get_or_insert_with(|| {
            let shared = Arc::clone(shared);
            Autosaver::spawn(delay, move || {
                shared.autosave();
            })
        })
    }

    /// Render the buffer with the active theme's stylesheet
    pub fn preview(&self) -> String {
        let mut options = self.options.clone();
        if options.html.complete_page && options.html.stylesheet.is_none() {
            options.html.stylesheet = Some(self.theme.colors().preview_css());
        }
        markdown::render(self.shared.document().content(), &options)
    }

    /// Open a file, replacing the buffer
    pub fn open(&mut self, path: &Path) -> Result<(), DocumentError> {
        if let Err(e) = self.shared.document().load(path) {
            self.shared
                .events()
                .error(&format!("Failed to open file: {}", e));
            return Err(e);
        }

        self.cancel_autosave();
        let title = self.title();
        let html = self.preview();
        let mut events = self.shared.events();
        events.preview_updated(&html);
        events.title_changed(&title);
        events.status("File opened");
        Ok(())
    }

    /// Save to the current file
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let result = {
            let mut document = self.shared.document();
            if document.changed_on_disk() {
                log::warn!("{} changed on disk, overwriting", document.display_name());
                self.shared
                    .events()
                    .status("File changed on disk, overwriting");
            }
            document.save()
        };
        self.report_save(result)
    }

    /// Save to a new file and make it the current one
    pub fn save_as(&mut self, path: &Path) -> Result<(), DocumentError> {
        let result = self.shared.document().save_as(path);
        self.report_save(result)?;
        let title = self.title();
        self.shared.events().title_changed(&title);
        Ok(())
    }

    fn report_save(&mut self, result: Result<(), DocumentError>) -> Result<(), DocumentError> {
        match result {
            Ok(()) => {
                self.cancel_autosave();
                self.shared.events().status("File saved");
                Ok(())
            }
            Err(e) => {
                self.shared
                    .events()
                    .error(&format!("Failed to save file: {}", e));
                Err(e)
            }
        }
    }

    /// Save now if the document has a file and unsaved changes
    pub fn autosave(&self) -> bool {
        self.shared.autosave()
    }

    /// Start over with an empty, untitled document
    pub fn new_file(&mut self) {
        if self.is_dirty() {
            log::warn!("Discarding unsaved changes");
        }
        self.cancel_autosave();
        self.shared.document().clear();

        let title = self.title();
        let mut events = self.shared.events();
        events.preview_updated("");
        events.title_changed(&title);
    }

    fn cancel_autosave(&self) {
        if let Some(autosaver) = &self.autosaver {
            autosaver.cancel();
        }
    }

    /// Active theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch to a specific theme
    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme.set(kind);
        self.shared.events().theme_changed(self.theme.is_dark());
    }

    /// Switch between light and dark
    pub fn toggle_theme(&mut self) -> ThemeKind {
        let kind = self.theme.toggle();
        self.shared.events().theme_changed(self.theme.is_dark());
        kind
    }

    /// Whether edits schedule an autosave
    pub fn autosave_enabled(&self) -> bool {
        self.autosave_enabled
    }

    /// Enable or disable autosave; disabling drops any pending save
    pub fn set_autosave_enabled(&mut self, enabled: bool) {
        self.autosave_enabled = enabled;
        if !enabled {
            self.autosaver = None;
        }
    }

    /// Flip autosave, returning the new state
    pub fn toggle_autosave(&mut self) -> bool {
        self.set_autosave_enabled(!self.autosave_enabled);
        self.autosave_enabled
    }

    /// Change the autosave quiet period
    pub fn set_autosave_delay(&mut self, delay: Duration) {
        self.autosave_delay = delay;
        if let Some(autosaver) = &self.autosaver {
            autosaver.set_delay(delay);
        }
    }

    /// Word count of the buffer
    pub fn word_count(&self) -> usize {
        markdown::count_words(self.shared.document().content())
    }

    /// Headings of the buffer
    pub fn headings(&self) -> Vec<HeadingEntry> {
        markdown::extract_headings_with(
            self.shared.document().content(),
            &self.options.extensions,
        )
    }

    /// Table of contents of the buffer
    pub fn toc(&self) -> String {
        markdown::format_toc(&self.headings())
    }

    /// Stop autosaving and write pending changes when autosave is enabled
    pub fn shutdown(mut self) -> Result<(), DocumentError> {
        // Stop the worker before the final save so they cannot race
        self.autosaver = None;

        if !self.autosave_enabled {
            return Ok(());
        }

        let pending = {
            let document = self.shared.document();
            document.is_dirty() && document.path().is_some()
        };
        if pending {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Records every notification as a tagged string
    #[derive(Clone, Default)]
    struct RecordingEvents {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingEvents {
        fn entries(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        fn contains(&self, entry: &str) -> bool {
            self.entries().iter().any(|e| e == entry)
        }

        fn push(&self, entry: String) {
            self.log.lock().unwrap().push(entry);
        }
    }

    impl SessionEvents for RecordingEvents {
        fn preview_updated(&mut self, html: &str) {
            self.push(format!("preview:{}", html.len()));
        }

        fn status(&mut self, message: &str) {
            self.push(format!("status:{}", message));
        }

        fn error(&mut self, message: &str) {
            self.push(format!("error:{}", message));
        }

        fn title_changed(&mut self, title: &str) {
            self.push(format!("title:{}", title));
        }

        fn theme_changed(&mut self, dark: bool) {
            self.push(format!("theme:{}", dark));
        }
    }

    fn session_without_autosave() -> (EditorSession, RecordingEvents) {
        let events = RecordingEvents::default();
        let config = EditorConfig {
            autosave_enabled: false,
            ..EditorConfig::default()
        };
        let session = EditorSession::from_config(&config, Box::new(events.clone()));
        (session, events)
    }

    #[test]
    fn test_set_content_updates_preview() {
        let (mut session, events) = session_without_autosave();
        session.set_content("# Hello\n\nworld");

        assert!(session.is_dirty());
        assert!(session.preview().contains("<h1 id=\"hello\">Hello</h1>"));
        assert!(events.entries().iter().any(|e| e.starts_with("preview:")));
        assert_eq!(session.word_count(), 3);
        assert_eq!(session.toc(), "- [Hello](#hello)");
    }

    #[test]
    fn test_preview_uses_theme_stylesheet() {
        let (mut session, events) = session_without_autosave();
        session.set_content("text");
        assert!(session.preview().contains("background-color: #f9f7f7;"));

        assert_eq!(session.toggle_theme(), ThemeKind::Dark);
        assert!(session.preview().contains("background-color: #2d3436;"));
        assert!(events.contains("theme:true"));
    }

    #[test]
    fn test_open_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n").unwrap();

        let (mut session, events) = session_without_autosave();
        session.open(&path).unwrap();
        assert_eq!(session.content(), "# Notes\n");
        assert!(!session.is_dirty());
        assert!(events.contains("title:Markdown Editor - notes.md"));
        assert!(events.contains("status:File opened"));

        session.append("\nMore text\n");
        session.save().unwrap();
        assert!(!session.is_dirty());
        assert!(events.contains("status:File saved"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Notes\n\nMore text\n"
        );
    }

    #[test]
    fn test_save_reports_external_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.md");
        std::fs::write(&path, "v1").unwrap();

        let (mut session, events) = session_without_autosave();
        session.open(&path).unwrap();
        session.save().unwrap();
        assert!(!events.contains("status:File changed on disk, overwriting"));

        let later = std::time::SystemTime::now() + Duration::from_secs(60);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();
        session.set_content("v2");
        session.save().unwrap();

        assert!(events.contains("status:File changed on disk, overwriting"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn test_custom_palette_from_config() {
        let mut colors = crate::theme::ThemeColors::light();
        colors.background = "#fffbe6".to_string();
        let config = EditorConfig {
            light_colors: Some(colors),
            ..EditorConfig::default()
        };

        let mut session = EditorSession::from_config(&config, Box::new(NullEvents));
        session.set_autosave_enabled(false);
        session.set_content("text");
        assert!(session.preview().contains("background-color: #fffbe6;"));
        assert_eq!(session.theme().current(), ThemeKind::Light);
    }

    #[test]
    fn test_open_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, events) = session_without_autosave();

        assert!(session.open(&dir.path().join("missing.md")).is_err());
        assert!(events
            .entries()
            .iter()
            .any(|e| e.starts_with("error:Failed to open file:")));
        assert_eq!(session.title(), "Markdown Editor - Untitled");
    }

    #[test]
    fn test_save_without_path() {
        let (mut session, events) = session_without_autosave();
        session.set_content("draft");

        assert!(matches!(session.save(), Err(DocumentError::NoFilePath)));
        assert!(events.contains("error:Failed to save file: document has no file path"));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_save_as_updates_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");

        let (mut session, events) = session_without_autosave();
        session.set_content("body");
        session.save_as(&path).unwrap();

        assert_eq!(session.path(), Some(path.clone()));
        assert!(events.contains("title:Markdown Editor - out.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "body");
    }

    #[test]
    fn test_manual_autosave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto.md");

        let (mut session, events) = session_without_autosave();
        session.set_content("first");
        assert!(!session.autosave(), "no path yet");

        session.save_as(&path).unwrap();
        assert!(!session.autosave(), "nothing to save");

        session.set_content("second");
        assert!(session.autosave());
        assert!(events.contains("status:Auto-saved"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_debounced_autosave_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debounced.md");
        std::fs::write(&path, "").unwrap();

        let events = RecordingEvents::default();
        let mut session = EditorSession::new(Box::new(events.clone()));
        session.set_autosave_delay(Duration::from_millis(50));
        session.open(&path).unwrap();

        session.set_content("typed");
        session.append(" more");

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !events.contains("status:Auto-saved") && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        assert!(!session.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "typed more");
        assert!(events.contains("status:Auto-saved"));
    }

    #[test]
    fn test_shutdown_saves_pending_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending.md");
        std::fs::write(&path, "old").unwrap();

        let mut session = EditorSession::new(Box::new(NullEvents));
        session.set_autosave_delay(Duration::from_secs(60));
        session.open(&path).unwrap();
        session.set_content("new");
        session.shutdown().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_shutdown_without_autosave_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.md");
        std::fs::write(&path, "old").unwrap();

        let (mut session, _events) = session_without_autosave();
        session.open(&path).unwrap();
        session.set_content("new");
        session.shutdown().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_new_file_resets_document() {
        let (mut session, events) = session_without_autosave();
        session.set_content("something");
        session.new_file();

        assert_eq!(session.content(), "");
        assert!(session.is_dirty());
        assert!(session.path().is_none());
        assert!(events.contains("title:Markdown Editor - Untitled"));
    }

    #[test]
    fn test_toggle_autosave() {
        let mut session = EditorSession::new(Box::new(NullEvents));
        assert!(session.autosave_enabled());
        assert!(!session.toggle_autosave());
        assert!(session.toggle_autosave());
    }
}
