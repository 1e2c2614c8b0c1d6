//! In-memory document buffer with dirty tracking

use crate::file_utils::{self, FileError};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Errors that can occur when loading or saving a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// `save` was called on a document that has never been saved or loaded
    #[error("document has no file path")]
    NoFilePath,

    /// Underlying file operation failed
    #[error(transparent)]
    File(#[from] FileError),
}

/// The document being edited
///
/// `dirty` is set by every mutation and cleared only by a successful load or
/// save.
#[derive(Debug, Default)]
pub struct Document {
    buffer: String,
    dirty: bool,
    path: Option<PathBuf>,

    /// When the buffer last matched the file on disk
    synced_at: Option<SystemTime>,
}

impl Document {
    /// Create an empty, clean, untitled document
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer content
    pub fn content(&self) -> &str {
        &self.buffer
    }

    /// Whether the buffer changed since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Associated file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the buffer
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
        self.dirty = true;
    }

    /// Append text to the buffer
    pub fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.dirty = true;
    }

    /// Drop the buffer and the file association
    ///
    /// Clearing is an edit like any other, so the document is dirty afterwards.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.path = None;
        self.synced_at = None;
        self.dirty = true;
    }

    /// Load a file into the buffer
    ///
    /// On failure the document is left unchanged.
    pub fn load(&mut self, path: &Path) -> Result<(), DocumentError> {
        let content = file_utils::read_file(path)?;
        self.buffer = content;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        self.synced_at = Some(SystemTime::now());
        log::info!("Loaded {} ({} bytes)", path.display(), self.buffer.len());
        Ok(())
    }

    /// Write the buffer to the associated file
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoFilePath)?;
        self.write_to(&path)
    }

    /// Write the buffer to a new file and associate the document with it
    pub fn save_as(&mut self, path: &Path) -> Result<(), DocumentError> {
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Whether another program wrote the file since the last load or save
    ///
    /// An unreadable file counts as unchanged; the next save reports it.
    pub fn changed_on_disk(&self) -> bool {
        match (&self.path, self.synced_at) {
            (Some(path), Some(synced_at)) => {
                file_utils::is_modified_since(path, synced_at).unwrap_or(false)
            }
            _ => false,
        }
    }

    /// File name for window titles, `Untitled` when there is no file
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .map(file_utils::file_name)
            .unwrap_or_else(|| "Untitled".to_string())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), DocumentError> {
        file_utils::write_file(path, &self.buffer)?;
        self.dirty = false;
        self.synced_at = Some(SystemTime::now());
        log::info!("Saved {} ({} bytes)", path.display(), self.buffer.len());
        Ok(())
    }
}
