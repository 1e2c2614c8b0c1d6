//! File helpers for reading and writing plain-text documents

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Extensions recognised as Markdown documents
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Errors that can occur during document file operations
#[derive(Error, Debug)]
pub enum FileError {
    /// No path was given
    #[error("file path cannot be empty")]
    EmptyPath,

    /// The file does not exist
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing failed
    #[error("IO error for {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a document's content
///
/// # Parameters
/// * `path` - File to read
///
/// # Returns
/// * `Ok(String)` - File content
/// * `Err(FileError)` - Empty path, missing file or read failure
pub fn read_file(path: &Path) -> Result<String, FileError> {
    if path.as_os_str().is_empty() {
        return Err(FileError::EmptyPath);
    }
    if !path.exists() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document's content, creating the parent directory if needed
///
/// # Parameters
/// * `path` - Destination file
/// * `content` - Text to write
///
/// # Returns
/// * `Ok(())` - File written
/// * `Err(FileError)` - Empty path or write failure
pub fn write_file(path: &Path, content: &str) -> Result<(), FileError> {
    if path.as_os_str().is_empty() {
        return Err(FileError::EmptyPath);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FileError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Final component of a path, or the whole path when there is none
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether the path has a Markdown extension (case-insensitive)
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Append `.md` unless the path already has a Markdown extension
///
/// An empty path becomes `untitled.md`.
pub fn ensure_extension(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::from("untitled.md");
    }
    if is_markdown_file(path) {
        return path.to_path_buf();
    }

    let mut with_extension = path.as_os_str().to_owned();
    with_extension.push(".md");
    PathBuf::from(with_extension)
}

/// Copy a file to a hidden `.<name>.bak` sibling
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the backup
/// * `Err(FileError)` - The original could not be read or the copy written
pub fn create_backup(path: &Path) -> Result<PathBuf, FileError> {
    let content = read_file(path)?;
    let backup_path = path.with_file_name(format!(".{}.bak", file_name(path)));
    write_file(&backup_path, &content)?;
    Ok(backup_path)
}

/// Whether the file was modified after `since`
pub fn is_modified_since(path: &Path, since: SystemTime) -> Result<bool, FileError> {
    if path.as_os_str().is_empty() {
        return Err(FileError::EmptyPath);
    }

    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(modified > since)
}
