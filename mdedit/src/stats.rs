//! Document statistics across many files

use crate::file_utils::{self, FileError};
use crate::markdown;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Statistics for one Markdown file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    /// File the numbers belong to
    pub path: PathBuf,
    /// Word count
    pub words: usize,
    /// Number of headings
    pub headings: usize,
}

/// Expand the given paths into Markdown files
///
/// Files are taken as given; directories are walked recursively and only
/// `.md`/`.markdown` files are kept, sorted by name within each directory.
pub fn discover_markdown_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, FileError> {
    let mut files = Vec::new();

    for root in paths {
        if !root.is_dir() {
            files.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| FileError::Io {
                path: root.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if path.is_file() && file_utils::is_markdown_file(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Compute statistics for one file
pub fn file_stats(path: &Path) -> Result<FileStats, FileError> {
    let content = file_utils::read_file(path)?;
    Ok(FileStats {
        path: path.to_path_buf(),
        words: markdown::count_words(&content),
        headings: markdown::extract_headings(&content).len(),
    })
}

/// Compute statistics for many files (in parallel when enabled)
pub fn collect_stats(files: &[PathBuf]) -> Result<Vec<FileStats>, FileError> {
    #[cfg(feature = "parallel")]
    let stats: Result<Vec<_>, _> = files.par_iter().map(|path| file_stats(path)).collect();

    #[cfg(not(feature = "parallel"))]
    let stats: Result<Vec<_>, _> = files.iter().map(|path| file_stats(path)).collect();

    let stats = stats?;
    log::info!("Collected statistics for {} files", stats.len());
    Ok(stats)
}
