//! Read-only document store over a directory tree.
//!
//! Traverses the tree lazily in file-name order so runs are
//! reproducible. A directory that cannot be listed surfaces as an
//! error entry; a failure on the root itself is a configuration
//! error. Entries whose names are not valid UTF-8 are left out with
//! a warning, since they have no faithful `/`-separated identifier.

use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{DocfeedError, Result};
use crate::core::indexer::metadata::normalize_relative;

/// One entry produced by walking a document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Full path on disk
    pub path: PathBuf,

    /// Path relative to the store root, `/`-separated
    pub relative: String,

    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Result of reading one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// File content was read as UTF-8 text
    Loaded(String),

    /// File could not be used; the run continues without it
    Skipped(String),
}

/// Read-only access to a tree of documents.
pub trait DocumentStore {
    /// Root of the store
    fn root(&self) -> &Path;

    /// Whether the root exists
    fn exists(&self) -> bool;

    /// Lazily enumerate every entry below the root.
    ///
    /// Each call starts a fresh walk. An `Err` item means the tree
    /// could not be enumerated and callers should stop.
    fn entries(&self) -> Box<dyn Iterator<Item = Result<StoreEntry>> + '_>;

    /// Read the full text of a file entry.
    fn read(&self, entry: &StoreEntry) -> ReadOutcome;
}

/// File system walker with pattern-based filtering
pub struct FileWalker {
    /// Root directory of the store
    root: PathBuf,

    /// Patterns to exclude (e.g., "**/drafts/**")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,

    /// Descend into directories whose name starts with '.'
    include_hidden: bool,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `root` - Root directory of the document tree
    /// * `exclude_patterns` - Glob patterns for paths to leave out
    /// * `max_file_size_mb` - Maximum file size in megabytes
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if patterns are
    /// invalid
    pub fn new(
        root: impl Into<PathBuf>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
    ) -> Result<Self> {
        let exclude = exclude_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    DocfeedError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root: root.into(),
            exclude_patterns: exclude,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
            include_hidden: false,
        })
    }

    /// Also walk hidden directories
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Determine if a directory entry should be descended into
    ///
    /// Filters out hidden directories, excluded patterns and names
    /// that are not valid UTF-8. Never filters the root directory
    /// itself.
    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        let path = entry.path();

        if entry.depth() == 0 {
            return true;
        }

        let Some(relative) = self.relative_of(path) else {
            tracing::warn!("Skipping {}: name is not valid UTF-8", path.display());
            return false;
        };

        if !self.include_hidden && entry.file_type().is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }
        }

        !self.is_excluded(path, &relative)
    }

    fn is_excluded(&self, path: &Path, relative: &str) -> bool {
        self.exclude_patterns.iter().any(|p| {
            p.matches(relative)
                || p.matches_path(path)
                || path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .map(|f| p.matches(f))
                    .unwrap_or(false)
        })
    }

    /// `/`-separated path below the root, or `None` when the path
    /// is not valid UTF-8
    fn relative_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.to_str().map(normalize_relative)
    }

    fn walk_error(&self, err: walkdir::Error) -> DocfeedError {
        let path = err.path().unwrap_or(self.root.as_path()).display().to_string();
        if err.depth() == 0 {
            DocfeedError::ConfigError(format!("Cannot read document store {path}: {err}"))
        } else {
            DocfeedError::WalkFailed {
                path,
                reason: err.to_string(),
            }
        }
    }
}

impl DocumentStore for FileWalker {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self) -> bool {
        self.root.exists()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = Result<StoreEntry>> + '_> {
        let walk = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1)
            .into_iter()
            .filter_entry(move |e| self.should_process_entry(e))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.relative_of(entry.path()).map(|relative| {
                    Ok(StoreEntry {
                        relative,
                        path: entry.path().to_path_buf(),
                        is_dir: entry.file_type().is_dir(),
                    })
                }),
                Err(e) => Some(Err(self.walk_error(e))),
            });

        Box::new(walk)
    }

    fn read(&self, entry: &StoreEntry) -> ReadOutcome {
        let path = &entry.path;

        match fs::metadata(path) {
            Ok(metadata) if metadata.len() > self.max_file_size_bytes => {
                return ReadOutcome::Skipped(format!(
                    "file is {} bytes, limit is {} bytes",
                    metadata.len(),
                    self.max_file_size_bytes
                ));
            }
            Ok(_) => {}
            Err(e) => return ReadOutcome::Skipped(format!("cannot stat: {e}")),
        }

        match fs::read_to_string(path) {
            Ok(content) => ReadOutcome::Loaded(content),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                ReadOutcome::Skipped("not valid UTF-8".to_string())
            }
            Err(e) => ReadOutcome::Skipped(format!("read failed: {e}")),
        }
    }
}
