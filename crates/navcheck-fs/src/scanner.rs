//! Content discovery by filesystem walking.
//!
//! The scanner only identifies markdown pages; no file content is read.
//! Hidden entries (names starting with `.`, such as the generator's
//! `.vitepress` directory) are always skipped, and exclude patterns prune
//! further paths relative to the source directory.
//!
//! Files under the top-level `public` directory are served at the site root,
//! so they are recorded as static assets (`public/javadoc/index.html` becomes
//! `javadoc/index.html`) instead of pages.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use navcheck_site::ContentIndex;

/// Directory whose files the site generator copies to the site root.
const PUBLIC_DIR: &str = "public";

/// Which part of the source tree a directory belongs to.
#[derive(Clone, Copy)]
enum Area {
    Pages,
    Public,
}

/// Error returned when scanning fails.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Source path exists but is not a directory.
    #[error("Source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Invalid exclude pattern.
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        /// Pattern as given.
        pattern: String,
        /// Underlying error.
        #[source]
        source: glob::PatternError,
    },
    /// I/O error reading the source directory itself.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Discovers markdown pages by walking the filesystem.
pub struct Scanner {
    source_dir: PathBuf,
    excludes: Vec<Pattern>,
}

impl Scanner {
    /// Create a scanner for `source_dir` with no exclude patterns.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            excludes: Vec::new(),
        }
    }

    /// Add exclude glob patterns, matched against `/`-separated paths
    /// relative to the source directory.
    ///
    /// A pattern like `node_modules/**` prunes the whole directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a pattern is not a valid glob.
    pub fn with_excludes<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, ScanError> {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let compiled = Pattern::new(pattern).map_err(|source| ScanError::Pattern {
                pattern: pattern.to_owned(),
                source,
            })?;
            self.excludes.push(compiled);
        }
        Ok(self)
    }

    /// Scan the source directory and return every markdown page and every
    /// static asset under `public`.
    ///
    /// Unreadable subdirectories are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing, is not a
    /// directory, or cannot be read.
    pub fn scan(&self) -> Result<ContentIndex, ScanError> {
        if !self.source_dir.exists() {
            return Err(ScanError::NotFound(self.source_dir.clone()));
        }
        if !self.source_dir.is_dir() {
            return Err(ScanError::NotADirectory(self.source_dir.clone()));
        }

        let entries = fs::read_dir(&self.source_dir).map_err(|source| ScanError::Io {
            path: self.source_dir.clone(),
            source,
        })?;

        let mut index = ContentIndex::new();
        self.scan_entries(entries, "", Area::Pages, &mut index);
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            pages = index.len(),
            assets = index.assets().count(),
            "Scanned content"
        );
        Ok(index)
    }

    /// Scan a directory and recurse into subdirectories.
    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_prefix: &str,
        area: Area,
        index: &mut ContentIndex,
    ) {
        match fs::read_dir(dir_path) {
            Ok(entries) => self.scan_entries(entries, rel_prefix, area, index),
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Skipping unreadable directory");
            }
        }
    }

    fn scan_entries(
        &self,
        entries: fs::ReadDir,
        rel_prefix: &str,
        area: Area,
        index: &mut ContentIndex,
    ) {
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let rel_path = if rel_prefix.is_empty() {
                name
            } else {
                format!("{rel_prefix}/{name}")
            };
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if self.is_excluded(&rel_path, is_dir) {
                tracing::trace!(path = %rel_path, "Excluded");
                continue;
            }

            let path = entry.path();
            if is_dir {
                let area = if rel_path == PUBLIC_DIR {
                    Area::Public
                } else {
                    area
                };
                self.scan_directory(&path, &rel_path, area, index);
                continue;
            }
            match area {
                Area::Public => {
                    if let Some(served) = rel_path.strip_prefix("public/") {
                        index.insert_asset(served);
                    }
                }
                Area::Pages => {
                    if path.extension().is_some_and(|e| e == "md") {
                        index.insert(&rel_path);
                    }
                }
            }
        }
    }

    /// Directories are also tested with a trailing `/x` so that `dir/**`
    /// prunes the directory before descending.
    fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        self.excludes.iter().any(|pattern| {
            pattern.matches(rel_path) || (is_dir && pattern.matches(&format!("{rel_path}/x")))
        })
    }
}
