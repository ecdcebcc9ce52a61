//! Repository discovery
//!
//! Walks a directory tree with an explicit stack and records every directory
//! that holds the metadata marker as an immediate child. Marker directories
//! are never descended into. Symbolic links to directories are followed as
//! long as they resolve inside the root, and every directory is keyed by its
//! canonical path so link cycles terminate and repositories reachable through
//! several paths are reported once.

use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::FinderError;
use crate::model::{RepositoryRoot, RepositorySet};

/// Conventional name of the Git metadata directory
pub const DEFAULT_MARKER: &str = ".git";

/// Finds repository roots under a directory
#[derive(Debug, Clone)]
pub struct RepositoryFinder {
    marker: String,
}

impl Default for RepositoryFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl RepositoryFinder {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Discover every repository below `root`
    ///
    /// Unreadable directories are skipped; the scan continues with their
    /// siblings.
    pub fn find_repositories(&self, root: &Path) -> Result<RepositorySet, FinderError> {
        let root = validate_root(root)?;

        let mut found = RepositorySet::new();
        let mut visited: FxHashSet<PathBuf> = FxHashSet::default();
        visited.insert(root.clone());
        let mut stack = vec![root.clone()];

        while let Some(dir) = stack.pop() {
            self.visit(&root, &dir, &mut stack, &mut visited, &mut found);
        }

        debug!(repositories = found.len(), directories = visited.len(), "discovery finished");
        Ok(found)
    }

    /// Process the immediate children of one directory
    fn visit(
        &self,
        root: &Path,
        dir: &Path,
        stack: &mut Vec<PathBuf>,
        visited: &mut FxHashSet<PathBuf>,
        found: &mut RepositorySet,
    ) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();

            // fs::metadata follows symlinks, so links to directories count
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            if entry.file_name() == self.marker.as_str() {
                // `dir` is already canonical
                if found.insert(RepositoryRoot::new(dir.to_path_buf())) {
                    trace!(path = %dir.display(), "found repository");
                }
                continue;
            }

            let canonical = match fs::canonicalize(&path) {
                Ok(p) => p,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "cannot resolve directory");
                    continue;
                }
            };
            // Links leaving the tree would put foreign repositories in the set
            if !canonical.starts_with(root) {
                debug!(path = %path.display(), target = %canonical.display(), "skipping link outside root");
                continue;
            }
            if visited.insert(canonical.clone()) {
                stack.push(canonical);
            }
        }
    }
}

/// Check that `root` names an existing directory and return its canonical form
pub fn validate_root(root: &Path) -> Result<PathBuf, FinderError> {
    if root.as_os_str().is_empty() {
        return Err(FinderError::InvalidPath {
            path: root.to_path_buf(),
            reason: "path is empty",
        });
    }
    let meta = fs::metadata(root).map_err(|_| FinderError::InvalidPath {
        path: root.to_path_buf(),
        reason: "path does not exist",
    })?;
    if !meta.is_dir() {
        return Err(FinderError::InvalidPath {
            path: root.to_path_buf(),
            reason: "path is not a directory",
        });
    }
    fs::canonicalize(root).map_err(|_| FinderError::InvalidPath {
        path: root.to_path_buf(),
        reason: "path cannot be resolved",
    })
}
