use rustc_hash::FxHashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A directory that has the metadata marker directory as an immediate child.
///
/// Identity is the canonical path, so two discoveries through different
/// link paths compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryRoot(PathBuf);

impl RepositoryRoot {
    pub fn new(canonical: PathBuf) -> Self {
        Self(canonical)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RepositoryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Deduplicated repositories found under one analysed root
#[derive(Debug, Clone, Default)]
pub struct RepositorySet {
    roots: FxHashSet<RepositoryRoot>,
}

impl RepositorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the root was already present
    pub fn insert(&mut self, root: RepositoryRoot) -> bool {
        self.roots.insert(root)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.roots.iter().any(|r| r.path() == path)
    }

    /// Fixed iteration order for one cleanup run (sorted by path)
    pub fn to_sorted_vec(&self) -> Vec<RepositoryRoot> {
        let mut roots: Vec<_> = self.roots.iter().cloned().collect();
        roots.sort();
        roots
    }
}

impl FromIterator<RepositoryRoot> for RepositorySet {
    fn from_iter<I: IntoIterator<Item = RepositoryRoot>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}
