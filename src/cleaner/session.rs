//! One analysed root: discovery cache, before snapshot, cleanup run

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use super::cancel::CancellationToken;
use super::command::MaintenanceCommand;
use super::orchestrator::CleanupOrchestrator;
use super::progress::ProgressUpdate;
use crate::error::{CleanupError, FinderError};
use crate::model::{CleaningReport, RepositorySet, SizeSnapshot};
use crate::scanner::{validate_root, RepositoryFinder, SizeAccountant};
use crate::util::now_timestamp;

/// Cleanup session for a single root directory
///
/// Selecting a different root means opening a new session; the discovered
/// repositories are never re-scanned within one session. A session runs at
/// most one cleanup, since its "before" snapshot is only valid for that run.
pub struct CleanupSession {
    root: PathBuf,
    finder: RepositoryFinder,
    accountant: SizeAccountant,
    before: SizeSnapshot,
    repositories: OnceLock<RepositorySet>,
    spent: AtomicBool,
}

impl CleanupSession {
    /// Validate `root` and capture the size snapshot used as the baseline
    pub fn open(root: &Path, marker: &str) -> Result<Self, FinderError> {
        let root = validate_root(root)?;
        let accountant = SizeAccountant::new(marker);
        let before = accountant.snapshot(&root);
        info!(root = %root.display(), total = before.total, metadata = before.metadata, "session opened");

        Ok(Self {
            root,
            finder: RepositoryFinder::new(marker),
            accountant,
            before,
            repositories: OnceLock::new(),
            spent: AtomicBool::new(false),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn marker(&self) -> &str {
        self.finder.marker()
    }

    pub fn before(&self) -> SizeSnapshot {
        self.before
    }

    /// True once `run` has been called, whatever its outcome
    pub fn is_spent(&self) -> bool {
        self.spent.load(Ordering::SeqCst)
    }

    /// Repositories under the root, discovered on first use
    pub fn repositories(&self) -> &RepositorySet {
        self.repositories.get_or_init(|| {
            self.finder.find_repositories(&self.root).unwrap_or_else(|e| {
                warn!(error = %e, "discovery failed, treating root as empty");
                RepositorySet::new()
            })
        })
    }

    /// Discovery result as text, one path per line
    pub fn listing(&self) -> String {
        let repositories = self.repositories();
        if repositories.is_empty() {
            return format!("No {} folders found", self.marker().trim_start_matches('.'));
        }

        let count = repositories.len();
        let mut out = format!(
            "Found {} {} {} in the given folder\n\n",
            count,
            self.marker().trim_start_matches('.'),
            if count > 1 { "projects" } else { "project" }
        );
        for repository in repositories.to_sorted_vec() {
            let _ = writeln!(out, "{}", repository);
        }
        out
    }

    /// Clean every discovered repository and report the space reclaimed
    ///
    /// Fails with `AlreadyRun` on a session that has already been used.
    pub fn run(
        &self,
        command: &dyn MaintenanceCommand,
        on_progress: impl FnMut(ProgressUpdate),
        cancel: &CancellationToken,
    ) -> Result<CleaningReport, CleanupError> {
        if self.spent.swap(true, Ordering::SeqCst) {
            return Err(CleanupError::AlreadyRun);
        }
        let order = self.repositories().to_sorted_vec();
        let cleaned = CleanupOrchestrator::new(command).run(&order, on_progress, cancel)?;

        let after = self.accountant.snapshot(&self.root);
        Ok(CleaningReport::new(
            self.before,
            after,
            cleaned,
            self.marker(),
            now_timestamp(),
        ))
    }
}
