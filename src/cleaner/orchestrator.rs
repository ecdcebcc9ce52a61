//! Sequential cleanup of discovered repositories

use tracing::{debug, info, warn};

use super::cancel::CancellationToken;
use super::command::MaintenanceCommand;
use super::progress::ProgressUpdate;
use crate::error::CleanupError;
use crate::model::RepositoryRoot;

/// Runs the maintenance command against repositories one at a time
pub struct CleanupOrchestrator<'a> {
    command: &'a dyn MaintenanceCommand,
}

impl<'a> CleanupOrchestrator<'a> {
    pub fn new(command: &'a dyn MaintenanceCommand) -> Self {
        Self { command }
    }

    /// Clean every repository in `repositories`, in order
    ///
    /// Cancellation is checked before each command starts. `on_progress`
    /// receives `(i + 1, total)` after each success and a final
    /// `(total, total)` once the whole sequence is done. The first failing
    /// repository stops the run; repositories already cleaned stay cleaned.
    ///
    /// A command that never exits blocks this call indefinitely.
    pub fn run(
        &self,
        repositories: &[RepositoryRoot],
        mut on_progress: impl FnMut(ProgressUpdate),
        cancel: &CancellationToken,
    ) -> Result<usize, CleanupError> {
        let total = repositories.len();
        debug!(total, command = %self.command.describe(), "starting cleanup");

        for (index, repository) in repositories.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(completed = index, total, "cleanup cancelled");
                return Err(CleanupError::Cancelled {
                    completed: index,
                    total,
                });
            }

            debug!(path = %repository, "running maintenance");
            if let Err(source) = self.command.run(repository.path()) {
                warn!(path = %repository, error = %source, "maintenance failed");
                return Err(CleanupError::Failed {
                    repository: repository.path().to_path_buf(),
                    completed: index,
                    total,
                    source,
                });
            }

            info!(path = %repository, "cleaned {}/{}", index + 1, total);
            on_progress(ProgressUpdate::new(index + 1, total));
        }

        on_progress(ProgressUpdate::new(total, total));
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandFailure;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    fn repos(n: usize) -> Vec<RepositoryRoot> {
        (1..=n)
            .map(|i| RepositoryRoot::new(PathBuf::from(format!("/work/repo{}", i))))
            .collect()
    }

    #[test]
    fn test_runs_each_repository_in_order() {
        let seen = Mutex::new(Vec::new());
        let command = |p: &Path| -> Result<(), CommandFailure> {
            seen.lock().unwrap().push(p.to_path_buf());
            Ok(())
        };
        let mut updates = Vec::new();

        let cleaned = CleanupOrchestrator::new(&command)
            .run(&repos(3), |u| updates.push(u), &CancellationToken::new())
            .unwrap();

        assert_eq!(cleaned, 3);
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen, repos(3).iter().map(|r| r.path().to_path_buf()).collect::<Vec<_>>());
        assert_eq!(
            updates,
            vec![
                ProgressUpdate::new(1, 3),
                ProgressUpdate::new(2, 3),
                ProgressUpdate::new(3, 3),
                ProgressUpdate::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_empty_run_only_reports_completion() {
        let command = |_: &Path| -> Result<(), CommandFailure> { panic!("no repositories to clean") };
        let mut updates = Vec::new();

        let cleaned = CleanupOrchestrator::new(&command)
            .run(&[], |u| updates.push(u), &CancellationToken::new())
            .unwrap();

        assert_eq!(cleaned, 0);
        assert_eq!(updates, vec![ProgressUpdate::new(0, 0)]);
    }

    #[test]
    fn test_cancelled_before_start() {
        let command = |_: &Path| -> Result<(), CommandFailure> { panic!("must not run") };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = CleanupOrchestrator::new(&command)
            .run(&repos(2), |_| {}, &cancel)
            .unwrap_err();

        assert!(matches!(err, CleanupError::Cancelled { completed: 0, total: 2 }));
    }

    #[test]
    fn test_cancel_between_repositories() {
        let calls = Mutex::new(0);
        let command = |_: &Path| -> Result<(), CommandFailure> {
            *calls.lock().unwrap() += 1;
            Ok(())
        };
        let cancel = CancellationToken::new();
        let mut updates = Vec::new();

        let err = CleanupOrchestrator::new(&command)
            .run(
                &repos(5),
                |u| {
                    updates.push(u);
                    if u.completed == 2 {
                        cancel.cancel();
                    }
                },
                &cancel,
            )
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(err.completed(), 2);
        assert_eq!(*calls.lock().unwrap(), 2);
        assert_eq!(updates.iter().map(|u| u.completed).max(), Some(2));
    }

    #[test]
    fn test_failure_halts_run() {
        let calls = Mutex::new(Vec::new());
        let command = |p: &Path| -> Result<(), CommandFailure> {
            calls.lock().unwrap().push(p.to_path_buf());
            if p.ends_with("repo3") {
                Err(CommandFailure::Exit { code: Some(1), stderr: String::new() })
            } else {
                Ok(())
            }
        };
        let mut updates = Vec::new();

        let err = CleanupOrchestrator::new(&command)
            .run(&repos(5), |u| updates.push(u), &CancellationToken::new())
            .unwrap_err();

        match err {
            CleanupError::Failed { repository, completed, total, .. } => {
                assert_eq!(repository, PathBuf::from("/work/repo3"));
                assert_eq!(completed, 2);
                assert_eq!(total, 5);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(calls.lock().unwrap().len(), 3);
        assert_eq!(updates.last(), Some(&ProgressUpdate::new(2, 5)));
    }
}
