//! Error types for discovery and cleanup

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Discovery was given a root it cannot scan
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("invalid root {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: &'static str },
}

/// Why a single maintenance command did not succeed
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("could not start command: {0}")]
    Spawn(#[source] io::Error),

    #[error("could not wait for command: {0}")]
    Wait(#[source] io::Error),

    #[error("command exited with {}{}", exit_label(*code), stderr_suffix(stderr))]
    Exit { code: Option<i32>, stderr: String },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// A cleanup run stopped before processing every repository
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("cleanup cancelled after {completed} of {total} repositories")]
    Cancelled { completed: usize, total: usize },

    #[error("cleanup of {} failed after {completed} of {total} repositories: {source}", repository.display())]
    Failed {
        repository: PathBuf,
        completed: usize,
        total: usize,
        #[source]
        source: CommandFailure,
    },

    #[error("this session already ran a cleanup; rescan to measure a fresh baseline")]
    AlreadyRun,
}

impl CleanupError {
    /// True when the run stopped because cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CleanupError::Cancelled { .. })
    }

    /// Repositories that finished before the interruption
    pub fn completed(&self) -> usize {
        match self {
            CleanupError::Cancelled { completed, .. } | CleanupError::Failed { completed, .. } => {
                *completed
            }
            CleanupError::AlreadyRun => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_failure_message() {
        let failure = CommandFailure::Exit {
            code: Some(128),
            stderr: "fatal: not a git repository\n".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "command exited with status 128: fatal: not a git repository"
        );

        let signalled = CommandFailure::Exit { code: None, stderr: String::new() };
        assert_eq!(signalled.to_string(), "command exited with no status (terminated by signal)");
    }

    #[test]
    fn test_cancelled_is_distinct_from_failed() {
        let cancelled = CleanupError::Cancelled { completed: 2, total: 5 };
        let failed = CleanupError::Failed {
            repository: PathBuf::from("/r/three"),
            completed: 2,
            total: 5,
            source: CommandFailure::Exit { code: Some(1), stderr: String::new() },
        };

        assert!(cancelled.is_cancelled());
        assert!(!failed.is_cancelled());
        assert_eq!(cancelled.completed(), 2);
        assert_eq!(failed.completed(), 2);
        assert_eq!(cancelled.to_string(), "cleanup cancelled after 2 of 5 repositories");
        assert!(!CleanupError::AlreadyRun.is_cancelled());
        assert_eq!(CleanupError::AlreadyRun.completed(), 0);
    }
}
