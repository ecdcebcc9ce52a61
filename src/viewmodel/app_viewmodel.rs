use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cleaner::{CleanupSession, ProgressUpdate};
use crate::error::CleanupError;
use crate::input::Intent;
use crate::model::CleaningReport;
use super::{RepositoriesViewModel, Selectable};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    Scanning,
    Repositories,
    Cleaning,
    Report,
    Error,
}

/// Action for the event loop to carry out after an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Redraw,
    StartCleanup,
    CancelCleanup,
    Rescan,
    Quit,
}

/// Messages sent by the background worker to the UI loop
pub enum WorkerEvent {
    Scanned(Arc<CleanupSession>),
    ScanFailed(String),
    Progress(ProgressUpdate),
    Finished(Result<CleaningReport, CleanupError>),
}

/// Main application ViewModel
pub struct AppViewModel {
    view_mode: ViewMode,
    root: PathBuf,
    session: Option<Arc<CleanupSession>>,
    pub repos_vm: RepositoriesViewModel,
    progress: ProgressUpdate,
    cancel_requested: bool,
    report: Option<CleaningReport>,
    message: Option<String>,
}

impl AppViewModel {
    pub fn new(root: &Path) -> Self {
        Self {
            view_mode: ViewMode::Scanning,
            root: root.to_path_buf(),
            session: None,
            repos_vm: RepositoriesViewModel::empty(),
            progress: ProgressUpdate::new(0, 0),
            cancel_requested: false,
            report: None,
            message: None,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session(&self) -> Option<&Arc<CleanupSession>> {
        self.session.as_ref()
    }

    pub fn progress(&self) -> ProgressUpdate {
        self.progress
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    pub fn report(&self) -> Option<&CleaningReport> {
        self.report.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_cleaning(&self) -> bool {
        self.view_mode == ViewMode::Cleaning
    }

    /// Apply a message from the worker
    pub fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Scanned(session) => {
                self.repos_vm = RepositoriesViewModel::new(session.repositories(), session.before());
                self.root = session.root().to_path_buf();
                self.session = Some(session);
                self.view_mode = ViewMode::Repositories;
            }
            WorkerEvent::ScanFailed(message) => {
                self.message = Some(message);
                self.view_mode = ViewMode::Error;
            }
            WorkerEvent::Progress(update) => {
                // Updates arrive in order; ignore anything stale
                if update.completed >= self.progress.completed || update.total != self.progress.total {
                    self.progress = update;
                }
            }
            WorkerEvent::Finished(Ok(report)) => {
                self.progress = ProgressUpdate::new(report.repositories_cleaned, report.repositories_cleaned);
                self.report = Some(report);
                self.message = None;
                self.view_mode = ViewMode::Report;
            }
            WorkerEvent::Finished(Err(e)) => {
                let message = if e.is_cancelled() {
                    format!("Cleanup cancelled. {}", e)
                } else {
                    format!("Cleanup failed. {}", e)
                };
                self.message = Some(message);
                self.view_mode = ViewMode::Error;
            }
        }
    }

    /// Handle a user intent and return the action to take
    pub fn handle_intent(&mut self, intent: Intent) -> Action {
        match intent {
            Intent::Quit => Action::Quit,

            Intent::MoveUp => {
                if self.view_mode == ViewMode::Repositories {
                    self.repos_vm.move_up();
                }
                Action::Redraw
            }

            Intent::MoveDown => {
                if self.view_mode == ViewMode::Repositories {
                    self.repos_vm.move_down();
                }
                Action::Redraw
            }

            Intent::StartCleanup => {
                if self.view_mode != ViewMode::Repositories {
                    return Action::Redraw;
                }
                match &self.session {
                    None => return Action::Redraw,
                    // The baseline of a used session is stale; measure again first
                    Some(session) if session.is_spent() => return self.rescan(),
                    Some(_) => {}
                }
                self.progress = ProgressUpdate::new(0, self.repos_vm.len());
                self.cancel_requested = false;
                self.report = None;
                self.message = None;
                self.view_mode = ViewMode::Cleaning;
                Action::StartCleanup
            }

            Intent::Cancel => {
                if self.view_mode != ViewMode::Cleaning || self.cancel_requested {
                    return Action::Redraw;
                }
                self.cancel_requested = true;
                Action::CancelCleanup
            }

            Intent::Rescan => {
                if matches!(self.view_mode, ViewMode::Scanning | ViewMode::Cleaning) {
                    return Action::Redraw;
                }
                self.rescan()
            }

            Intent::Dismiss => {
                if matches!(self.view_mode, ViewMode::Report | ViewMode::Error) {
                    self.view_mode = if self.session.is_some() {
                        ViewMode::Repositories
                    } else {
                        ViewMode::Error
                    };
                }
                Action::Redraw
            }
        }
    }

    fn rescan(&mut self) -> Action {
        self.session = None;
        self.repos_vm = RepositoriesViewModel::empty();
        self.report = None;
        self.message = None;
        self.view_mode = ViewMode::Scanning;
        Action::Rescan
    }

    /// Get the ViewMode as input::ViewMode for key mapping
    pub fn input_view_mode(&self) -> crate::input::ViewMode {
        match self.view_mode {
            ViewMode::Scanning => crate::input::ViewMode::Busy,
            ViewMode::Repositories => crate::input::ViewMode::Repositories,
            ViewMode::Cleaning => crate::input::ViewMode::Cleaning,
            ViewMode::Report | ViewMode::Error => crate::input::ViewMode::Outcome,
        }
    }
}
