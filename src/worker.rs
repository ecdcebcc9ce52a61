//! Background workers for the interactive front-end
//!
//! Discovery and cleanup block on the filesystem and on child processes, so
//! they run on tokio's blocking pool and report back through a channel. Every
//! handle is kept so that shutting down waits for work in flight instead of
//! leaving it to the runtime's drop.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cleaner::{CancellationToken, CleanupSession, MaintenanceCommand};
use crate::viewmodel::WorkerEvent;

/// Handles of the scan and cleanup workers started by the UI
pub struct Workers {
    tx: UnboundedSender<WorkerEvent>,
    scans: Vec<JoinHandle<()>>,
    cleanup: Option<(JoinHandle<()>, CancellationToken)>,
}

impl Workers {
    pub fn new(tx: UnboundedSender<WorkerEvent>) -> Self {
        Self {
            tx,
            scans: Vec::new(),
            cleanup: None,
        }
    }

    /// Open a session for `root` and send `Scanned` or `ScanFailed`
    pub fn scan(&mut self, root: PathBuf, marker: String) {
        self.scans.retain(|h| !h.is_finished());
        let tx = self.tx.clone();
        self.scans.push(tokio::task::spawn_blocking(move || {
            let event = match CleanupSession::open(&root, &marker) {
                Ok(session) => {
                    session.repositories();
                    WorkerEvent::Scanned(Arc::new(session))
                }
                Err(e) => WorkerEvent::ScanFailed(e.to_string()),
            };
            let _ = tx.send(event);
        }));
    }

    /// Run the cleanup of `session`, streaming progress and the outcome
    pub fn clean(&mut self, session: Arc<CleanupSession>, command: Arc<dyn MaintenanceCommand>) {
        if self.cleanup.as_ref().is_some_and(|(h, _)| !h.is_finished()) {
            warn!("cleanup already running, ignoring request");
            return;
        }
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        let tx = self.tx.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let progress_tx = tx.clone();
            let result = session.run(
                command.as_ref(),
                |update| {
                    let _ = progress_tx.send(WorkerEvent::Progress(update));
                },
                &worker_cancel,
            );
            let _ = tx.send(WorkerEvent::Finished(result));
        });
        self.cleanup = Some((handle, cancel));
    }

    /// Ask the running cleanup to stop before its next repository
    pub fn cancel(&self) {
        if let Some((_, cancel)) = &self.cleanup {
            cancel.cancel();
        }
    }

    /// Cancel the cleanup and wait for every worker to return
    ///
    /// `notify` is called once with a message for the user when there is
    /// something to wait for.
    pub async fn shutdown(self, notify: impl FnOnce(&str)) {
        let cleaning = self.cleanup.as_ref().is_some_and(|(h, _)| !h.is_finished());
        let scanning = self.scans.iter().any(|h| !h.is_finished());
        if cleaning {
            notify("Waiting for the running maintenance command to finish...");
        } else if scanning {
            notify("Waiting for the repository scan to finish...");
        }

        if let Some((handle, cancel)) = self.cleanup {
            cancel.cancel();
            if let Err(e) = handle.await {
                warn!(error = %e, "cleanup worker panicked");
            }
        }
        for handle in self.scans {
            if let Err(e) = handle.await {
                warn!(error = %e, "scan worker panicked");
            }
        }
        debug!("workers stopped");
    }
}
