//! Repository cleanup
//!
//! # Architecture
//!
//! - **command**: the external maintenance command (trait + process runner)
//! - **cancel**: cooperative cancellation token
//! - **progress**: progress updates and terminal reporters
//! - **orchestrator**: strictly sequential per-repository loop
//! - **session**: root validation, cached discovery, before/after snapshots

mod cancel;
mod command;
mod orchestrator;
mod progress;
mod session;

pub use cancel::CancellationToken;
pub use command::{default_command_line, MaintenanceCommand, ProcessCommand};
pub use orchestrator::CleanupOrchestrator;
pub use progress::{
    spinner, IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter, ProgressUpdate,
};
pub use session::CleanupSession;
