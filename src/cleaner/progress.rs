//! Progress reporting
//!
//! The orchestrator emits `ProgressUpdate`s through a plain closure; the
//! reporters here turn them into terminal output (indicatif) or nothing.

use indicatif::{ProgressBar, ProgressStyle};

/// `completed` of `total` repositories processed
///
/// Within one run `total` is constant and `completed` never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
}

impl ProgressUpdate {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Fraction in `0.0..=1.0`; an empty run counts as done
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// A handle to an active progress display
pub trait ProgressHandle: Send + Sync {
    fn update(&self, update: ProgressUpdate);
    fn finish(&self);
}

/// Factory for creating progress handles
pub trait ProgressReporter: Send + Sync {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle>;
}

/// Indicatif-based progress reporter for console usage
pub struct IndicatifProgress;

impl ProgressReporter for IndicatifProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle> {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "{{spinner:.green}} {}: [{{bar:50.cyan/blue}}] {{pos}}/{{len}} ({{elapsed}})",
                    label
                ))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Box::new(IndicatifHandle(pb))
    }
}

struct IndicatifHandle(ProgressBar);

impl ProgressHandle for IndicatifHandle {
    fn update(&self, update: ProgressUpdate) {
        self.0.set_length(update.total as u64);
        self.0.set_position(update.completed as u64);
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}

/// Spinner shown while discovery and the first size snapshot run
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// No-op progress reporter for quiet and JSON output
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _label: &str, _total: u64) -> Box<dyn ProgressHandle> {
        Box::new(NoopHandle)
    }
}

struct NoopHandle;

impl ProgressHandle for NoopHandle {
    fn update(&self, _update: ProgressUpdate) {}
    fn finish(&self) {}
}
