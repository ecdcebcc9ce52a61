//! External maintenance command

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::CommandFailure;

/// Stderr kept in a failure message
const STDERR_TAIL: usize = 512;

/// Runs repository maintenance with its working directory at a repository root
pub trait MaintenanceCommand: Send + Sync {
    fn run(&self, repository: &Path) -> Result<(), CommandFailure>;

    /// Short description for logs and UI
    fn describe(&self) -> String {
        "maintenance command".to_string()
    }
}

impl<F> MaintenanceCommand for F
where
    F: Fn(&Path) -> Result<(), CommandFailure> + Send + Sync,
{
    fn run(&self, repository: &Path) -> Result<(), CommandFailure> {
        self(repository)
    }
}

/// Default maintenance: `git gc --aggressive --prune`
pub fn default_command_line() -> Vec<String> {
    ["git", "gc", "--aggressive", "--prune"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// A program plus arguments spawned once per repository
#[derive(Debug, Clone)]
pub struct ProcessCommand {
    program: String,
    args: Vec<String>,
}

impl Default for ProcessCommand {
    fn default() -> Self {
        Self::from_argv(default_command_line()).unwrap_or_else(|| Self {
            program: "git".to_string(),
            args: Vec::new(),
        })
    }
}

impl ProcessCommand {
    /// Returns `None` for an empty argument vector
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        let mut parts = argv.into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Parse a command line with shell quoting rules
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let argv = shell_words::split(line)?;
        Self::from_argv(argv).ok_or_else(|| anyhow::anyhow!("maintenance command is empty"))
    }
}

impl MaintenanceCommand for ProcessCommand {
    fn run(&self, repository: &Path) -> Result<(), CommandFailure> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(repository)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(CommandFailure::Spawn)?;

        let output = child.wait_with_output().map_err(CommandFailure::Wait)?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let start = stderr
            .char_indices()
            .rev()
            .nth(STDERR_TAIL.saturating_sub(1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        Err(CommandFailure::Exit {
            code: output.status.code(),
            stderr: stderr[start..].to_string(),
        })
    }

    fn describe(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(self.args.iter()))
    }
}
