//! Settings from `<config_dir>/gitsweep/config.json`, overridden by CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cleaner::{default_command_line, ProcessCommand};
use crate::cli::Cli;
use crate::scanner::DEFAULT_MARKER;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Metadata directory name that marks a repository root
    pub marker: String,
    /// Maintenance command as program + arguments
    pub command: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            command: default_command_line(),
        }
    }
}

impl Settings {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gitsweep").join("config.json"))
    }

    /// Read settings from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from the default location and apply command line overrides
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        settings.apply_cli(cli)?;
        Ok(settings)
    }

    pub fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(marker) = &cli.marker {
            self.marker = marker.clone();
        }
        if let Some(line) = &cli.command {
            self.command = shell_words::split(line)
                .with_context(|| format!("Could not parse --command: {}", line))?;
        }
        self.validate()
    }

    pub fn maintenance_command(&self) -> Result<ProcessCommand> {
        ProcessCommand::from_argv(self.command.clone()).context("Maintenance command is empty")
    }

    fn validate(&self) -> Result<()> {
        if self.marker.is_empty() || self.marker.contains(['/', '\\']) {
            anyhow::bail!("Marker must be a plain directory name, got {:?}", self.marker);
        }
        if self.command.is_empty() {
            anyhow::bail!("Maintenance command is empty");
        }
        Ok(())
    }
}
