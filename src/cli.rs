use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitsweep", about = "Find git repositories and reclaim disk space with git gc")]
pub struct Cli {
    /// Directory to search for repositories
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Only list the repositories found, do not clean
    #[arg(long)]
    pub list: bool,

    /// Plain console output instead of the interactive UI
    #[arg(long)]
    pub no_tui: bool,

    /// Clean without asking (console mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Print the cleaning report as JSON (console mode)
    #[arg(long)]
    pub json: bool,

    /// Maintenance command run inside each repository
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Name of the metadata directory that marks a repository
    #[arg(long, value_name = "NAME")]
    pub marker: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Console mode is implied by options that only make sense without the UI
    pub fn console_mode(&self) -> bool {
        self.no_tui || self.list || self.json || self.yes
    }
}
