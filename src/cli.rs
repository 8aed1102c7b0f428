// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use wl::nav::shell_init::InitShell;

/// wl - jump between worktree projects and source repositories
///
/// Without a mode flag, opens an interactive picker and prints the chosen path.
#[derive(Parser, Debug)]
#[command(name = "wl")]
#[command(
    author,
    version,
    about,
    long_about = None,
    override_usage = "wl [OPTIONS] [QUERY]...",
    after_help = "Examples:\n  wl web            open the picker with an initial query\n  wl --list --scores\n  wl --filter wf    ranked `display<TAB>path` lines\n  wl --shell-init fish | source\n\nLogging: set WL_LOG=debug for diagnostics on stderr."
)]
pub struct Cli {
    /// List all candidates in base-score order
    #[arg(long, conflicts_with_all = ["filter", "test"])]
    pub list: bool,

    /// Filter candidates by QUERY (picker reload callback)
    #[arg(long, value_name = "QUERY", allow_hyphen_values = true, conflicts_with = "test")]
    pub filter: Option<String>,

    /// Include scores in output
    #[arg(long)]
    pub scores: bool,

    /// Run the built-in self checks
    #[arg(long)]
    pub test: bool,

    /// Select several paths in the picker, one printed per line
    #[arg(long)]
    pub multi: bool,

    /// Picker height (e.g. '40%', '20', '100%')
    #[arg(long, value_name = "HEIGHT")]
    pub height: Option<String>,

    /// Configuration file (defaults to $WL_CONFIG or ~/.config/wl/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a shell function that changes into the selected path
    #[arg(long, value_enum, value_name = "SHELL")]
    pub shell_init: Option<InitShell>,

    /// Name of the function printed by --shell-init
    #[arg(long, value_name = "NAME", requires = "shell_init")]
    pub function_name: Option<String>,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Initial query for the picker
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Filter(String),
    SelfTest,
    ShellInit(InitShell),
    Completions(Shell),
    Navigate(String),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(shell) = self.completions {
            Mode::Completions(shell)
        } else if let Some(shell) = self.shell_init {
            Mode::ShellInit(shell)
        } else if self.list {
            Mode::List
        } else if self.test {
            Mode::SelfTest
        } else if let Some(query) = &self.filter {
            Mode::Filter(query.clone())
        } else {
            Mode::Navigate(self.query.join(" "))
        }
    }
}
