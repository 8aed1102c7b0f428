// SPDX-License-Identifier: MIT OR Apache-2.0

//! wl - worktree and repository navigator
//!
//! Lists, filters or interactively picks candidate directories from the
//! worktree and source trees, ranked by frecency and fuzzy match quality.

mod cli;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Mode};
use tracing_subscriber::EnvFilter;

use wl::config::Config;
use wl::context::NavContext;
use wl::nav::{self, shell_init};
use wl::selfcheck;

const LOG_ENV: &str = "WL_LOG";

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.mode() {
        Mode::Completions(shell) => {
            clap_complete::generate(shell, &mut Cli::command(), "wl", &mut io::stdout());
            Ok(())
        }
        Mode::ShellInit(shell) => {
            let exe = current_exe()?;
            let name = cli
                .function_name
                .as_deref()
                .unwrap_or(shell_init::DEFAULT_FUNCTION_NAME);
            let snippet = shell_init::render(shell, &exe.to_string_lossy(), name)?;
            print!("{snippet}");
            Ok(())
        }
        Mode::List => {
            let ctx = capture_context(&cli)?;
            ignore_broken_pipe(nav::list(&ctx, cli.scores, &mut io::stdout().lock()))
                .context("Failed to write candidate list")
        }
        Mode::Filter(query) => {
            let ctx = capture_context(&cli)?;
            ignore_broken_pipe(nav::filter(&ctx, &query, cli.scores, &mut io::stdout().lock()))
                .context("Failed to write filtered candidates")
        }
        Mode::SelfTest => {
            let ctx = capture_context(&cli)?;
            selfcheck::run(&ctx, &mut io::stdout().lock())
        }
        Mode::Navigate(query) => {
            let ctx = capture_context(&cli)?;
            let exe = current_exe()?;
            let mut out = io::stdout().lock();
            for path in nav::navigate(&ctx, &query, cli.multi, &exe) {
                writeln!(out, "{}", path.display()).context("Failed to write selection")?;
            }
            Ok(())
        }
    }
}

fn capture_context(cli: &Cli) -> Result<NavContext> {
    let config = Config::load(cli.config.as_deref())?;
    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let home = dirs::home_dir();
    Ok(NavContext::capture(
        &config,
        cli.config.clone(),
        cwd,
        home.as_deref(),
        cli.height.as_deref(),
    ))
}

fn current_exe() -> Result<std::path::PathBuf> {
    std::env::current_exe().context("Failed to locate the wl executable")
}

/// The picker closes the pipe whenever the query changes mid-reload.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
