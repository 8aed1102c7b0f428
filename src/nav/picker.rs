// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive picker (fzf) invocation
//!
//! The picker starts with its own matcher disabled and reloads its list from
//! `wl --filter {q}` on start and on every query change, so all filtering and
//! ranking stays on our side.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::CONFIG_ENV;

const HOMEBREW_FZF: &str = "/opt/homebrew/bin/fzf";

/// Picker executable and presentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSettings {
    pub program: PathBuf,
    pub height: String,
}

/// Prefer a Homebrew fzf, then PATH, then the bare name for spawn-time lookup
pub fn locate_picker(command: &str) -> PathBuf {
    if command == "fzf" && Path::new(HOMEBREW_FZF).is_file() {
        return PathBuf::from(HOMEBREW_FZF);
    }
    which::which(command).unwrap_or_else(|_| PathBuf::from(command))
}

/// One picker invocation
#[derive(Debug, Clone)]
pub struct PickerRequest<'a> {
    pub settings: &'a PickerSettings,
    /// This executable, re-invoked for every reload
    pub exe: &'a Path,
    /// Placeholder text shown while the query is empty
    pub ghost: &'a str,
    pub query: &'a str,
    /// Allow selecting several lines
    pub multi: bool,
    pub config_path: Option<&'a Path>,
}

impl PickerRequest<'_> {
    /// Argument list, one token per element. Nothing here passes through a
    /// shell except the reload action, which fzf runs itself.
    pub fn args(&self) -> Vec<OsString> {
        let reload = reload_action(self.exe);
        let mut args: Vec<OsString> = vec![
            format!("--height={}", self.settings.height).into(),
            "--layout=reverse".into(),
            format!("--ghost={}", self.ghost).into(),
            "--with-nth=1".into(),
            "--delimiter=\t".into(),
            "--disabled".into(),
            "--bind".into(),
            format!("change:{reload}").into(),
            "--bind".into(),
            format!("start:{reload}").into(),
        ];
        if self.multi {
            args.push("--multi".into());
        }
        if !self.query.is_empty() {
            args.push("--query".into());
            args.push(self.query.into());
        }
        args
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.settings.program);
        command.args(self.args());
        if let Some(config_path) = self.config_path {
            command.env(CONFIG_ENV, config_path);
        }
        command
    }
}

/// `reload:<exe> --filter {q}`; fzf substitutes `{q}` already quoted.
pub fn reload_action(exe: &Path) -> String {
    let exe = exe.to_string_lossy();
    let quoted = shlex::try_quote(&exe).unwrap_or_else(|_| exe.clone());
    format!("reload:{quoted} --filter {{q}}")
}

/// Path fields of the picker's chosen `display<TAB>path` lines.
/// Lines without a non-empty path field are skipped.
pub fn parse_selections(output: &str) -> Vec<PathBuf> {
    output.lines().filter_map(parse_selection).collect()
}

fn parse_selection(line: &str) -> Option<PathBuf> {
    let mut fields = line.split('\t');
    let _display = fields.next()?;
    let path = fields.next()?.trim_end();
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}
