// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frecency scores read from an external directory jumper (`zoxide query -ls`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::ToolError;
use crate::process;
use crate::utils::clean_path;

const QUERY_ARGS: &[&str] = &["query", "-ls"];

/// Cleaned path to frecency score. Paths without an entry score 0.
#[derive(Debug, Clone, Default)]
pub struct FrecencyTable {
    scores: HashMap<PathBuf, f64>,
}

impl FrecencyTable {
    /// Run the oracle once and parse its output. Never fails: a missing or
    /// broken oracle yields an empty table.
    pub fn load(command: &str) -> Self {
        match Self::try_load(command) {
            Ok(table) => {
                tracing::debug!("loaded {} frecency entries from {command}", table.len());
                table
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!("frecency disabled: {err}");
                Self::default()
            }
            Err(err) => {
                tracing::warn!("frecency disabled: {err}");
                Self::default()
            }
        }
    }

    fn try_load(command: &str) -> Result<Self, ToolError> {
        let program = process::locate(command)?;
        let output = process::capture(&program, QUERY_ARGS, None)?;
        Ok(Self::parse(&output))
    }

    /// Parse `<score> <path>` lines. The path is everything after the first
    /// whitespace run, so it may contain spaces. Later lines replace earlier
    /// ones for the same path.
    pub fn parse(output: &str) -> Self {
        let mut scores = HashMap::new();
        for line in output.lines() {
            let line = line.trim();
            let Some((score, path)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let path = path.trim_start();
            if path.is_empty() {
                continue;
            }
            let Ok(score) = score.parse::<f64>() else {
                tracing::debug!("skipping frecency line with bad score: {line}");
                continue;
            };
            scores.insert(clean_path(Path::new(path)), score);
        }
        Self { scores }
    }

    pub fn score(&self, path: &Path) -> f64 {
        self.scores.get(path).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<(PathBuf, f64)> for FrecencyTable {
    fn from_iter<I: IntoIterator<Item = (PathBuf, f64)>>(iter: I) -> Self {
        Self {
            scores: iter
                .into_iter()
                .map(|(path, score)| (clean_path(&path), score))
                .collect(),
        }
    }
}
