// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types
//!
//! External collaborators (frecency oracle, shortpath, picker) fail softly:
//! callers turn a [`ToolError`] into a fallback and a log line. Only
//! configuration problems are allowed to reach the user as hard errors.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failure while running an external line-oriented tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("'{tool}' was not found on PATH")]
    NotFound { tool: String },

    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}")]
    Failed { tool: String, status: ExitStatus },

    #[error("'{tool}' returned {actual} lines for {expected} inputs")]
    LineCountMismatch {
        tool: String,
        expected: usize,
        actual: usize,
    },
}

impl ToolError {
    /// True when the tool is simply not installed, which is not worth a warning
    pub fn is_not_found(&self) -> bool {
        matches!(self, ToolError::NotFound { .. })
    }
}

/// Failure while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse config file '{}': {source}\n\n\
         Suggestion: check the TOML syntax, or unset WL_CONFIG to use defaults.",
        .path.display()
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
