// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for wl
//!
//! Loads configuration from `$WL_CONFIG` or ~/.config/wl/config.toml.
//! Every key is optional; the defaults reproduce the fixed home-relative layout.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::utils::{clean_path, expand_home};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "WL_CONFIG";

pub const DEFAULT_WORKTREE_ROOT: &str = "~/world/trees";
pub const DEFAULT_SOURCE_ROOT: &str = "~/src";
pub const DEFAULT_FRECENCY_COMMAND: &str = "zoxide";
pub const DEFAULT_SHORTPATH_COMMAND: &str = "shortpath";
pub const DEFAULT_PICKER_COMMAND: &str = "fzf";
pub const DEFAULT_PICKER_HEIGHT: &str = "40%";

/// Configuration loaded from `$WL_CONFIG` or ~/.config/wl/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the worktree tree (`<root>/<worktree>/src/areas/<category>/<project>`)
    pub worktree_root: Option<String>,
    /// Root of the source tree (`<root>/<site>/<owner>/<repo>`)
    pub source_root: Option<String>,
    /// Frecency oracle executable
    pub frecency_command: Option<String>,
    /// Display-name resolver executable
    pub shortpath_command: Option<String>,
    /// Interactive picker executable
    pub picker_command: Option<String>,
    /// Picker height passed through as `--height`
    pub picker_height: Option<String>,
}

impl Config {
    /// Load configuration
    ///
    /// Precedence (highest to lowest):
    /// 1. `explicit` (from `--config`)
    /// 2. `$WL_CONFIG`
    /// 3. ~/.config/wl/config.toml
    ///
    /// Explicitly named files must exist and parse. The implicit home file is
    /// optional and a parse failure there only produces a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_required(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::load_required(Path::new(&path));
        }

        if let Some(path) = Self::default_path() {
            if path.is_file() {
                match Self::load_required(&path) {
                    Ok(config) => return Ok(config),
                    Err(err) => tracing::warn!("{err}; using defaults"),
                }
            }
        }

        Ok(Self::default())
    }

    /// ~/.config/wl/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("wl").join("config.toml"))
    }

    fn load_required(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn worktree_root(&self, home: Option<&Path>) -> PathBuf {
        resolve_root(self.worktree_root.as_deref(), DEFAULT_WORKTREE_ROOT, home)
    }

    pub fn source_root(&self, home: Option<&Path>) -> PathBuf {
        resolve_root(self.source_root.as_deref(), DEFAULT_SOURCE_ROOT, home)
    }

    pub fn frecency_command(&self) -> &str {
        self.frecency_command
            .as_deref()
            .unwrap_or(DEFAULT_FRECENCY_COMMAND)
    }

    pub fn shortpath_command(&self) -> &str {
        self.shortpath_command
            .as_deref()
            .unwrap_or(DEFAULT_SHORTPATH_COMMAND)
    }

    pub fn picker_command(&self) -> &str {
        self.picker_command.as_deref().unwrap_or(DEFAULT_PICKER_COMMAND)
    }

    /// Merge CLI height with config (CLI wins)
    pub fn merge_picker_height(&self, cli_value: Option<&str>) -> String {
        cli_value
            .or(self.picker_height.as_deref())
            .unwrap_or(DEFAULT_PICKER_HEIGHT)
            .to_string()
    }
}

fn resolve_root(configured: Option<&str>, default: &str, home: Option<&Path>) -> PathBuf {
    let raw = configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default);
    clean_path(&expand_home(raw, home))
}
