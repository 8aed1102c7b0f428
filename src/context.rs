// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide state captured once at startup

use std::path::{Path, PathBuf};

use crate::candidate::Candidate;
use crate::config::Config;
use crate::nav::picker::{locate_picker, PickerSettings};
use crate::process;
use crate::scan::{self, display, current_worktree, FrecencyTable, Roots};

/// Everything an invocation reads from its environment, captured up front and
/// passed explicitly to each component.
#[derive(Debug, Clone)]
pub struct NavContext {
    pub cwd: PathBuf,
    pub roots: Roots,
    pub current_worktree: Option<String>,
    pub frecency: FrecencyTable,
    /// Display-name resolver, when installed
    pub shortpath: Option<PathBuf>,
    pub picker: PickerSettings,
    /// Explicit config file to hand down to reload invocations
    pub config_path: Option<PathBuf>,
}

impl NavContext {
    /// Capture the context: resolve roots, derive the current worktree, load
    /// frecency once and probe for the optional tools.
    pub fn capture(
        config: &Config,
        config_path: Option<PathBuf>,
        cwd: PathBuf,
        home: Option<&Path>,
        picker_height: Option<&str>,
    ) -> Self {
        let roots = Roots {
            worktrees: config.worktree_root(home),
            sources: config.source_root(home),
        };
        let current_worktree = current_worktree(&roots.worktrees, &cwd);
        let frecency = FrecencyTable::load(config.frecency_command());
        let shortpath = match process::locate(config.shortpath_command()) {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::debug!("display names stay structural: {err}");
                None
            }
        };
        let picker = PickerSettings {
            program: locate_picker(config.picker_command()),
            height: config.merge_picker_height(picker_height),
        };

        tracing::debug!(
            cwd = %cwd.display(),
            current_worktree = current_worktree.as_deref().unwrap_or("-"),
            "captured navigation context"
        );

        Self {
            cwd,
            roots,
            current_worktree,
            frecency,
            shortpath,
            picker,
            config_path,
        }
    }

    /// Fresh candidate list in base-score order, with short display names
    /// applied when the resolver is available.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut candidates = scan::scan(
            &self.roots,
            &self.frecency,
            self.current_worktree.as_deref(),
        );
        if let Some(shortpath) = &self.shortpath {
            display::shorten_display_names(shortpath, &mut candidates);
        }
        candidates
    }
}
