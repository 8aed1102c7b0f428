// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate discovery over the worktree and source trees

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::candidate::{sort_by_score, Candidate};
use crate::scan::frecency::FrecencyTable;
use crate::utils::{clean_path, file_name_lossy};

/// The two trees scanned for candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// `<root>/<worktree>/src/areas/<category>/<project>`
    pub worktrees: PathBuf,
    /// `<root>/<site>/<owner>/<repo>`
    pub sources: PathBuf,
}

/// Discover every candidate and order it by base score, highest first.
///
/// Missing roots contribute nothing. Within a level entries are visited in
/// file-name order, and the sort is stable, so equal scores keep that order.
pub fn scan(
    roots: &Roots,
    frecency: &FrecencyTable,
    current_worktree: Option<&str>,
) -> Vec<Candidate> {
    let mut candidates = scan_worktrees(&roots.worktrees, frecency, current_worktree);
    candidates.extend(scan_sources(&roots.sources, frecency));
    sort_by_score(&mut candidates);
    tracing::debug!("scanned {} candidates", candidates.len());
    candidates
}

/// Worktree name for `cwd`: the first segment below the worktree root, which
/// is the segment after `trees` for the default root but also holds for a
/// configured root with another name.
/// `None` when `cwd` is not strictly inside the root.
pub fn current_worktree(worktree_root: &Path, cwd: &Path) -> Option<String> {
    let relative = cwd.strip_prefix(worktree_root).ok()?;
    relative
        .components()
        .next()
        .map(|segment| segment.as_os_str().to_string_lossy().into_owned())
}

fn scan_worktrees(
    root: &Path,
    frecency: &FrecencyTable,
    current_worktree: Option<&str>,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for worktree_dir in subdirectories(root, 1) {
        let worktree = file_name_lossy(&worktree_dir);
        let areas = worktree_dir.join("src").join("areas");
        if !areas.is_dir() {
            continue;
        }

        for project_dir in subdirectories(&areas, 2) {
            let path = clean_path(&project_dir);
            let project = file_name_lossy(&path);
            let score = frecency.score(&path);
            candidates.push(Candidate::worktree_project(
                path,
                &worktree,
                &project,
                score,
                current_worktree,
            ));
        }
    }
    candidates
}

fn scan_sources(root: &Path, frecency: &FrecencyTable) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for repo_dir in subdirectories(root, 3) {
        if !repo_dir.join(".git").exists() {
            continue;
        }
        let path = clean_path(&repo_dir);
        let Some([site, owner, repo]) = trailing_segments::<3>(&path) else {
            continue;
        };
        let score = frecency.score(&path);
        candidates.push(Candidate::source_repo(path, &site, &owner, &repo, score));
    }
    candidates
}

/// Non-hidden directories exactly `depth` levels below `root`, in file-name
/// order. Directory symlinks are followed; unreadable entries are skipped.
fn subdirectories(root: &Path, depth: usize) -> Vec<PathBuf> {
    if !root.is_dir() {
        tracing::debug!("skipping missing root {}", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .min_depth(depth)
        .max_depth(depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir() && !has_hidden_segment(root, entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn has_hidden_segment(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .map(|relative| {
            relative
                .components()
                .any(|segment| segment.as_os_str().to_string_lossy().starts_with('.'))
        })
        .unwrap_or(false)
}

fn trailing_segments<const N: usize>(path: &Path) -> Option<[String; N]> {
    let mut segments: Vec<String> = path
        .components()
        .rev()
        .take(N)
        .map(|segment| segment.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.len() != N {
        return None;
    }
    segments.reverse();
    segments.try_into().ok()
}
