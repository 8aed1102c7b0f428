// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation candidates

use std::cmp::Ordering;
use std::path::PathBuf;

/// Boost for every project in the worktree the shell is currently in
pub const CURRENT_WORKTREE_BOOST: f64 = 2000.0;
/// Offset applied to source repositories so worktree projects win ties
pub const SOURCE_REPO_OFFSET: f64 = -500.0;

/// Where a candidate was discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// `<worktree root>/<worktree>/src/areas/<category>/<project>`
    Worktree { worktree: String, project: String },
    /// `<source root>/<site>/<owner>/<repo>` containing `.git`
    SourceRepo,
}

/// One directory eligible for navigation
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Absolute, lexically clean directory path
    pub path: PathBuf,
    /// Label shown in the picker
    pub display: String,
    /// Base relevance: frecency plus heuristic boosts
    pub score: f64,
    pub origin: Origin,
}

impl Candidate {
    pub fn worktree_project(
        path: PathBuf,
        worktree: &str,
        project: &str,
        frecency: f64,
        current_worktree: Option<&str>,
    ) -> Self {
        let boost = if current_worktree == Some(worktree) {
            CURRENT_WORKTREE_BOOST
        } else {
            0.0
        };
        Self {
            path,
            display: format!("+{worktree}//{project}"),
            score: frecency + boost,
            origin: Origin::Worktree {
                worktree: worktree.to_string(),
                project: project.to_string(),
            },
        }
    }

    pub fn source_repo(path: PathBuf, site: &str, owner: &str, repo: &str, frecency: f64) -> Self {
        Self {
            path,
            display: format!("~{site}/{owner}/{repo}"),
            score: frecency + SOURCE_REPO_OFFSET,
            origin: Origin::SourceRepo,
        }
    }
}

/// Descending base-score order. Stable sorts keep discovery order for ties.
pub fn sort_by_score(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| descending(a.score, b.score));
}

/// Total descending order over scores, NaN included
pub fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worktree_template_and_boost() {
        let here = Candidate::worktree_project(
            PathBuf::from("/t/root/src/areas/clients/web"),
            "root",
            "web",
            12.5,
            Some("root"),
        );
        let elsewhere = Candidate::worktree_project(
            PathBuf::from("/t/other/src/areas/clients/web"),
            "other",
            "web",
            12.5,
            Some("root"),
        );
        assert_eq!(here.display, "+root//web");
        assert_eq!(here.score - elsewhere.score, 2000.0);
    }

    #[test]
    fn source_repo_template_and_offset() {
        let repo = Candidate::source_repo(
            PathBuf::from("/s/github.com/o/r"),
            "github.com",
            "o",
            "r",
            42.0,
        );
        assert_eq!(repo.display, "~github.com/o/r");
        assert_eq!(repo.score, -458.0);
        assert_eq!(repo.origin, Origin::SourceRepo);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut candidates = vec![
            Candidate::source_repo(PathBuf::from("/a"), "s", "o", "a", 0.0),
            Candidate::source_repo(PathBuf::from("/b"), "s", "o", "b", 10.0),
            Candidate::source_repo(PathBuf::from("/c"), "s", "o", "c", 0.0),
        ];
        sort_by_score(&mut candidates);
        let order: Vec<_> = candidates.iter().map(|c| c.display.as_str()).collect();
        assert_eq!(order, ["~s/o/b", "~s/o/a", "~s/o/c"]);

        let mut empty: Vec<Candidate> = Vec::new();
        sort_by_score(&mut empty);
        assert!(empty.is_empty());
    }
}
