// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in self check (`wl --test`)
//!
//! Exercises worktree detection, the live scan and the ranking model against
//! a fixed candidate set, printing one dot per passing check.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;

use crate::candidate::{Candidate, Origin};
use crate::context::NavContext;
use crate::query::{rank, RankedCandidate};
use crate::scan::current_worktree;

/// Fixed candidate set used by the ranking checks
pub fn sample_candidates() -> Vec<Candidate> {
    [
        ("+root//web-frontend", 2000.0, "/path1"),
        ("+other//web-frontend", 0.0, "/path2"),
        ("+random-fixes//platform", 0.0, "/path3"),
        ("~github.com/Platform/web-frontend", -500.0, "/path4"),
        ("~github.com/rygwdn/gt-mcp", -500.0, "/path5"),
        ("+root//platform", 2000.0, "/path6"),
    ]
    .into_iter()
    .map(|(display, score, path)| Candidate {
        path: PathBuf::from(path),
        display: display.to_string(),
        score,
        origin: if display.starts_with('~') {
            Origin::SourceRepo
        } else {
            let (worktree, project) = display
                .trim_start_matches('+')
                .split_once("//")
                .unwrap_or_default();
            Origin::Worktree {
                worktree: worktree.to_string(),
                project: project.to_string(),
            }
        },
    })
    .collect()
}

struct Checker<'a, W: Write> {
    out: &'a mut W,
    passed: usize,
}

impl<W: Write> Checker<'_, W> {
    fn check(&mut self, condition: bool, message: &str) -> Result<()> {
        if !condition {
            writeln!(self.out)?;
            bail!("FAILED: {message}");
        }
        write!(self.out, "{}", ".".green())?;
        self.out.flush()?;
        self.passed += 1;
        Ok(())
    }
}

fn total(ranked: &[RankedCandidate], display: &str) -> Option<f64> {
    ranked
        .iter()
        .find(|entry| entry.candidate.display == display)
        .map(|entry| entry.total_score)
}

/// Run every check, stopping at the first failure
pub fn run<W: Write>(ctx: &NavContext, out: &mut W) -> Result<()> {
    writeln!(out, "Running self checks...")?;
    let mut checker = Checker {
        out: &mut *out,
        passed: 0,
    };

    let inside = ctx
        .roots
        .worktrees
        .join("test-tree/src/areas/clients/frontend");
    checker.check(
        current_worktree(&ctx.roots.worktrees, &inside).as_deref() == Some("test-tree"),
        "should extract worktree name",
    )?;
    checker.check(
        current_worktree(&ctx.roots.worktrees, std::path::Path::new("/home/user/projects"))
            .is_none(),
        "should return nothing for a non-worktree path",
    )?;

    let live = ctx.candidates();
    checker.check(
        live.windows(2).all(|pair| pair[0].score >= pair[1].score),
        "candidates should be sorted by score descending",
    )?;
    checker.check(
        live.iter().all(|c| c.path.is_absolute() && !c.display.is_empty()),
        "candidates should have absolute paths and display names",
    )?;

    let wf = rank(sample_candidates(), "wf");
    let frontend = wf
        .iter()
        .filter(|entry| entry.candidate.display.contains("web-frontend"))
        .count();
    checker.check(frontend == 3, "should match every web-frontend for \"wf\"")?;
    checker.check(
        wf.first()
            .is_some_and(|entry| entry.candidate.display == "+root//web-frontend"),
        "should prioritize the current worktree",
    )?;
    let (root, other, github) = (
        total(&wf, "+root//web-frontend"),
        total(&wf, "+other//web-frontend"),
        total(&wf, "~github.com/Platform/web-frontend"),
    );
    checker.check(
        matches!((root, other), (Some(root), Some(other)) if root > other),
        "current worktree should score higher",
    )?;
    checker.check(
        matches!((other, github), (Some(other), Some(github)) if other > github),
        "worktrees should score higher than source repositories",
    )?;

    let frontend = rank(sample_candidates(), "frontend");
    checker.check(
        frontend.len() == 3
            && frontend
                .iter()
                .all(|entry| entry.candidate.display.contains("frontend")),
        "should find exactly the web-frontend entries for \"frontend\"",
    )?;

    let plat = rank(sample_candidates(), "plat");
    checker.check(
        plat.iter()
            .any(|entry| entry.candidate.display.contains("platform"))
            && plat
                .iter()
                .any(|entry| entry.candidate.display.contains("Platform")),
        "should match platform case-insensitively",
    )?;

    checker.check(
        rank(sample_candidates(), "xyz").is_empty(),
        "should return nothing for \"xyz\"",
    )?;

    checker.check(
        rank(sample_candidates(), "rf")
            .iter()
            .any(|entry| entry.candidate.display.contains("random-fixes")),
        "should match random-fixes by word boundaries",
    )?;

    let passed = checker.passed;
    writeln!(out, "\n{} All {passed} checks passed!", "✓".green())?;
    Ok(())
}
