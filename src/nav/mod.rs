// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigator modes: list, filter (picker reload callback) and navigate

pub mod picker;
pub mod shell_init;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::candidate::Candidate;
use crate::context::NavContext;
use crate::errors::ToolError;
use crate::process;
use crate::query::{rank, RankedCandidate};
use picker::{parse_selections, PickerRequest};

/// Print every candidate in base-score order
pub fn list<W: Write>(ctx: &NavContext, show_scores: bool, out: &mut W) -> io::Result<()> {
    write_list(&ctx.candidates(), show_scores, out)
}

pub fn write_list<W: Write>(
    candidates: &[Candidate],
    show_scores: bool,
    out: &mut W,
) -> io::Result<()> {
    for candidate in candidates {
        if show_scores {
            writeln!(out, "{} {}", candidate.score, candidate.display)?;
        } else {
            writeln!(out, "{}", candidate.display)?;
        }
    }
    out.flush()
}

/// Print candidates matching `query` as `display<TAB>path` lines
pub fn filter<W: Write>(
    ctx: &NavContext,
    query: &str,
    show_scores: bool,
    out: &mut W,
) -> io::Result<()> {
    let ranked = rank(ctx.candidates(), query);
    write_filtered(&ranked, show_scores, out)
}

pub fn write_filtered<W: Write>(
    ranked: &[RankedCandidate],
    show_scores: bool,
    out: &mut W,
) -> io::Result<()> {
    for entry in ranked {
        if show_scores {
            writeln!(out, "{} {}", entry.candidate.score, entry.candidate.display)?;
        } else {
            writeln!(
                out,
                "{}\t{}",
                entry.candidate.display,
                entry.candidate.path.display()
            )?;
        }
    }
    out.flush()
}

/// First candidate (in base-score order) containing `cwd`.
///
/// Containment is per path component rather than a string prefix, so
/// `/s/h/o/web` does not contain `/s/h/o/web-frontend`.
pub fn containing_candidate<'a>(candidates: &'a [Candidate], cwd: &Path) -> Option<&'a Candidate> {
    candidates
        .iter()
        .find(|candidate| cwd.starts_with(&candidate.path))
}

// lead over the runner-up that skips the picker
const CLEAR_WINNER_RATIO: f64 = 1.5;
const CLEAR_WINNER_MARGIN: f64 = 100.0;

/// The only match, or a first result that clearly outscores the second.
pub fn clear_winner(ranked: &[RankedCandidate]) -> Option<&Candidate> {
    match ranked {
        [only] => Some(&only.candidate),
        [first, second, ..] => {
            let (top, next) = (first.total_score, second.total_score);
            (top / next > CLEAR_WINNER_RATIO || top - next > CLEAR_WINNER_MARGIN)
                .then_some(&first.candidate)
        }
        [] => None,
    }
}

/// Pick paths for `query`.
///
/// A single-select query with a clear winner returns it without opening the
/// picker. Otherwise the picker runs, and every selected line yields a path
/// (one unless `multi`). An aborted picker, an empty selection or a picker
/// that cannot be started all mean "no selection".
pub fn navigate(ctx: &NavContext, query: &str, multi: bool, exe: &Path) -> Vec<PathBuf> {
    let candidates = ctx.candidates();
    let ghost = containing_candidate(&candidates, &ctx.cwd)
        .map(|candidate| candidate.display.clone())
        .unwrap_or_default();
    let ranked = rank(candidates, query);

    if !multi && !query.is_empty() {
        if let Some(winner) = clear_winner(&ranked) {
            tracing::debug!(display = %winner.display, "clear winner, skipping picker");
            return vec![winner.path.clone()];
        }
    }

    let mut initial = Vec::new();
    if let Err(err) = write_filtered(&ranked, false, &mut initial) {
        tracing::warn!("failed to prepare picker input: {err}");
    }
    let initial = String::from_utf8_lossy(&initial).into_owned();

    let request = PickerRequest {
        settings: &ctx.picker,
        exe,
        ghost: &ghost,
        query,
        multi,
        config_path: ctx.config_path.as_deref(),
    };
    tracing::debug!(picker = %ctx.picker.program.display(), multi, "starting picker");

    match process::run_piped(&mut request.command(), Some(&initial)) {
        Ok(selection) => parse_selections(&selection),
        Err(err @ (ToolError::NotFound { .. } | ToolError::Spawn { .. })) => {
            tracing::warn!("picker unavailable: {err}");
            Vec::new()
        }
        Err(err) => {
            tracing::debug!("no selection: {err}");
            Vec::new()
        }
    }
}
