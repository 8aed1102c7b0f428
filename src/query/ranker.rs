// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fuzzy subsequence filtering and word-boundary match scoring

use regex::{Regex, RegexBuilder};

use crate::candidate::{descending, Candidate};

const WORD_BOUNDARY_POINTS: f64 = 100.0;
const ADJACENT_BOUNDARY_BONUS: f64 = 0.5;
const SPAN_POINTS: f64 = 100.0;
const PREFIX_BONUS: f64 = 50.0;
const LENGTH_PENALTY: f64 = 0.1;

/// A candidate together with its query-scoped scores
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub match_score: f64,
    /// Base score plus match score
    pub total_score: f64,
}

impl RankedCandidate {
    fn unranked(candidate: Candidate) -> Self {
        let total_score = candidate.score;
        Self {
            candidate,
            match_score: 0.0,
            total_score,
        }
    }
}

/// Filter `candidates` down to those whose display contains `query` as a
/// case-insensitive subsequence and order them by total score.
///
/// An empty query keeps every candidate in its incoming order. Ties keep
/// incoming order as well.
pub fn rank(candidates: Vec<Candidate>, query: &str) -> Vec<RankedCandidate> {
    if query.is_empty() {
        return candidates.into_iter().map(RankedCandidate::unranked).collect();
    }

    let pattern = match subsequence_pattern(query) {
        Ok(pattern) => pattern,
        Err(err) => {
            tracing::warn!("unusable query {query:?}: {err}");
            return Vec::new();
        }
    };
    let query_chars: Vec<char> = query.chars().collect();

    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .filter(|candidate| pattern.is_match(&candidate.display))
        .map(|candidate| {
            let match_score = match_score(&candidate.display, &query_chars);
            RankedCandidate {
                total_score: candidate.score + match_score,
                match_score,
                candidate,
            }
        })
        .collect();

    ranked.sort_by(|a, b| descending(a.total_score, b.total_score));
    ranked
}

/// `abc` becomes `a.*b.*c`, matched case-insensitively anywhere
fn subsequence_pattern(query: &str) -> Result<Regex, regex::Error> {
    let pattern = query
        .chars()
        .map(|ch| regex::escape(ch.encode_utf8(&mut [0u8; 4])))
        .collect::<Vec<_>>()
        .join(".*");
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Score how well `query` lands on `display`.
///
/// Positions come from a greedy left-to-right scan. When that scan cannot
/// place every character the score is 0, even if the regex filter matched.
pub fn match_score(display: &str, query: &[char]) -> f64 {
    let display_chars: Vec<char> = display.chars().collect();
    let Some(positions) = greedy_positions(&display_chars, query) else {
        return 0.0;
    };
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return 0.0;
    };

    let mut boundary_points = 0.0;
    for (i, &pos) in positions.iter().enumerate() {
        if !is_word_start(&display_chars, pos) {
            continue;
        }
        boundary_points += 1.0;
        if i > 0 && positions[i - 1] + 1 == pos {
            boundary_points += ADJACENT_BOUNDARY_BONUS;
        }
    }

    let mut score = boundary_points * WORD_BOUNDARY_POINTS;

    let span = last - first + 1;
    if span > 0 {
        score += SPAN_POINTS / span as f64;
    }
    if first == 0 {
        score += PREFIX_BONUS;
    }
    score - display_chars.len() as f64 * LENGTH_PENALTY
}

fn greedy_positions(display: &[char], query: &[char]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(query.len());
    let mut start = 0;
    for &wanted in query {
        let offset = display[start..]
            .iter()
            .position(|&ch| chars_eq_ignore_case(ch, wanted))?;
        positions.push(start + offset);
        start += offset + 1;
    }
    Some(positions)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn is_word_start(display: &[char], pos: usize) -> bool {
    match pos.checked_sub(1).map(|prev| display[prev]) {
        None => true,
        Some(prev) => matches!(prev, '/' | '-' | '+' | '~' | '.' | '_') || prev.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture() -> Vec<Candidate> {
        crate::selfcheck::sample_candidates()
    }

    fn displays(ranked: &[RankedCandidate]) -> Vec<&str> {
        ranked.iter().map(|r| r.candidate.display.as_str()).collect()
    }

    fn is_subsequence(display: &str, query: &str) -> bool {
        let mut haystack = display.chars().flat_map(char::to_lowercase);
        query
            .chars()
            .flat_map(char::to_lowercase)
            .all(|wanted| haystack.any(|ch| ch == wanted))
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let ranked = rank(fixture(), "");
        assert_eq!(ranked.len(), 6);
        assert_eq!(displays(&ranked)[0], "+root//web-frontend");
        assert_eq!(displays(&ranked)[5], "+root//platform");
        assert!(ranked
            .iter()
            .all(|r| r.match_score == 0.0 && r.total_score == r.candidate.score));
    }

    #[test]
    fn wf_prefers_current_worktree_frontend() {
        let ranked = rank(fixture(), "wf");
        let frontend: Vec<_> = ranked
            .iter()
            .filter(|r| r.candidate.display.contains("web-frontend"))
            .collect();
        assert_eq!(frontend.len(), 3);
        assert_eq!(displays(&ranked)[0], "+root//web-frontend");

        let total = |display: &str| {
            ranked
                .iter()
                .find(|r| r.candidate.display == display)
                .map(|r| r.total_score)
                .expect("present")
        };
        assert!(total("+root//web-frontend") > total("+other//web-frontend"));
        assert!(total("+other//web-frontend") > total("~github.com/Platform/web-frontend"));
    }

    #[test]
    fn wf_scores_both_word_boundaries() {
        let display = "+root//web-frontend";
        let score = match_score(display, &['w', 'f']);
        // two boundaries, span 5, no prefix, 19 chars
        let expected = 200.0 + 100.0 / 5.0 - 1.9;
        assert!((score - expected).abs() < 1e-9, "score {score}");
    }

    #[test]
    fn frontend_matches_exactly_three() {
        let ranked = rank(fixture(), "frontend");
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|r| r.candidate.display.contains("frontend")));
    }

    #[test]
    fn xyz_matches_nothing() {
        assert!(rank(fixture(), "xyz").is_empty());
    }

    #[test]
    fn plat_is_case_insensitive() {
        let ranked = rank(fixture(), "plat");
        assert!(ranked.iter().any(|r| r.candidate.display.contains("platform")));
        assert!(ranked.iter().any(|r| r.candidate.display.contains("Platform")));
    }

    #[test]
    fn rf_finds_random_fixes() {
        let ranked = rank(fixture(), "rf");
        assert!(displays(&ranked).contains(&"+random-fixes//platform"));
    }

    #[test]
    fn results_are_subsequences_in_descending_order() {
        for query in ["wf", "p", "ROOT", "gt", "w-f", "//", "e", "tf"] {
            let ranked = rank(fixture(), query);
            for r in &ranked {
                assert!(
                    is_subsequence(&r.candidate.display, query),
                    "{query:?} kept {}",
                    r.candidate.display
                );
            }
            for pair in ranked.windows(2) {
                assert!(pair[0].total_score >= pair[1].total_score, "{query:?}");
            }
        }
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let candidates = vec![Candidate {
            path: PathBuf::from("/p"),
            display: "+a//b.c".into(),
            score: 0.0,
            origin: crate::candidate::Origin::SourceRepo,
        }];
        assert_eq!(rank(candidates.clone(), ".").len(), 1);
        assert!(rank(candidates.clone(), "(").is_empty());
        assert!(rank(candidates, "a*").is_empty());
    }

    #[test]
    fn word_boundary_beats_plain_substring() {
        // same length, same span, only the boundary differs
        let boundary = match_score("xx-ab", &['a', 'b']);
        let inside = match_score("xxzab", &['a', 'b']);
        assert!(boundary > inside);
        assert!((boundary - inside - 100.0).abs() < 1e-9);
    }

    #[test]
    fn adjacent_boundaries_earn_half_point() {
        // "-" then "/" are both boundaries at positions 1 and 2
        let score = match_score("+-/", &['-', '/']);
        let expected = 2.5 * 100.0 + 100.0 / 2.0 - 0.3;
        assert!((score - expected).abs() < 1e-9, "score {score}");
    }

    #[test]
    fn prefix_match_bonus() {
        let score = match_score("abc", &['a']);
        // boundary + span 1 + prefix - length
        assert!((score - (100.0 + 100.0 + 50.0 - 0.3)).abs() < 1e-9);
    }

    #[test]
    fn greedy_failure_scores_zero() {
        assert_eq!(match_score("abc", &['c', 'a']), 0.0);
    }

    #[test]
    fn case_folded_match_is_kept_without_bonus() {
        // the regex folds long s to `s`; per-char comparison does not
        let candidate = Candidate {
            path: PathBuf::from("/s/h/o/long"),
            display: "\u{17f}x".to_string(),
            score: 7.0,
            origin: crate::candidate::Origin::SourceRepo,
        };
        let ranked = rank(vec![candidate], "s");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].match_score, 0.0);
        assert_eq!(ranked[0].total_score, ranked[0].candidate.score);
    }
}
