// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch display-name resolution through `shortpath --stdin`

use std::path::{Path, PathBuf};

use crate::candidate::Candidate;
use crate::errors::ToolError;
use crate::process;

const STDIN_FLAG: &str = "--stdin";

/// Resolve one label per path in a single call. The output must have exactly
/// one line per input path; anything else is a failure and nothing is applied.
pub fn resolve_batch(program: &Path, paths: &[PathBuf]) -> Result<Vec<String>, ToolError> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let input = paths
        .iter()
        .map(|path| path.to_string_lossy())
        .collect::<Vec<_>>()
        .join("\n");
    let output = process::capture(program, &[STDIN_FLAG], Some(&input))?;
    let labels: Vec<String> = output.lines().map(|line| line.trim().to_string()).collect();

    if labels.len() != paths.len() {
        return Err(ToolError::LineCountMismatch {
            tool: program.display().to_string(),
            expected: paths.len(),
            actual: labels.len(),
        });
    }
    Ok(labels)
}

/// Overwrite display names with resolved labels, skipping empty ones
pub fn apply_labels(candidates: &mut [Candidate], labels: Vec<String>) {
    if labels.len() != candidates.len() {
        return;
    }
    for (candidate, label) in candidates.iter_mut().zip(labels) {
        if !label.is_empty() {
            candidate.display = label;
        }
    }
}

/// Resolve and apply labels, keeping structural templates on any failure
pub fn shorten_display_names(program: &Path, candidates: &mut [Candidate]) {
    let paths: Vec<PathBuf> = candidates.iter().map(|c| c.path.clone()).collect();
    match resolve_batch(program, &paths) {
        Ok(labels) => apply_labels(candidates, labels),
        Err(err) => tracing::warn!("keeping structural display names: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> Candidate {
        Candidate::source_repo(PathBuf::from(format!("/s/h/o/{name}")), "h", "o", name, 0.0)
    }

    #[test]
    fn apply_labels_skips_empty_values() {
        let mut candidates = vec![repo("a"), repo("b")];
        apply_labels(&mut candidates, vec!["short-a".into(), String::new()]);
        assert_eq!(candidates[0].display, "short-a");
        assert_eq!(candidates[1].display, "~h/o/b");
    }

    #[test]
    fn apply_labels_ignores_length_mismatch() {
        let mut candidates = vec![repo("a"), repo("b")];
        apply_labels(&mut candidates, vec!["only-one".into()]);
        assert_eq!(candidates[0].display, "~h/o/a");
    }

    #[cfg(unix)]
    mod with_tool {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("shortpath");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("chmod");
            path
        }

        #[test]
        fn resolves_one_label_per_line() {
            let dir = tempfile::tempdir().expect("tempdir");
            let tool = script(
                dir.path(),
                r#"while IFS= read -r line || [ -n "$line" ]; do echo "  @${line##*/} "; done"#,
            );
            let mut candidates = vec![repo("a"), repo("b")];
            shorten_display_names(&tool, &mut candidates);
            assert_eq!(candidates[0].display, "@a");
            assert_eq!(candidates[1].display, "@b");
        }

        #[test]
        fn mismatched_output_leaves_templates() {
            let dir = tempfile::tempdir().expect("tempdir");
            let tool = script(dir.path(), "echo just-one");
            let paths = vec![PathBuf::from("/x"), PathBuf::from("/y")];
            let err = resolve_batch(&tool, &paths).expect_err("mismatch");
            assert!(matches!(err, ToolError::LineCountMismatch { .. }));

            let mut candidates = vec![repo("a"), repo("b")];
            shorten_display_names(&tool, &mut candidates);
            assert_eq!(candidates[0].display, "~h/o/a");
        }

        #[test]
        fn failing_tool_leaves_templates() {
            let dir = tempfile::tempdir().expect("tempdir");
            let tool = script(dir.path(), "cat >/dev/null; echo x; echo y; exit 1");
            let mut candidates = vec![repo("a"), repo("b")];
            shorten_display_names(&tool, &mut candidates);
            assert_eq!(candidates[1].display, "~h/o/b");
        }
    }
}
