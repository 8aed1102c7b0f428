// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking invocation of external line-oriented tools

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::ToolError;

/// Resolve `tool` on PATH (or as given, when it already contains a separator)
pub fn locate(tool: &str) -> Result<PathBuf, ToolError> {
    which::which(tool).map_err(|_| ToolError::NotFound {
        tool: tool.to_string(),
    })
}

/// Run `program` with `args`, optionally feeding `input` on stdin, and return
/// its stdout. A non-zero exit status is an error; stderr is passed through.
pub fn capture(program: &Path, args: &[&str], input: Option<&str>) -> Result<String, ToolError> {
    let mut command = Command::new(program);
    command.args(args);
    run_piped(&mut command, input)
}

/// Run a prepared command with piped stdout and collect it as text.
pub fn run_piped(command: &mut Command, input: Option<&str>) -> Result<String, ToolError> {
    let tool = command.get_program().to_string_lossy().into_owned();
    command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    let mut child = command.spawn().map_err(|source| ToolError::Spawn {
        tool: tool.clone(),
        source,
    })?;

    // Feed stdin from a helper thread so a chatty child cannot fill its stdout
    // pipe while we are still blocked writing input.
    let writer = match (input, child.stdin.take()) {
        (Some(input), Some(mut stdin)) => {
            let input = input.to_string();
            Some(std::thread::spawn(move || {
                if let Err(err) = stdin.write_all(input.as_bytes()) {
                    tracing::debug!("stdin write ended early: {err}");
                }
            }))
        }
        _ => None,
    };

    let output = child.wait_with_output().map_err(|source| ToolError::Spawn {
        tool: tool.clone(),
        source,
    })?;
    if let Some(writer) = writer {
        let _ = writer.join();
    }

    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
