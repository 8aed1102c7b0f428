// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shell wrapper functions that `cd` into the selected candidate

use std::fmt;

/// Shells with an init snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InitShell {
    Fish,
    Bash,
    Zsh,
}

pub const DEFAULT_FUNCTION_NAME: &str = "wl";

/// Rejected `--function-name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFunctionName(pub String);

impl fmt::Display for InvalidFunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid function name '{}'\n\n\
             Use only letters, numbers, underscores and hyphens.\n\
             Example: wl --shell-init fish --function-name j",
            self.0
        )
    }
}

impl std::error::Error for InvalidFunctionName {}

pub fn validate_function_name(name: &str) -> Result<(), InvalidFunctionName> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(InvalidFunctionName(name.to_string()))
    }
}

/// Function definition for `shell` that runs `exe` with the user's arguments
/// and changes into the printed path, if any.
pub fn render(shell: InitShell, exe: &str, function_name: &str) -> Result<String, InvalidFunctionName> {
    validate_function_name(function_name)?;
    let exe = shlex::try_quote(exe)
        .map(|quoted| quoted.into_owned())
        .unwrap_or_else(|_| exe.to_string());

    Ok(match shell {
        InitShell::Fish => format!(
            "function {function_name}\n\
             \x20   set -l target ({exe} $argv)\n\
             \x20   if test -n \"$target\"\n\
             \x20       cd $target\n\
             \x20   end\n\
             end\n"
        ),
        InitShell::Bash | InitShell::Zsh => format!(
            "{function_name}() {{\n\
             \x20   local target\n\
             \x20   target=\"$({exe} \"$@\")\" || return\n\
             \x20   if [ -n \"$target\" ]; then\n\
             \x20       cd -- \"$target\"\n\
             \x20   fi\n\
             }}\n"
        ),
    })
}
