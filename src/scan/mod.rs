// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate discovery: frecency lookup, tree scanning and display names

pub mod display;
pub mod frecency;
pub mod scanner;

pub use frecency::FrecencyTable;
pub use scanner::{current_worktree, scan, Roots};
