// SPDX-License-Identifier: MIT OR Apache-2.0

//! wl - worktree and repository navigator
//!
//! Scans the worktree and source trees for candidate directories, scores them
//! with frecency plus layout boosts, and ranks them against a fuzzy query for
//! an external picker.

pub mod candidate;
pub mod config;
pub mod context;
pub mod errors;
pub mod nav;
pub mod process;
pub mod query;
pub mod scan;
pub mod selfcheck;
pub mod utils;
