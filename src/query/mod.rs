// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query-time ranking

pub mod ranker;

pub use ranker::{rank, RankedCandidate};
