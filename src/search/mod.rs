// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query orchestration: where the rubber meets the road.
//!
//! Everything culminates here. You've tokenized the phrase, expanded it
//! into plans, built typed indexes. Now you actually find things.
//! [`SearchSource`] runs the plan ladder against every typed index under
//! a global result budget, then the finishing passes ([`sort_search_results`],
//! [`annotate_tree_status`]) group and decorate what survived.

mod sort;
mod source;
mod tree;

pub use sort::sort_search_results;
pub use source::{SearchSource, TypedIndex};
pub use tree::annotate_tree_status;
