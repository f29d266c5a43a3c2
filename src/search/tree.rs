// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tree-status flags for rendering.
//!
//! After sorting, a page's row is followed by the hits found inside it.
//! Frontends draw that cluster as a little tree, so each child row needs
//! to know whether it is followed by a sibling (draw a tee) or closes
//! the cluster (draw an elbow). The flags are pure presentation state;
//! identity, order and count are never touched here.

use crate::search::sort::owning_page_id;
use crate::types::SearchResult;

/// Marks child rows inside each page cluster.
///
/// A cluster is a maximal run of consecutive results sharing an owning
/// page. Only clusters that carry the page's own row get flags: orphan
/// runs whose page never made the output render flat, and page rows
/// themselves always stay unflagged.
pub fn annotate_tree_status(results: &mut [SearchResult]) {
    let mut start = 0;
    while start < results.len() {
        let key = owning_page_id(&results[start]);
        let mut end = start + 1;
        while end < results.len() && owning_page_id(&results[end]) == key {
            end += 1;
        }
        annotate_run(&mut results[start..end]);
        start = end;
    }
}

fn annotate_run(run: &mut [SearchResult]) {
    if !run.iter().any(|result| result.page.is_none()) {
        return;
    }

    let mut last_child = None;
    for (position, result) in run.iter_mut().enumerate() {
        if result.page.is_some() {
            result.is_inter_of_tree = true;
            last_child = Some(position);
        }
    }
    if let Some(position) = last_child {
        run[position].is_inter_of_tree = false;
        run[position].is_last_of_tree = true;
    }
}
