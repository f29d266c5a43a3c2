// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page-grouped result ordering.
//!
//! Raw accumulation order is plan-major: everything the strictest plan
//! found, then the next plan, and so on. Readers want page-major order
//! instead: a page's title row followed by the hits inside that page.
//! The sort here regroups without losing the deterministic tiebreaks
//! that make repeated searches render identically.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::SearchResult;

/// The page a result renders under: its resolved parent, or itself when
/// it has none.
pub(crate) fn owning_page_id(result: &SearchResult) -> u32 {
    result
        .page
        .as_ref()
        .map(|page| page.id)
        .unwrap_or(result.document.id)
}

#[derive(Debug)]
struct SortKey {
    group_best: f64,
    group_first: usize,
    child: bool,
    score: f64,
    position: usize,
}

impl SortKey {
    /// Groups by best score (descending), then by when the group first
    /// appeared. Inside a group the page's own row leads, children
    /// follow by score, arrival order breaks remaining ties.
    fn compare(a: &Self, b: &Self) -> Ordering {
        b.group_best
            .total_cmp(&a.group_best)
            .then_with(|| a.group_first.cmp(&b.group_first))
            .then_with(|| a.child.cmp(&b.child))
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.position.cmp(&b.position))
    }
}

/// Reorders results in place so each page's rows sit together, best
/// pages first.
///
/// Two distinct groups can never tie: the first-arrival position of a
/// group belongs to that group alone, so the ordering is total and the
/// output deterministic for identical input.
pub fn sort_search_results(results: &mut Vec<SearchResult>) {
    if results.len() <= 1 {
        return;
    }

    let mut best: HashMap<u32, f64> = HashMap::new();
    let mut first: HashMap<u32, usize> = HashMap::new();
    for (position, result) in results.iter().enumerate() {
        let key = owning_page_id(result);
        first.entry(key).or_insert(position);
        let group_best = best.entry(key).or_insert(f64::NEG_INFINITY);
        if result.score > *group_best {
            *group_best = result.score;
        }
    }

    let mut decorated: Vec<(SortKey, SearchResult)> = results
        .drain(..)
        .enumerate()
        .map(|(position, result)| {
            let key = owning_page_id(&result);
            let sort_key = SortKey {
                group_best: best.get(&key).copied().unwrap_or(result.score),
                group_first: first.get(&key).copied().unwrap_or(position),
                child: result.page.is_some(),
                score: result.score,
                position,
            };
            (sort_key, result)
        })
        .collect();

    decorated.sort_by(|(a, _), (b, _)| SortKey::compare(a, b));
    results.extend(decorated.into_iter().map(|(_, result)| result));
}
