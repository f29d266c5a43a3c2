// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query expansion: tokens in, a priority-ordered ladder of query plans out.
//!
//! The ladder has three rungs, most exact first:
//!
//! 1. **Exact**: every token required, no wildcard.
//! 2. **Prefix**: every token required, trailing wildcard ("inst" finds
//!    "install").
//! 3. **Loose**: every original token optional with both-ended wildcards,
//!    the last-resort recall tier.
//!
//! The orchestrator walks plans in order and stops as soon as the result
//! budget fills, so the precise rungs shield the fuzzy one: a phrase that
//! matches exactly never pays for wildcard scans.
//!
//! # Dictionary segmentation
//!
//! Languages written without word separators arrive as one long token per
//! run ("搜索引擎"). The auxiliary dictionary (shipped inside the bundle,
//! built from the site's own vocabulary) cuts such tokens into known words.
//! Ambiguous cuts produce alternative token sequences, each of which gets
//! its own exact and prefix rung; alternatives are bounded so adversarial
//! dictionaries cannot explode the plan count. Tokens that cannot be fully
//! segmented pass through whole.

use crate::query::{Presence, QueryPlan, QueryTerm, Wildcard};
use std::collections::HashSet;

/// Most segmentations kept per CJK token.
const MAX_SEGMENTATIONS: usize = 3;

/// Most alternative token sequences kept per phrase.
const MAX_ALTERNATIVES: usize = 4;

/// Expand folded tokens into priority-ordered query plans.
///
/// Empty token input yields zero plans. Display tokens on each plan are the
/// plan's own term values, so highlighting matches what was actually
/// searched (segmented words, not the raw run).
pub fn query_plans(tokens: &[String], dictionary: &[String]) -> Vec<QueryPlan> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let alternatives = alternative_sequences(tokens, dictionary);
    let mut plans = Vec::with_capacity(alternatives.len() * 2 + 1);

    for alt in &alternatives {
        plans.push(plan_of(alt, Wildcard::None, Presence::Required));
    }
    for alt in &alternatives {
        plans.push(plan_of(alt, Wildcard::Trailing, Presence::Required));
    }
    plans.push(plan_of(tokens, Wildcard::Both, Presence::Optional));

    plans
}

fn plan_of(tokens: &[String], wildcard: Wildcard, presence: Presence) -> QueryPlan {
    QueryPlan {
        terms: tokens
            .iter()
            .map(|t| QueryTerm::new(t.clone(), wildcard, presence))
            .collect(),
        tokens: tokens.to_vec(),
    }
}

/// Cartesian combination of per-token segmentation alternatives, bounded.
fn alternative_sequences(tokens: &[String], dictionary: &[String]) -> Vec<Vec<String>> {
    if dictionary.is_empty() || !tokens.iter().any(|t| contains_cjk(t)) {
        return vec![tokens.to_vec()];
    }

    let dict: HashSet<&str> = dictionary.iter().map(String::as_str).collect();
    let mut sequences: Vec<Vec<String>> = vec![Vec::new()];

    for token in tokens {
        let alts = if contains_cjk(token) {
            segment(token, &dict)
        } else {
            vec![vec![token.clone()]]
        };

        let mut next = Vec::with_capacity(sequences.len());
        'combine: for seq in &sequences {
            for alt in &alts {
                if next.len() >= MAX_ALTERNATIVES {
                    break 'combine;
                }
                let mut extended = seq.clone();
                extended.extend(alt.iter().cloned());
                next.push(extended);
            }
        }
        sequences = next;
    }

    sequences
}

/// Cut one token into dictionary words covering it entirely.
///
/// Longest-prefix-first depth-first search; falls back to the whole token
/// when no full segmentation exists.
fn segment(token: &str, dict: &HashSet<&str>) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    segment_rest(token, dict, &mut path, &mut out);
    if out.is_empty() {
        vec![vec![token.to_string()]]
    } else {
        out
    }
}

fn segment_rest(rest: &str, dict: &HashSet<&str>, path: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    if out.len() >= MAX_SEGMENTATIONS {
        return;
    }
    if rest.is_empty() {
        out.push(path.clone());
        return;
    }

    // Prefix end offsets on char boundaries, longest first.
    let mut ends: Vec<usize> = rest.char_indices().skip(1).map(|(i, _)| i).collect();
    ends.push(rest.len());

    for &end in ends.iter().rev() {
        let prefix = &rest[..end];
        if dict.contains(prefix) {
            path.push(prefix.to_string());
            segment_rest(&rest[end..], dict, path, out);
            path.pop();
        }
    }
}

fn contains_cjk(token: &str) -> bool {
    token.chars().any(|c| {
        matches!(c,
            '\u{3040}'..='\u{30FF}' |  // Hiragana, Katakana
            '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
            '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
            '\u{F900}'..='\u{FAFF}' |  // CJK Compatibility Ideographs
            '\u{AC00}'..='\u{D7AF}'    // Hangul Syllables
        )
    })
}
