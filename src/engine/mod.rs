// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted-index engine: build-time construction and query execution.
//!
//! One [`InvertedIndex`] serves one typed document collection. Fields are
//! registered with an analysis kind before documents are added:
//!
//! - **Text** fields are tokenized, stop-word filtered, and stemmed, with
//!   positional postings pointing at the original bytes.
//! - **Keyword** fields index their whole value as a single lowercased term.
//!   The version field is a keyword so names like "2.0.0" survive intact
//!   instead of shattering on the dots.
//!
//! Query semantics are conjunctive/negated only (required AND, prohibited
//! NOT, optional for extra score) because that is what the orchestrator's
//! version-exclusion trick depends on; there is deliberately no disjunction.
//!
//! Analysis is symmetric: an exact query term is stop-filtered and stemmed
//! exactly like indexed text, so "running" finds "runs". Wildcard
//! terms match the vocabulary literally (no stemming) - the exact rung of
//! the plan ladder covers stem-equivalent matches, the wildcard rungs cover
//! literal prefixes.
//!
//! # Invariants
//!
//! 1. **POSTINGS_SORTED**: every posting list is sorted by doc id, one
//!    posting per (term, field, doc).
//! 2. **LENGTHS_MATCH**: `field_lengths` counts exactly the tokens that were
//!    indexed (stop words excluded), per field per doc.
//! 3. **DETERMINISTIC**: all containers iterate in sorted order, so scores
//!    and hit order are reproducible bit-for-bit.

mod build;
mod index;

pub use build::IndexBuilder;
pub use index::{InvertedIndex, Posting};

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

/// How a field's values are analyzed at build and query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Keyword,
}

/// High-frequency English words excluded from text fields.
///
/// They add nothing to relevance and inflate the serialized bundle, which
/// ships to the browser on first search.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "he", "in",
    "is", "it", "its", "of", "on", "or", "that", "the", "this", "to", "was", "will", "with",
];

pub(crate) fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Stem one folded token.
pub(crate) fn stem(stemmer: &Stemmer, token: &str) -> String {
    stemmer.stem(token).to_string()
}

pub(crate) fn english_stemmer() -> Stemmer {
    Stemmer::create(Algorithm::English)
}
