// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query execution over a built inverted index.
//!
//! Execution is a single pass over the clause list:
//!
//! 1. Each positive clause expands to the vocabulary terms it matches
//!    (exact lookup, or a wildcard scan over the sorted term map).
//! 2. Matched postings accumulate BM25-style score and highlight spans per
//!    document. Required clauses also record their qualifying doc set.
//! 3. Required sets intersect, prohibited sets subtract, survivors sort by
//!    score descending (doc id breaks ties).
//!
//! A query with no surviving positive clause matches nothing: prohibited
//! clauses can only shrink a result set, never create one. That property is
//! what makes the orchestrator's version-exclusion emulation safe.

use super::{english_stemmer, is_stop_word, stem, FieldKind};
use crate::query::{Clause, IndexHit, Presence, QueryIndex, Wildcard};
use crate::types::{MatchMetadata, Span};
use rust_stemmers::Stemmer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

/// BM25 term-frequency saturation.
const K1: f64 = 1.2;

/// BM25 length normalization strength.
const B: f64 = 0.75;

/// All occurrences of one term in one field of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub doc_id: u32,
    /// Byte spans of each occurrence in the original field text.
    pub positions: Vec<Span>,
}

/// field name → posting list sorted by doc id.
pub(crate) type FieldPostings = BTreeMap<String, Vec<Posting>>;

/// One typed collection's searchable index.
///
/// Everything is an ordered map: iteration order is part of the contract
/// (deterministic scoring, reproducible serialization).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvertedIndex {
    pub(crate) fields: BTreeMap<String, FieldKind>,
    pub(crate) terms: BTreeMap<String, FieldPostings>,
    /// field → doc id → indexed token count (stop words excluded).
    pub(crate) field_lengths: BTreeMap<String, BTreeMap<u32, u32>>,
    /// field → average indexed token count, fixed at build time.
    pub(crate) avg_lengths: BTreeMap<String, f64>,
    pub(crate) doc_count: u32,
}

impl InvertedIndex {
    /// Number of distinct vocabulary terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents indexed.
    pub fn document_count(&self) -> usize {
        self.doc_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }

    /// Execute a prepared clause list. See the module docs for semantics.
    pub fn execute(&self, clauses: &[Clause]) -> Vec<IndexHit> {
        let stemmer = english_stemmer();

        let mut positive_present = false;
        let mut scores: BTreeMap<u32, f64> = BTreeMap::new();
        let mut metadata: BTreeMap<u32, MatchMetadata> = BTreeMap::new();
        let mut required_sets: Vec<BTreeSet<u32>> = Vec::new();
        let mut prohibited: BTreeSet<u32> = BTreeSet::new();

        for clause in clauses {
            // A dropped clause (stop-worded exact term) constrains nothing,
            // mirroring how the indexing pipeline dropped the same token.
            let Some(terms) = self.expand_terms(clause, &stemmer) else {
                continue;
            };

            if clause.presence == Presence::Prohibited {
                for term in terms {
                    self.for_each_posting(term, &clause.fields, |_, postings| {
                        prohibited.extend(postings.iter().map(|p| p.doc_id));
                    });
                }
                continue;
            }

            positive_present = true;
            let mut clause_docs: BTreeSet<u32> = BTreeSet::new();
            for term in terms {
                self.for_each_posting(term, &clause.fields, |field, postings| {
                    let idf = idf(self.doc_count, postings.len() as f64);
                    for posting in postings {
                        clause_docs.insert(posting.doc_id);
                        let contribution =
                            idf * self.tf_norm(field, posting) * f64::from(clause.boost);
                        *scores.entry(posting.doc_id).or_insert(0.0) += contribution;
                        metadata
                            .entry(posting.doc_id)
                            .or_default()
                            .entry(term.to_string())
                            .or_default()
                            .entry(field.to_string())
                            .or_default()
                            .extend(posting.positions.iter().copied());
                    }
                });
            }
            if clause.presence == Presence::Required {
                required_sets.push(clause_docs);
            }
        }

        if !positive_present {
            return Vec::new();
        }

        let mut hits: Vec<IndexHit> = scores
            .into_iter()
            .filter(|(doc_id, _)| required_sets.iter().all(|set| set.contains(doc_id)))
            .filter(|(doc_id, _)| !prohibited.contains(doc_id))
            .map(|(doc_id, score)| IndexHit {
                doc_id,
                score,
                metadata: metadata.remove(&doc_id).unwrap_or_default(),
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));

        tracing::trace!(
            clauses = clauses.len(),
            hits = hits.len(),
            "executed index query"
        );
        hits
    }

    /// Vocabulary terms a clause matches. `None` means the clause dropped
    /// out of the query entirely; `Some(empty)` means it matched nothing.
    fn expand_terms(&self, clause: &Clause, stemmer: &Stemmer) -> Option<Vec<&str>> {
        let text_clause = clause
            .fields
            .iter()
            .any(|f| self.fields.get(f.as_str()).copied() == Some(FieldKind::Text));

        let value = match clause.wildcard {
            Wildcard::None if text_clause => {
                if is_stop_word(&clause.value) {
                    return None;
                }
                stem(stemmer, &clause.value)
            }
            _ => clause.value.to_lowercase(),
        };

        let matched = match clause.wildcard {
            Wildcard::None => self
                .terms
                .get_key_value(&value)
                .map(|(term, _)| vec![term.as_str()])
                .unwrap_or_default(),
            Wildcard::Trailing => self
                .terms
                .range::<str, _>((Bound::Included(value.as_str()), Bound::Unbounded))
                .take_while(|(term, _)| term.starts_with(&value))
                .map(|(term, _)| term.as_str())
                .collect(),
            Wildcard::Leading => self
                .terms
                .keys()
                .filter(|term| term.ends_with(&value))
                .map(String::as_str)
                .collect(),
            Wildcard::Both => self
                .terms
                .keys()
                .filter(|term| term.contains(&value))
                .map(String::as_str)
                .collect(),
        };
        Some(matched)
    }

    fn for_each_posting<'a>(
        &'a self,
        term: &str,
        fields: &[String],
        mut visit: impl FnMut(&'a str, &'a [Posting]),
    ) {
        let Some(by_field) = self.terms.get(term) else {
            return;
        };
        for field in fields {
            if let Some((name, postings)) = by_field.get_key_value(field.as_str()) {
                visit(name.as_str(), postings.as_slice());
            }
        }
    }

    fn tf_norm(&self, field: &str, posting: &Posting) -> f64 {
        let tf = posting.positions.len().max(1) as f64;
        let dl = self
            .field_lengths
            .get(field)
            .and_then(|lengths| lengths.get(&posting.doc_id))
            .copied()
            .unwrap_or(1) as f64;
        let avg = self
            .avg_lengths
            .get(field)
            .copied()
            .filter(|avg| *avg > 0.0)
            .unwrap_or(1.0);
        tf * (K1 + 1.0) / (tf + K1 * (1.0 - B + B * dl / avg))
    }
}

impl QueryIndex for InvertedIndex {
    fn query(&self, clauses: &[Clause]) -> Vec<IndexHit> {
        self.execute(clauses)
    }
}

/// Lucene-style smoothed idf: always strictly positive, tiny for terms that
/// appear everywhere.
fn idf(doc_count: u32, doc_freq: f64) -> f64 {
    let n = f64::from(doc_count);
    (1.0 + (n - doc_freq + 0.5) / (doc_freq + 0.5)).ln()
}
