// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build-time index construction.
//!
//! Register fields first, feed documents in any order, then [`build`]
//! finalizes: postings get sorted by doc id, same-document occurrences
//! merge into one posting, and per-field average lengths are fixed for
//! BM25 normalization. The builder is write-only; queries only run against
//! the finished [`InvertedIndex`].
//!
//! [`build`]: IndexBuilder::build

use super::index::{FieldPostings, InvertedIndex, Posting};
use super::{english_stemmer, is_stop_word, stem, FieldKind};
use crate::tokenize::token_spans;
use crate::types::Span;
use rust_stemmers::Stemmer;
use std::collections::{BTreeMap, BTreeSet};

/// Accumulates one typed collection's postings.
pub struct IndexBuilder {
    fields: BTreeMap<String, FieldKind>,
    raw: BTreeMap<String, FieldPostings>,
    field_lengths: BTreeMap<String, BTreeMap<u32, u32>>,
    doc_ids: BTreeSet<u32>,
    stemmer: Stemmer,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        IndexBuilder {
            fields: BTreeMap::new(),
            raw: BTreeMap::new(),
            field_lengths: BTreeMap::new(),
            doc_ids: BTreeSet::new(),
            stemmer: english_stemmer(),
        }
    }

    /// Register an analyzed text field.
    pub fn text_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.fields.insert(name.into(), FieldKind::Text);
        self
    }

    /// Register a keyword field (whole value, lowercased, unstemmed).
    pub fn keyword_field(&mut self, name: impl Into<String>) -> &mut Self {
        self.fields.insert(name.into(), FieldKind::Keyword);
        self
    }

    /// Index a text field value: tokenize, drop stop words, stem, record
    /// byte spans of the surviving tokens.
    pub fn add_text(&mut self, doc_id: u32, field: &str, text: &str) {
        debug_assert!(
            matches!(self.fields.get(field), Some(FieldKind::Text)),
            "field {field:?} is not registered as text"
        );

        let mut per_term: BTreeMap<String, Vec<Span>> = BTreeMap::new();
        let mut indexed = 0u32;
        for token in token_spans(text) {
            if is_stop_word(&token.text) {
                continue;
            }
            per_term
                .entry(stem(&self.stemmer, &token.text))
                .or_default()
                .push(token.span);
            indexed += 1;
        }

        for (term, positions) in per_term {
            self.raw
                .entry(term)
                .or_default()
                .entry(field.to_string())
                .or_default()
                .push(Posting { doc_id, positions });
        }

        *self
            .field_lengths
            .entry(field.to_string())
            .or_default()
            .entry(doc_id)
            .or_insert(0) += indexed;
        self.doc_ids.insert(doc_id);
    }

    /// Index a keyword field value as one term covering the whole value.
    pub fn add_keyword(&mut self, doc_id: u32, field: &str, value: &str) {
        debug_assert!(
            matches!(self.fields.get(field), Some(FieldKind::Keyword)),
            "field {field:?} is not registered as keyword"
        );

        self.raw
            .entry(value.to_lowercase())
            .or_default()
            .entry(field.to_string())
            .or_default()
            .push(Posting {
                doc_id,
                positions: vec![Span(0, value.len() as u32)],
            });

        self.field_lengths
            .entry(field.to_string())
            .or_default()
            .insert(doc_id, 1);
        self.doc_ids.insert(doc_id);
    }

    /// Finalize into a queryable index.
    pub fn build(self) -> InvertedIndex {
        let mut terms: BTreeMap<String, FieldPostings> = BTreeMap::new();
        for (term, by_field) in self.raw {
            let mut fields: FieldPostings = BTreeMap::new();
            for (field, mut postings) in by_field {
                postings.sort_by_key(|p| p.doc_id);
                let mut merged: Vec<Posting> = Vec::with_capacity(postings.len());
                for posting in postings {
                    match merged.last_mut() {
                        Some(last) if last.doc_id == posting.doc_id => {
                            last.positions.extend(posting.positions);
                        }
                        _ => merged.push(posting),
                    }
                }
                fields.insert(field, merged);
            }
            terms.insert(term, fields);
        }

        let avg_lengths = self
            .field_lengths
            .iter()
            .map(|(field, lengths)| {
                let total: u64 = lengths.values().map(|&n| u64::from(n)).sum();
                let avg = if lengths.is_empty() {
                    0.0
                } else {
                    total as f64 / lengths.len() as f64
                };
                (field.clone(), avg)
            })
            .collect();

        let index = InvertedIndex {
            fields: self.fields,
            terms,
            field_lengths: self.field_lengths,
            avg_lengths,
            doc_count: self.doc_ids.len() as u32,
        };
        tracing::debug!(
            terms = index.term_count(),
            docs = index.document_count(),
            "built inverted index"
        );
        index
    }
}
