// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query contract between the orchestrator and an index engine.
//!
//! A phrase becomes one or more [`QueryPlan`]s (the expander's output). The
//! orchestrator lowers each plan into a flat list of [`Clause`]s per typed
//! index and hands it to [`QueryIndex::query`]. Clauses are fully assembled
//! before execution; engines never see a half-built query.
//!
//! Presence semantics follow the conjunctive/negated model the browser-side
//! engine supports natively:
//!
//! - `Required` clauses must all match for a document to qualify.
//! - `Optional` clauses add score but cannot qualify a document on their own
//!   when required clauses exist.
//! - `Prohibited` clauses disqualify every document they match. They carry
//!   boost 0 and never contribute score.
//!
//! There is no disjunction. "version = X OR no version" is expressed by
//! prohibiting every version *except* X (see `search::source`), which is the
//! load-bearing trick this whole module exists to carry.

use crate::types::MatchMetadata;

/// Field name for the analyzed text of a record.
pub const FIELD_TEXT: &str = "text";

/// Field name for the version keyword of a record.
pub const FIELD_VERSION: &str = "version";

/// Term matching mode: exact, or open on one/both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    None,
    Leading,
    Trailing,
    Both,
}

/// Whether a clause must, may, or must-not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Prohibited,
}

/// One term of a query plan, before field scoping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
    pub value: String,
    pub wildcard: Wildcard,
    pub presence: Presence,
}

impl QueryTerm {
    pub fn new(value: impl Into<String>, wildcard: Wildcard, presence: Presence) -> Self {
        QueryTerm {
            value: value.into(),
            wildcard,
            presence,
        }
    }
}

/// One candidate interpretation of a phrase, tried in priority order.
///
/// `tokens` are the display tokens for highlighting, which can differ from
/// the term values (dictionary segmentation rewrites CJK runs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub terms: Vec<QueryTerm>,
    pub tokens: Vec<String>,
}

/// A field-scoped term lookup, ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub value: String,
    pub fields: Vec<String>,
    pub boost: f32,
    pub wildcard: Wildcard,
    pub presence: Presence,
}

impl Clause {
    /// Lower a plan term into a text-field clause at full weight.
    pub fn text(term: &QueryTerm) -> Self {
        Clause {
            value: term.value.clone(),
            fields: vec![FIELD_TEXT.to_string()],
            boost: 1.0,
            wildcard: term.wildcard,
            presence: term.presence,
        }
    }

    /// A zero-weight exclusion on the version field.
    ///
    /// Zero boost so it can never leak into scoring even if an engine
    /// mishandles prohibited clauses.
    pub fn prohibit_version(name: &str) -> Self {
        Clause {
            value: name.to_string(),
            fields: vec![FIELD_VERSION.to_string()],
            boost: 0.0,
            wildcard: Wildcard::None,
            presence: Presence::Prohibited,
        }
    }
}

/// One engine match: the document, its score, and highlight positions.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub doc_id: u32,
    pub score: f64,
    pub metadata: MatchMetadata,
}

/// A queryable inverted index.
///
/// The orchestrator is generic over this trait so tests can wrap the real
/// engine with instrumentation (query counting) and hosts can substitute
/// their own engine. Implementations must be pure: same clauses over an
/// unchanged index yield the same hits in the same order.
pub trait QueryIndex {
    /// Execute a prepared clause list. Hits come back ordered by the
    /// engine's own ranking (score-descending for the shipped engine).
    fn query(&self, clauses: &[Clause]) -> Vec<IndexHit>;
}

impl<I: QueryIndex + ?Sized> QueryIndex for &I {
    fn query(&self, clauses: &[Clause]) -> Vec<IndexHit> {
        (**self).query(clauses)
    }
}
