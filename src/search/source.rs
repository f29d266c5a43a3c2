// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The federated budget loop.
//!
//! A [`SearchSource`] owns one typed index per document granularity
//! (titles, headings, content blocks) and fans every query plan out
//! across all of them. Plans are ordered strictest-first, so the loop
//! visits high-precision combinations before loose ones and stops the
//! moment the global result budget is met. Within one batch the steps
//! run in a fixed order:
//!
//! 1. drop zero-score hits,
//! 2. cap the batch at the result limit,
//! 3. drop documents already collected by earlier batches,
//! 4. cap at the budget that is still open,
//! 5. resolve documents and parent pages.
//!
//! Deduplication is deliberately batch-granular: hits inside a single
//! engine response never collide (the engine returns each document at
//! most once), and the seen-set is only extended after a whole batch is
//! appended. First batch to claim a document wins, which favors the
//! stricter plan and the more significant index.

use std::collections::{HashMap, HashSet};

use crate::expand::query_plans;
use crate::query::{Clause, IndexHit, QueryIndex, QueryPlan};
use crate::search::{annotate_tree_status, sort_search_results};
use crate::tokenize::tokenize;
use crate::types::{Document, DocumentType, SearchResult, SiteVersion};

/// One searchable index together with the documents it was built from.
///
/// The document collection is the lookup side of the engine's numeric
/// hits: every hit id must map back to a full record here. Slot order is
/// irrelevant, ids are what matter.
#[derive(Debug)]
pub struct TypedIndex<I> {
    kind: DocumentType,
    documents: Vec<Document>,
    index: I,
    by_id: HashMap<u32, usize>,
}

impl<I> TypedIndex<I> {
    /// Wraps an index with its backing documents and granularity tag.
    pub fn new(kind: DocumentType, documents: Vec<Document>, index: I) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(slot, doc)| (doc.id, slot))
            .collect();
        Self {
            kind,
            documents,
            index,
            by_id,
        }
    }

    /// Granularity of the documents behind this index.
    pub fn kind(&self) -> DocumentType {
        self.kind
    }

    /// The backing document collection.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Looks a document up by its engine id.
    pub fn document(&self, id: u32) -> Option<&Document> {
        self.by_id.get(&id).map(|&slot| &self.documents[slot])
    }
}

/// Federated search over a set of typed indexes.
///
/// By convention the first index holds page titles; parent pages for
/// heading and content hits are resolved against it. Construct one
/// source per site version snapshot and reuse it for every query.
#[derive(Debug)]
pub struct SearchSource<I> {
    indexes: Vec<TypedIndex<I>>,
    dictionary: Vec<String>,
    result_limit: usize,
    versions: Vec<SiteVersion>,
    active_version: Option<SiteVersion>,
    latest_version: Option<SiteVersion>,
}

/// Collects batches while tracking the budget and the documents already
/// claimed by earlier batches.
struct Accumulator {
    results: Vec<SearchResult>,
    seen: HashSet<u32>,
    limit: usize,
}

impl Accumulator {
    fn new(limit: usize) -> Self {
        Self {
            results: Vec::with_capacity(limit),
            seen: HashSet::new(),
            limit,
        }
    }

    fn contains(&self, id: u32) -> bool {
        self.seen.contains(&id)
    }

    fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.results.len())
    }

    fn is_full(&self) -> bool {
        self.results.len() >= self.limit
    }

    fn append(&mut self, batch: Vec<SearchResult>) {
        for result in batch {
            self.seen.insert(result.document.id);
            self.results.push(result);
        }
    }

    fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}

impl<I: QueryIndex> SearchSource<I> {
    /// Builds a source from typed indexes and site metadata.
    ///
    /// `dictionary` seeds segmentation for scripts without word
    /// boundaries and may be empty. `result_limit` is the global budget
    /// across all plans and indexes. `active_version` is the version the
    /// reader is currently browsing, `latest_version` the default one;
    /// either may be absent.
    pub fn new(
        indexes: Vec<TypedIndex<I>>,
        dictionary: Vec<String>,
        result_limit: usize,
        versions: Vec<SiteVersion>,
        active_version: Option<SiteVersion>,
        latest_version: Option<SiteVersion>,
    ) -> Self {
        Self {
            indexes,
            dictionary,
            result_limit,
            versions,
            active_version,
            latest_version,
        }
    }

    /// The global result budget.
    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// All versions the site ships.
    pub fn versions(&self) -> &[SiteVersion] {
        &self.versions
    }

    /// The typed indexes, in query order.
    pub fn indexes(&self) -> &[TypedIndex<I>] {
        &self.indexes
    }

    /// Runs a phrase against every typed index and returns at most
    /// `result_limit` results, grouped by page and annotated for tree
    /// rendering.
    ///
    /// A phrase that tokenizes to nothing returns an empty list without
    /// touching any index.
    pub fn search(&self, phrase: &str) -> Vec<SearchResult> {
        let tokens = tokenize(phrase);
        if tokens.is_empty() {
            return Vec::new();
        }

        let plans = query_plans(&tokens, &self.dictionary);
        let version = self.version_to_search();
        let mut acc = Accumulator::new(self.result_limit);

        'plans: for plan in &plans {
            for entry in &self.indexes {
                let clauses = self.build_clauses(plan, version);
                let hits = entry.index.query(&clauses);
                tracing::trace!(
                    index = entry.kind.as_str(),
                    raw_hits = hits.len(),
                    "queried typed index"
                );

                let batch = self.collect_batch(entry, plan, hits, &acc);
                acc.append(batch);
                if acc.is_full() {
                    break 'plans;
                }
            }
        }

        let mut results = acc.into_results();
        sort_search_results(&mut results);
        annotate_tree_status(&mut results);
        results
    }

    /// The version results should be restricted to, if any.
    ///
    /// Single-version and unversioned sites search everything. On
    /// multi-version sites the active version wins over the latest one,
    /// and if neither is known the query stays unrestricted.
    fn version_to_search(&self) -> Option<&SiteVersion> {
        if self.versions.len() <= 1 {
            return None;
        }
        self.active_version
            .as_ref()
            .or(self.latest_version.as_ref())
    }

    /// Text clauses for the plan plus one prohibited clause per
    /// non-target version.
    ///
    /// Version filtering is subtractive on purpose: documents carrying
    /// no version marker at all (shared pages) survive the exclusions
    /// and stay searchable from every version.
    fn build_clauses(&self, plan: &QueryPlan, version: Option<&SiteVersion>) -> Vec<Clause> {
        let mut clauses: Vec<Clause> = plan.terms.iter().map(Clause::text).collect();
        if let Some(target) = version {
            for other in &self.versions {
                if other.name != target.name {
                    clauses.push(Clause::prohibit_version(&other.name));
                }
            }
        }
        clauses
    }

    /// Filters one engine response down to the results it contributes.
    ///
    /// Order is load-bearing: the per-batch cap applies before the
    /// dedup filter, so a batch full of already-seen documents
    /// contributes nothing instead of reaching deeper into the hit list.
    fn collect_batch(
        &self,
        entry: &TypedIndex<I>,
        plan: &QueryPlan,
        hits: Vec<IndexHit>,
        acc: &Accumulator,
    ) -> Vec<SearchResult> {
        hits.into_iter()
            .filter(|hit| hit.score > 0.0)
            .take(self.result_limit)
            .filter(|hit| !acc.contains(hit.doc_id))
            .take(acc.remaining())
            .filter_map(|hit| self.resolve(entry, plan, hit))
            .collect()
    }

    /// Turns a raw hit into a full result, resolving the document and
    /// its parent page.
    ///
    /// Hits that reference an id missing from the document collection
    /// are dropped. A missing or unresolvable parent leaves `page`
    /// empty; such results still count against the budget.
    fn resolve(
        &self,
        entry: &TypedIndex<I>,
        plan: &QueryPlan,
        hit: IndexHit,
    ) -> Option<SearchResult> {
        let Some(document) = entry.document(hit.doc_id) else {
            tracing::debug!(
                doc_id = hit.doc_id,
                index = entry.kind.as_str(),
                "hit references a document the collection does not have, dropping"
            );
            return None;
        };

        let page = if entry.kind == DocumentType::Title {
            None
        } else {
            document
                .parent_id
                .and_then(|parent| self.title_index().and_then(|titles| titles.document(parent)))
                .cloned()
        };

        Some(SearchResult {
            document: document.clone(),
            kind: entry.kind,
            page,
            metadata: hit.metadata,
            tokens: plan.tokens.clone(),
            score: hit.score,
            is_inter_of_tree: false,
            is_last_of_tree: false,
        })
    }

    fn title_index(&self) -> Option<&TypedIndex<I>> {
        self.indexes.first()
    }
}
