//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quaero::bundle::{build_bundle, SiteCorpus};
use quaero::engine::{IndexBuilder, InvertedIndex};
use quaero::query::{Clause, IndexHit, QueryIndex, FIELD_TEXT, FIELD_VERSION};
use quaero::{Document, SearchResult, SearchSource};

// Re-export canonical test utilities from quaero::testing
pub use quaero::testing::{
    make_content_doc, make_heading_doc, make_title_doc, make_version, with_version,
};

// ============================================================================
// INDEX BUILDERS
// ============================================================================

/// Build one typed index over the given documents, text plus version
/// keyword, the same way `bundle::build_bundle` does.
pub fn build_text_index(documents: &[Document]) -> InvertedIndex {
    let mut builder = IndexBuilder::new();
    builder.text_field(FIELD_TEXT).keyword_field(FIELD_VERSION);
    for doc in documents {
        builder.add_text(doc.id, FIELD_TEXT, doc.search_text());
        if let Some(version) = &doc.version {
            builder.add_keyword(doc.id, FIELD_VERSION, version);
        }
    }
    builder.build()
}

/// Build a ready-to-query source straight from a corpus.
pub fn source_from(
    corpus: SiteCorpus,
    limit: usize,
    active_version: Option<&str>,
) -> SearchSource<InvertedIndex> {
    build_bundle(corpus)
        .into_source(limit, active_version)
        .expect("corpus fixtures use known version names")
}

// ============================================================================
// FIXTURE CORPORA
// ============================================================================

/// A small unversioned documentation site: three pages with headings and
/// content chunks. Ids are globally unique the way the generator assigns
/// them.
pub fn docs_site() -> SiteCorpus {
    SiteCorpus {
        titles: vec![
            make_title_doc(1, "Installation", "/install/"),
            make_title_doc(2, "Data Model", "/data-model/"),
            make_title_doc(3, "Troubleshooting", "/troubleshooting/"),
        ],
        headings: vec![
            make_heading_doc(11, "Install from source", "/install/", "#source", 1),
            make_heading_doc(12, "Database layout", "/data-model/", "#layout", 2),
            make_heading_doc(13, "Common errors", "/troubleshooting/", "#errors", 3),
        ],
        contents: vec![
            make_content_doc(21, "run the install script to finish setup", "/install/", 1),
            make_content_doc(22, "every table stores data as immutable rows", "/data-model/", 2),
            make_content_doc(23, "reinstall fixes most corrupted caches", "/troubleshooting/", 3),
        ],
        ..Default::default()
    }
}

/// A two-version site: "2.0" is listed first (the default), "1.0" second.
/// One page per version plus one untagged page shared by both.
pub fn versioned_site() -> SiteCorpus {
    SiteCorpus {
        versions: vec![make_version("2.0"), make_version("1.0")],
        titles: vec![
            with_version(make_title_doc(1, "Upgrade checklist", "/2.0/upgrade/"), "2.0"),
            with_version(make_title_doc(2, "Upgrade checklist", "/1.0/upgrade/"), "1.0"),
            make_title_doc(3, "Upgrade blog post", "/blog/upgrade/"),
        ],
        headings: vec![],
        contents: vec![
            with_version(
                make_content_doc(21, "upgrade with the migration assistant", "/2.0/upgrade/", 1),
                "2.0",
            ),
            with_version(
                make_content_doc(22, "upgrade by editing the config by hand", "/1.0/upgrade/", 2),
                "1.0",
            ),
        ],
        ..Default::default()
    }
}

// ============================================================================
// QUERY INSTRUMENTATION
// ============================================================================

/// Wraps a real index and counts how many times it is queried.
///
/// The orchestrator promises to stop querying once the budget fills;
/// this is how tests observe that promise.
pub struct CountingIndex {
    inner: InvertedIndex,
    calls: Arc<AtomicUsize>,
}

impl CountingIndex {
    pub fn new(inner: InvertedIndex) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl QueryIndex for CountingIndex {
    fn query(&self, clauses: &[Clause]) -> Vec<IndexHit> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.query(clauses)
    }
}

// ============================================================================
// RESULT ASSERTIONS
// ============================================================================

/// Document ids of a result list, in order.
pub fn result_ids(results: &[SearchResult]) -> Vec<u32> {
    results.iter().map(|r| r.document.id).collect()
}

/// The page id each result renders under: its own id for page rows, the
/// resolved parent's id for child rows.
pub fn owning_ids(results: &[SearchResult]) -> Vec<u32> {
    results
        .iter()
        .map(|r| r.page.as_ref().map_or(r.document.id, |p| p.id))
        .collect()
}
