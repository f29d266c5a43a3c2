//! Global result budget: the limit spans every plan and every index, and
//! a met budget stops all further querying.

use std::sync::atomic::Ordering;

use quaero::{DocumentType, SearchSource, TypedIndex};

use super::common::{
    build_text_index, docs_site, make_content_doc, make_title_doc, result_ids, source_from,
    CountingIndex,
};

#[test]
fn results_are_clamped_to_the_limit() {
    let source = source_from(docs_site(), 2, None);
    assert_eq!(source.search("install").len(), 2);
}

#[test]
fn a_limit_larger_than_the_match_count_returns_everything() {
    let source = source_from(docs_site(), 50, None);

    let mut ids = result_ids(&source.search("install"));
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 11, 21]);
}

/// Two title pages and one content chunk, all matching "search", behind
/// counting wrappers so the test can observe which indexes were queried.
fn instrumented_source(
    limit: usize,
) -> (
    SearchSource<CountingIndex>,
    std::sync::Arc<std::sync::atomic::AtomicUsize>,
    std::sync::Arc<std::sync::atomic::AtomicUsize>,
) {
    let titles = vec![
        make_title_doc(5, "Search Basics", "/basics/"),
        make_title_doc(6, "Search Advanced", "/advanced/"),
    ];
    let contents = vec![make_content_doc(25, "search tips for large sites", "/basics/", 5)];

    let (title_index, title_calls) = CountingIndex::new(build_text_index(&titles));
    let (content_index, content_calls) = CountingIndex::new(build_text_index(&contents));

    let source = SearchSource::new(
        vec![
            TypedIndex::new(DocumentType::Title, titles, title_index),
            TypedIndex::new(DocumentType::Content, contents, content_index),
        ],
        Vec::new(),
        limit,
        Vec::new(),
        None,
        None,
    );
    (source, title_calls, content_calls)
}

#[test]
fn a_full_first_batch_stops_all_querying() {
    let (source, title_calls, content_calls) = instrumented_source(2);

    let mut ids = result_ids(&source.search("search"));
    ids.sort_unstable();
    assert_eq!(ids, vec![5, 6]);

    assert_eq!(title_calls.load(Ordering::SeqCst), 1);
    assert_eq!(content_calls.load(Ordering::SeqCst), 0, "budget was already met");
}

#[test]
fn the_budget_spans_indexes_within_one_plan() {
    let (source, title_calls, content_calls) = instrumented_source(3);

    let results = source.search("search");
    assert_eq!(result_ids(&results), vec![5, 25, 6], "family of page 5 leads");

    assert_eq!(title_calls.load(Ordering::SeqCst), 1);
    assert_eq!(content_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn exhausted_plans_run_every_combination_once() {
    let (source, title_calls, content_calls) = instrumented_source(10);

    let results = source.search("search");
    assert_eq!(results.len(), 3, "dedup keeps repeat plan hits out");

    // Exact, prefix and loose plans each visit both indexes.
    assert_eq!(title_calls.load(Ordering::SeqCst), 3);
    assert_eq!(content_calls.load(Ordering::SeqCst), 3);
}
