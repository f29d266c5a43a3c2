//! End-to-end matching behavior: which documents a phrase finds, and in
//! what priority, across the plan ladder.

use quaero::bundle::SiteCorpus;
use quaero::DocumentType;

use super::common::{docs_site, make_content_doc, make_title_doc, result_ids, source_from};

#[test]
fn exact_words_find_their_documents() {
    let source = source_from(docs_site(), 10, None);
    let results = source.search("database");

    assert_eq!(result_ids(&results), vec![12]);
    assert_eq!(results[0].kind, DocumentType::Heading);
    assert_eq!(results[0].page.as_ref().unwrap().title, "Data Model");
}

#[test]
fn stemmed_inflections_match_each_other() {
    let corpus = SiteCorpus {
        titles: vec![make_title_doc(1, "Operations", "/ops/")],
        contents: vec![make_content_doc(21, "the server runs nightly jobs", "/ops/", 1)],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    let results = source.search("running");
    assert_eq!(result_ids(&results), vec![21]);
}

#[test]
fn full_matches_rank_before_partial_matches() {
    let corpus = SiteCorpus {
        titles: vec![
            make_title_doc(1, "Data Model", "/data-model/"),
            make_title_doc(2, "Data", "/data/"),
        ],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    // Page 1 satisfies the exact rung; page 2 only surfaces from the loose
    // rung, matching one of two optional terms.
    let results = source.search("data model");
    assert_eq!(result_ids(&results), vec![1, 2]);
}

#[test]
fn prefix_fallback_covers_partial_words() {
    let source = source_from(docs_site(), 3, None);

    // "inst" is no vocabulary term, so the exact rung misses; the prefix
    // rung reaches every record of the install page.
    let mut ids = result_ids(&source.search("inst"));
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 11, 21]);
}

#[test]
fn the_loose_rung_backfills_remaining_budget() {
    let source = source_from(docs_site(), 10, None);

    // With budget to spare the ladder keeps descending: "reinstall" only
    // contains "inst" mid-word, which none of the stricter rungs can see.
    let ids = result_ids(&source.search("inst"));
    assert!(ids.contains(&23), "loose rung should add the reinstall chunk");
    assert_eq!(ids.len(), 4);
}

#[test]
fn stop_words_never_block_a_phrase() {
    let source = source_from(docs_site(), 10, None);

    let results = source.search("the data model");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].document.id, 2, "page row leads its family");
    assert!(results
        .iter()
        .all(|r| r.page.as_ref().map_or(r.document.id, |p| p.id) == 2));
}
