//! Degenerate inputs: blank phrases, stop-word-only phrases, orphaned
//! records and empty collections.

use quaero::bundle::SiteCorpus;

use super::common::{docs_site, make_content_doc, make_title_doc, source_from};

#[test]
fn blank_phrases_yield_nothing() {
    let source = source_from(docs_site(), 10, None);
    for phrase in ["", "   ", "\t\n", "!!! ---"] {
        assert!(source.search(phrase).is_empty(), "{phrase:?} should find nothing");
    }
}

#[test]
fn stop_word_only_phrases_match_nothing() {
    let source = source_from(docs_site(), 10, None);
    assert!(source.search("the and of").is_empty());
}

#[test]
fn hits_with_unresolvable_parents_keep_an_empty_page() {
    let corpus = SiteCorpus {
        titles: vec![make_title_doc(1, "Home", "/")],
        contents: vec![make_content_doc(21, "orphan paragraph about quasars", "/lost/", 999)],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    let results = source.search("quasars");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.id, 21);
    assert!(results[0].page.is_none());
}

#[test]
fn empty_collections_are_legal() {
    let corpus = SiteCorpus {
        titles: vec![make_title_doc(1, "Standalone Page", "/standalone/")],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);
    assert_eq!(source.search("standalone").len(), 1);
}

#[test]
fn a_fully_empty_corpus_searches_without_error() {
    let source = source_from(SiteCorpus::default(), 5, None);
    assert!(source.search("anything").is_empty());
}
