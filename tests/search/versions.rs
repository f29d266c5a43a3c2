//! Version filter emulation. Filtering is subtractive: other versions
//! are prohibited, so untagged documents always stay reachable.

use quaero::bundle::SiteCorpus;

use super::common::{make_title_doc, make_version, result_ids, source_from, versioned_site, with_version};

fn sorted_ids(source: &quaero::SearchSource<quaero::engine::InvertedIndex>, phrase: &str) -> Vec<u32> {
    let mut ids = result_ids(&source.search(phrase));
    ids.sort_unstable();
    ids
}

#[test]
fn the_active_version_excludes_the_others() {
    let source = source_from(versioned_site(), 10, Some("1.0"));
    assert_eq!(sorted_ids(&source, "upgrade"), vec![2, 3, 22]);
}

#[test]
fn untagged_documents_survive_any_active_version() {
    for active in ["1.0", "2.0"] {
        let source = source_from(versioned_site(), 10, Some(active));
        let ids = sorted_ids(&source, "upgrade");
        assert!(ids.contains(&3), "blog post should be visible from {active}");
    }
}

#[test]
fn a_missing_active_version_falls_back_to_the_latest() {
    // The first listed version is the default one.
    let source = source_from(versioned_site(), 10, None);
    assert_eq!(sorted_ids(&source, "upgrade"), vec![1, 3, 21]);
}

#[test]
fn single_version_sites_are_never_filtered() {
    let corpus = SiteCorpus {
        versions: vec![make_version("1.0")],
        titles: vec![
            with_version(make_title_doc(1, "Upgrade notes", "/notes/"), "1.0"),
            with_version(make_title_doc(2, "Upgrade tips", "/tips/"), "9.9"),
        ],
        ..Default::default()
    };
    let source = source_from(corpus, 10, Some("1.0"));

    // One listed version means nothing to exclude, stray tags included.
    assert_eq!(sorted_ids(&source, "upgrade"), vec![1, 2]);
}

#[test]
fn unversioned_sites_are_never_filtered() {
    let corpus = SiteCorpus {
        titles: vec![
            with_version(make_title_doc(1, "Upgrade notes", "/notes/"), "0.9"),
            make_title_doc(2, "Upgrade tips", "/tips/"),
        ],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    assert_eq!(sorted_ids(&source, "upgrade"), vec![1, 2]);
}
