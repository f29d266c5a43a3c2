//! Ordering of the final list: page grouping, best-member group order
//! and the tree flags the result renderer draws connectors from.

use quaero::bundle::SiteCorpus;

use super::common::{docs_site, make_content_doc, make_title_doc, owning_ids, result_ids, source_from};

#[test]
fn page_rows_lead_their_children() {
    let source = source_from(docs_site(), 10, None);

    let results = source.search("install");
    assert_eq!(results[0].document.id, 1, "the page row opens its family");
    assert!(owning_ids(&results).iter().all(|&owner| owner == 1));

    let mut ids = result_ids(&results);
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 11, 21]);
}

#[test]
fn groups_are_ordered_by_their_best_member() {
    let corpus = SiteCorpus {
        titles: vec![
            make_title_doc(1, "Logging", "/logging/"),
            make_title_doc(2, "Logging Reference Guide", "/logging-reference/"),
        ],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    // The shorter title concentrates the term and scores higher.
    assert_eq!(result_ids(&source.search("logging")), vec![1, 2]);
}

#[test]
fn lone_children_group_alone_without_flags() {
    let corpus = SiteCorpus {
        titles: vec![make_title_doc(1, "Alpha", "/alpha/")],
        contents: vec![make_content_doc(21, "gamma ray bursts explained", "/alpha/", 1)],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    let results = source.search("gamma");
    assert_eq!(results.len(), 1);
    assert!(results[0].page.is_some());
    // No page row in the group, so there is no tree to draw.
    assert!(!results[0].is_inter_of_tree);
    assert!(!results[0].is_last_of_tree);
}

#[test]
fn families_get_tree_flags_independently() {
    let corpus = SiteCorpus {
        titles: vec![
            make_title_doc(1, "Cache Guide", "/cache-guide/"),
            make_title_doc(2, "Cache Internals", "/cache-internals/"),
        ],
        contents: vec![
            make_content_doc(21, "cache eviction rules", "/cache-guide/", 1),
            make_content_doc(22, "cache warming steps", "/cache-guide/", 1),
            make_content_doc(23, "cache line padding", "/cache-internals/", 2),
        ],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    let results = source.search("cache");
    assert_eq!(result_ids(&results), vec![1, 21, 22, 2, 23]);

    let flags: Vec<(bool, bool)> = results
        .iter()
        .map(|r| (r.is_inter_of_tree, r.is_last_of_tree))
        .collect();
    assert_eq!(
        flags,
        vec![
            (false, false),
            (true, false),
            (false, true),
            (false, false),
            (false, true),
        ]
    );
}
