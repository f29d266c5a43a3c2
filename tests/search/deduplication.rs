//! Result dedup across indexes and across plans. The first batch to
//! claim a document id owns it; everything later drops out.

use quaero::bundle::SiteCorpus;
use quaero::DocumentType;

use super::common::{make_content_doc, make_title_doc, result_ids, source_from};

#[test]
fn a_document_id_is_reported_once_per_call() {
    // Same id on both granularities. The title index is queried first,
    // so the title row claims the id and the content hit is dropped.
    let corpus = SiteCorpus {
        titles: vec![make_title_doc(7, "Install Guide", "/install/")],
        contents: vec![make_content_doc(7, "install steps for the host", "/install/", 7)],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    let results = source.search("install");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.id, 7);
    assert_eq!(results[0].kind, DocumentType::Title);
}

#[test]
fn later_plans_never_resurface_collected_documents() {
    let corpus = SiteCorpus {
        titles: vec![
            make_title_doc(1, "Data", "/data/"),
            make_title_doc(2, "Database", "/database/"),
        ],
        ..Default::default()
    };
    let source = source_from(corpus, 10, None);

    // The exact plan finds page 1, the prefix plan finds both; page 1
    // must not show up a second time.
    let results = source.search("data");
    assert_eq!(result_ids(&results), vec![1, 2]);
}
