//! The on-disk bundle: everything one site needs to search itself.
//!
//! A bundle holds the version set, the segmentation dictionary, and the
//! typed indexes together with the documents they were built from, as a
//! single JSON artifact. The generator writes it once at site build
//! time; browsers and the CLI load it read-only. By convention the
//! Title index is first, since parent pages for heading and content
//! hits resolve against it.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{IndexBuilder, InvertedIndex};
use crate::query::{FIELD_TEXT, FIELD_VERSION};
use crate::search::{SearchSource, TypedIndex};
use crate::types::{Document, DocumentType, SiteVersion};

/// Anything that can go wrong loading, saving, or opening a bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("bundle io: {0}")]
    Io(#[from] std::io::Error),

    #[error("bundle json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Shape(String),
}

/// One typed index plus its backing documents, as serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundledIndex {
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub documents: Vec<Document>,
    pub index: InvertedIndex,
}

/// The complete serialized search artifact for one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBundle {
    /// Versions in display order; the first one is the default.
    #[serde(default)]
    pub versions: Vec<SiteVersion>,
    /// Known words for scripts without word boundaries. May be empty.
    #[serde(default)]
    pub dictionary: Vec<String>,
    /// Typed indexes, Title first.
    pub indexes: Vec<BundledIndex>,
}

/// Build-side input: the extracted document collections for one site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCorpus {
    #[serde(default)]
    pub versions: Vec<SiteVersion>,
    #[serde(default)]
    pub dictionary: Vec<String>,
    pub titles: Vec<Document>,
    pub headings: Vec<Document>,
    pub contents: Vec<Document>,
}

impl SearchBundle {
    /// Reads a bundle from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BundleError> {
        let file = File::open(path)?;
        let bundle = serde_json::from_reader(BufReader::new(file))?;
        Ok(bundle)
    }

    /// Writes the bundle to a JSON file, replacing anything there.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BundleError> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Total number of documents across all typed indexes.
    pub fn document_count(&self) -> usize {
        self.indexes.iter().map(|entry| entry.documents.len()).sum()
    }

    /// Turns the bundle into a ready-to-query source.
    ///
    /// `active_version` selects by version name; `None` means no active
    /// version. The latest version is the first entry of the version
    /// list, matching the generator's display order.
    pub fn into_source(
        self,
        result_limit: usize,
        active_version: Option<&str>,
    ) -> Result<SearchSource<InvertedIndex>, BundleError> {
        let active = match active_version {
            Some(name) => {
                let found = self.versions.iter().find(|v| v.name == name).cloned();
                match found {
                    Some(version) => Some(version),
                    None => {
                        let known: Vec<&str> =
                            self.versions.iter().map(|v| v.name.as_str()).collect();
                        return Err(BundleError::Shape(format!(
                            "unknown version {:?}, bundle has: [{}]",
                            name,
                            known.join(", ")
                        )));
                    }
                }
            }
            None => None,
        };
        let latest = self.versions.first().cloned();

        let indexes = self
            .indexes
            .into_iter()
            .map(|entry| TypedIndex::new(entry.kind, entry.documents, entry.index))
            .collect();

        Ok(SearchSource::new(
            indexes,
            self.dictionary,
            result_limit,
            self.versions,
            active,
            latest,
        ))
    }
}

/// Builds the three typed indexes from an extracted corpus.
///
/// Every document's search text goes into the `text` field; documents
/// carrying a version marker additionally get it as a keyword term so
/// version exclusions have something to match.
pub fn build_bundle(corpus: SiteCorpus) -> SearchBundle {
    let started = Instant::now();
    let groups = vec![
        (DocumentType::Title, corpus.titles),
        (DocumentType::Heading, corpus.headings),
        (DocumentType::Content, corpus.contents),
    ];
    let indexes = build_indexes(groups);

    tracing::info!(
        documents = indexes.iter().map(|e| e.documents.len()).sum::<usize>(),
        terms = indexes.iter().map(|e| e.index.term_count()).sum::<usize>(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "built search bundle"
    );

    SearchBundle {
        versions: corpus.versions,
        dictionary: corpus.dictionary,
        indexes,
    }
}

#[cfg(feature = "parallel")]
fn build_indexes(groups: Vec<(DocumentType, Vec<Document>)>) -> Vec<BundledIndex> {
    groups
        .into_par_iter()
        .map(|(kind, documents)| build_typed_index(kind, documents))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_indexes(groups: Vec<(DocumentType, Vec<Document>)>) -> Vec<BundledIndex> {
    groups
        .into_iter()
        .map(|(kind, documents)| build_typed_index(kind, documents))
        .collect()
}

fn build_typed_index(kind: DocumentType, documents: Vec<Document>) -> BundledIndex {
    let mut builder = IndexBuilder::new();
    builder.text_field(FIELD_TEXT).keyword_field(FIELD_VERSION);

    for doc in &documents {
        builder.add_text(doc.id, FIELD_TEXT, doc.search_text());
        if let Some(version) = &doc.version {
            builder.add_keyword(doc.id, FIELD_VERSION, version);
        }
    }

    BundledIndex {
        kind,
        documents,
        index: builder.build(),
    }
}
