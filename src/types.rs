// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a documentation search index.
//!
//! These types define how indexed records, site versions, and match metadata
//! fit together. Everything here crosses the serialization boundary (bundles
//! on disk, results handed to a JS shell), so the serde attributes are part
//! of the contract, not decoration.
//!
//! | Rust Type      | Serialized as        | Purpose                          |
//! |----------------|----------------------|----------------------------------|
//! | `Document`     | camelCase object     | One indexed record               |
//! | `DocumentType` | lowercase string     | Title / Heading / Content tier   |
//! | `SiteVersion`  | `{name, label}`      | One published docs version       |
//! | `Span`         | `[start, len]` array | Byte range into original text    |
//! | `SearchResult` | camelCase object     | Finished, resolved hit           |
//!
//! # Invariants
//!
//! - **Document**: immutable once built; `id` is unique within its typed
//!   collection; `parent_id` (when present) names a Title-collection id.
//! - **Span**: byte offsets into the *original* field text, never into the
//!   normalized form. Highlighting slices the original string with these.
//! - **SearchResult**: `page` is `None` exactly when `kind == Title` or the
//!   parent could not be resolved; ids are pairwise distinct within one
//!   search call's output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// DOCUMENTS
// =============================================================================

/// One indexed record: a page title, a section heading, or a content chunk.
///
/// The same struct serves all three granularities. Title records carry no
/// `parent_id`; heading and content records point back at their owning page.
/// Content records put the searchable text in `body` and keep the section
/// heading in `title` for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: u32,
    pub title: String,
    /// Chunk text for content records. Absent for titles and headings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub url: String,
    /// URL fragment for deep linking to a heading anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Path-segment labels from the site root down to this page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breadcrumb: Vec<String>,
    /// Version name this record belongs to. Absent means "all versions"
    /// (blog posts, static pages).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Title-collection id of the owning page, for sub-page records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u32>,
}

impl Document {
    /// The text this record is indexed under: `body` for content chunks,
    /// `title` for everything else.
    pub fn search_text(&self) -> &str {
        self.body.as_deref().unwrap_or(&self.title)
    }
}

/// Which granularity an index (and its records) covers.
///
/// The list convention puts Title first: the Title entry doubles as the page
/// registry used to resolve `parent_id` on sub-page hits, so the derived
/// `Ord` (Title < Heading < Content) matches the required index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Title,
    Heading,
    Content,
}

impl DocumentType {
    /// All tiers in canonical (list) order.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Title,
        DocumentType::Heading,
        DocumentType::Content,
    ];

    /// Lowercase string form, matching the serde `rename_all` convention.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Title => "title",
            DocumentType::Heading => "heading",
            DocumentType::Content => "content",
        }
    }
}

// =============================================================================
// SITE VERSIONS
// =============================================================================

/// One published version of a documentation site.
///
/// `name` is the stable identifier documents are tagged with ("2.x",
/// "next"); `label` is what the UI shows. Sites without versioning simply
/// carry an empty or single-element version list, which disables version
/// filtering entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVersion {
    pub name: String,
    pub label: String,
}

impl SiteVersion {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        SiteVersion {
            name: name.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// MATCH METADATA
// =============================================================================

/// Byte range `[start, len]` into original field text.
///
/// Serialized as a two-element array so the JS shell can slice strings
/// without knowing field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span(pub u32, pub u32);

impl Span {
    pub fn start(self) -> u32 {
        self.0
    }

    pub fn len(self) -> u32 {
        self.1
    }

    pub fn is_empty(self) -> bool {
        self.1 == 0
    }

    pub fn end(self) -> u32 {
        self.0 + self.1
    }
}

/// Engine-produced match positions: term → field → spans.
///
/// BTreeMaps keep serialization order stable, which keeps whole search
/// outputs byte-for-byte reproducible across calls.
pub type MatchMetadata = BTreeMap<String, BTreeMap<String, Vec<Span>>>;

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// A finished hit: resolved document, owning page, and highlight material.
///
/// Produced fresh per call, never cached. The two tree flags are written
/// only by [`annotate_tree_status`](crate::annotate_tree_status) after
/// sorting; the orchestrator leaves them false.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document: Document,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    /// The owning page for heading/content hits. `None` for title hits and
    /// for sub-page hits whose parent is missing from the page registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Document>,
    pub metadata: MatchMetadata,
    /// Display tokens from the query plan that produced this hit, for
    /// highlighting.
    pub tokens: Vec<String>,
    pub score: f64,
    /// This row is a non-final child under its page row.
    pub is_inter_of_tree: bool,
    /// This row is the final child under its page row.
    pub is_last_of_tree: bool,
}
