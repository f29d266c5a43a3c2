//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::{Document, SiteVersion};

/// Create a page title document.
///
/// This is the canonical implementation used across all tests.
pub fn make_title_doc(id: u32, title: &str, url: &str) -> Document {
    Document {
        id,
        title: title.to_string(),
        body: None,
        url: url.to_string(),
        fragment: None,
        breadcrumb: vec![],
        version: None,
        parent_id: None,
    }
}

/// Create a heading document anchored inside a page.
pub fn make_heading_doc(
    id: u32,
    title: &str,
    url: &str,
    fragment: &str,
    parent_id: u32,
) -> Document {
    Document {
        id,
        title: title.to_string(),
        body: None,
        url: url.to_string(),
        fragment: Some(fragment.to_string()),
        breadcrumb: vec![],
        version: None,
        parent_id: Some(parent_id),
    }
}

/// Create a content block document anchored inside a page.
pub fn make_content_doc(id: u32, body: &str, url: &str, parent_id: u32) -> Document {
    Document {
        id,
        title: String::new(),
        body: Some(body.to_string()),
        url: url.to_string(),
        fragment: None,
        breadcrumb: vec![],
        version: None,
        parent_id: Some(parent_id),
    }
}

/// Tag a document with a version name.
pub fn with_version(mut doc: Document, version: &str) -> Document {
    doc.version = Some(version.to_string());
    doc
}

/// Create a version whose label equals its name.
pub fn make_version(name: &str) -> SiteVersion {
    SiteVersion::new(name, name)
}
