//! Federated full-text search for statically generated documentation sites.
//!
//! A site generator extracts three document collections per site (page
//! titles, section headings, content chunks), and this crate turns them
//! into one JSON bundle that a browser can search offline. Queries fan
//! out over the typed indexes under a global result budget, so precise
//! matches shield the fuzzy rungs from ever running.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌───────────────────┐
//! │ tokenize.rs │────▶│ expand.rs  │────▶│ search/           │
//! │ (folding,   │     │ (the plan  │     │ (budget loop,     │
//! │  CJK runs)  │     │  ladder)   │     │  dedup, parents)  │
//! └─────────────┘     └────────────┘     └───────────────────┘
//!        │                                    │          ▲
//!        ▼                                    ▼          │
//! ┌────────────────────────────────┐     ┌───────────────────┐
//! │            engine/             │◀────│     bundle.rs     │
//! │ (IndexBuilder → InvertedIndex) │     │ (build/load/save) │
//! └────────────────────────────────┘     └───────────────────┘
//! ```
//!
//! | Module     | Role                                   | Key types                    |
//! |------------|----------------------------------------|------------------------------|
//! | `types`    | Wire format shared with the JS shell   | `Document`, `SearchResult`   |
//! | `tokenize` | Unicode folding and token extraction   | `Token`                      |
//! | `expand`   | Tokens → priority-ordered query plans  | `QueryPlan`                  |
//! | `query`    | Orchestrator/engine contract           | `Clause`, `QueryIndex`       |
//! | `engine`   | Positional inverted index              | `IndexBuilder`, `InvertedIndex` |
//! | `search`   | Federated budget loop plus finishing   | `SearchSource`, `TypedIndex` |
//! | `bundle`   | Serialized artifact, one per site      | `SearchBundle`, `SiteCorpus` |
//!
//! # Usage
//!
//! ```ignore
//! use quaero::bundle::{build_bundle, SearchBundle, SiteCorpus};
//!
//! // Build side (site generator / CLI):
//! let bundle = build_bundle(SiteCorpus { /* extracted documents */ });
//! bundle.save("search.json")?;
//!
//! // Query side (browser shell / CLI):
//! let source = SearchBundle::load("search.json")?.into_source(8, None)?;
//! let results = source.search("install guide");
//! ```
//!
//! The WASM surface (`wasm` feature) wraps the query side for
//! `wasm-bindgen` consumers; see [`wasm::WasmSearchSource`].

pub mod bundle;
pub mod engine;
mod expand;
pub mod query;
mod search;
mod tokenize;
mod types;

#[doc(hidden)]
pub mod testing;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for public API
pub use expand::query_plans;
pub use search::{annotate_tree_status, sort_search_results, SearchSource, TypedIndex};
pub use tokenize::{fold, token_spans, tokenize, Token};
pub use types::{Document, DocumentType, MatchMetadata, SearchResult, SiteVersion, Span};
