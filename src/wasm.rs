//! WebAssembly bindings for in-browser search.
//!
//! The browser fetches the bundle JSON once, constructs a
//! [`WasmSearchSource`], and calls `search` on every keystroke. Results
//! cross the boundary as plain JS objects via serde, matching the JSON
//! shapes documented on the result types.

use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::bundle::SearchBundle;
use crate::engine::InvertedIndex;
use crate::search::SearchSource;

/// WASM-accessible search source for one site.
#[wasm_bindgen]
pub struct WasmSearchSource {
    source: SearchSource<InvertedIndex>,
}

#[wasm_bindgen]
impl WasmSearchSource {
    /// Create a source from bundle JSON.
    ///
    /// `active_version` selects by version name and may be omitted;
    /// unknown names are an error.
    #[wasm_bindgen(constructor)]
    pub fn new(
        bundle_json: &str,
        result_limit: usize,
        active_version: Option<String>,
    ) -> Result<WasmSearchSource, JsValue> {
        let bundle: SearchBundle = serde_json::from_str(bundle_json)
            .map_err(|e| format!("failed to parse bundle: {}", e))?;
        let source = bundle
            .into_source(result_limit, active_version.as_deref())
            .map_err(|e| e.to_string())?;
        Ok(WasmSearchSource { source })
    }

    /// Run a search and return the results as a JS array.
    #[wasm_bindgen]
    pub fn search(&self, phrase: &str) -> Result<JsValue, JsValue> {
        let results = self.source.search(phrase);
        to_value(&results).map_err(|e| e.to_string().into())
    }

    /// Total number of documents across all typed indexes.
    #[wasm_bindgen]
    pub fn doc_count(&self) -> usize {
        self.source
            .indexes()
            .iter()
            .map(|entry| entry.documents().len())
            .sum()
    }

    /// The global result budget this source was built with.
    #[wasm_bindgen]
    pub fn result_limit(&self) -> usize {
        self.source.result_limit()
    }

    /// Version names the bundle ships, in display order.
    #[wasm_bindgen]
    pub fn version_names(&self) -> Vec<String> {
        self.source
            .versions()
            .iter()
            .map(|version| version.name.clone())
            .collect()
    }
}
