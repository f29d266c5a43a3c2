// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phrase tokenization: raw text in, normalized search tokens out.
//!
//! Tokens are maximal runs of Unicode alphanumerics. Everything else
//! (whitespace, punctuation, symbols) separates. CJK ideographs count as
//! letters, so a run like "搜索引擎" survives as one token; cutting it into
//! dictionary words is the query expander's job, not ours.
//!
//! Each token is folded for matching: NFD decomposition, combining marks
//! stripped, then lowercased. "Café" and "cafe" index identically:
//!
//! - "café" → "cafe"
//! - "Naïve" → "naive"
//! - "HARĪṢH" → "harish"
//!
//! Folding changes byte lengths, so [`token_spans`] reports offsets into the
//! *original* text. Highlighters slice the original string, never the folded
//! form.
//!
//! Without the `unicode-normalization` feature (slim WASM builds where the
//! site content is known-ASCII), folding is plain lowercasing.

use crate::types::Span;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// One extracted token: folded text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Folded (lowercased, diacritic-free) token text.
    pub text: String,
    /// Byte range of the unfolded token in the input.
    pub span: Span,
}

/// Tokenize a phrase into folded tokens. Deterministic, no side effects.
///
/// Empty and whitespace-only input produce an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    token_spans(text).into_iter().map(|t| t.text).collect()
}

/// Tokenize, keeping the byte span of each token in the original text.
///
/// The index builder records these spans into postings so match metadata can
/// point back at the exact source bytes.
pub fn token_spans(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            push_token(text, s, i, &mut tokens);
        }
    }
    if let Some(s) = start {
        push_token(text, s, text.len(), &mut tokens);
    }

    tokens
}

fn push_token(text: &str, start: usize, end: usize, out: &mut Vec<Token>) {
    let folded = fold(&text[start..end]);
    if !folded.is_empty() {
        out.push(Token {
            text: folded,
            span: Span(start as u32, (end - start) as u32),
        });
    }
}

/// Fold one token for matching: decompose, drop combining marks, lowercase.
///
/// Decomposition runs before lowercasing so characters like 'İ' (which
/// lowercase into a base letter plus a combining dot) fold cleanly.
#[cfg(feature = "unicode-normalization")]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Lightweight fold for builds without `unicode-normalization`: lowercase
/// only. Assumes pre-normalized or ASCII content.
#[cfg(not(feature = "unicode-normalization"))]
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}
