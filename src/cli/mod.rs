// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quaero command-line interface.
//!
//! Three subcommands: `index` to build a bundle from an extracted site
//! corpus, `search` to query a bundle the same way a browser would, and
//! `inspect` to examine what a bundle contains.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quaero",
    about = "Offline full-text search for static documentation sites",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search bundle from an extracted site corpus
    Index {
        /// Corpus JSON file (titles, headings, contents, versions, dictionary)
        #[arg(short, long)]
        input: String,

        /// Where to write the bundle
        #[arg(short, long)]
        output: String,
    },

    /// Search a bundle and display results
    Search {
        /// Path to the bundle file
        bundle: String,

        /// Search phrase
        phrase: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "8")]
        limit: usize,

        /// Search as if browsing this version
        #[arg(short, long)]
        version: Option<String>,

        /// Print results as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Inspect a bundle's structure
    Inspect {
        /// Path to the bundle file
        bundle: String,
    },
}
