use std::fs;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quaero::bundle::{build_bundle, BundleError, SearchBundle, SiteCorpus};
use quaero::SearchResult;

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Index { input, output } => run_index(&input, &output),
        Commands::Search {
            bundle,
            phrase,
            limit,
            version,
            json,
        } => run_search(&bundle, &phrase, limit, version.as_deref(), json),
        Commands::Inspect { bundle } => run_inspect(&bundle),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("QUAERO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a bundle from an extracted corpus file.
fn run_index(input: &str, output: &str) -> Result<(), BundleError> {
    let raw = fs::File::open(input)?;
    let corpus: SiteCorpus = serde_json::from_reader(std::io::BufReader::new(raw))?;

    #[cfg(feature = "parallel")]
    let spinner = {
        let bar = indicatif::ProgressBar::new_spinner();
        bar.set_message("building typed indexes...");
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        bar
    };

    let started = Instant::now();
    let bundle = build_bundle(corpus);
    let elapsed = started.elapsed();

    #[cfg(feature = "parallel")]
    spinner.finish_and_clear();

    bundle.save(output)?;
    let written = fs::metadata(output)?.len() as usize;

    println!();
    display::section_top("BUNDLE");
    display::row(&format!(
        "  Output:     {} ({})",
        display::truncate_path(output, 40),
        display::format_size(written)
    ));
    let per_kind: Vec<String> = bundle
        .indexes
        .iter()
        .map(|entry| format!("{} {}", entry.documents.len(), entry.kind.as_str()))
        .collect();
    display::row(&format!(
        "  Documents:  {} ({})",
        bundle.document_count(),
        per_kind.join(" / ")
    ));
    display::row(&format!(
        "  Terms:      {}",
        bundle
            .indexes
            .iter()
            .map(|entry| entry.index.term_count())
            .sum::<usize>()
    ));
    display::row(&format!("  Versions:   {}", bundle.versions.len()));
    display::row(&format!("  Built in:   {:.1?}", elapsed));
    display::section_bot();
    println!();

    Ok(())
}

/// Query a bundle the way a browser would.
fn run_search(
    bundle_path: &str,
    phrase: &str,
    limit: usize,
    version: Option<&str>,
    json: bool,
) -> Result<(), BundleError> {
    let bundle = SearchBundle::load(bundle_path)?;
    let source = bundle.into_source(limit, version)?;

    let started = Instant::now();
    let results = source.search(phrase);
    let elapsed = started.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!();
    println!(
        "{} result{} for {} in {:.1?}",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        display::styled(&[display::BOLD], &format!("\"{}\"", phrase)),
        elapsed
    );
    println!();
    for result in &results {
        print_result(result);
    }
    println!();

    Ok(())
}

fn print_result(result: &SearchResult) {
    let glyph = if result.is_inter_of_tree {
        "├─ "
    } else if result.is_last_of_tree {
        "└─ "
    } else {
        ""
    };
    let text = format!(
        "{}{}",
        glyph,
        display::truncate_text(result.document.search_text(), 42)
    );
    let location = match &result.document.fragment {
        Some(fragment) => format!("{}{}", result.document.url, fragment),
        None => result.document.url.clone(),
    };

    println!(
        "  {} {:<46} {} {}",
        display::kind_label(result.kind),
        text,
        display::score_value(result.score),
        display::styled(&[display::DIM], &display::truncate_path(&location, 36)),
    );
}

/// Show what a bundle contains.
fn run_inspect(bundle_path: &str) -> Result<(), BundleError> {
    let bundle = SearchBundle::load(bundle_path)?;
    let size = fs::metadata(bundle_path)?.len() as usize;

    println!();
    display::double_header();
    display::title("QUAERO BUNDLE INSPECTOR");
    display::double_footer();
    println!();

    display::section_top("FILE");
    display::row(&format!(
        "  Path:        {}",
        display::truncate_path(bundle_path, 48)
    ));
    display::row(&format!("  Size:        {}", display::format_size(size)));
    display::row(&format!("  Documents:   {}", bundle.document_count()));
    display::row(&format!(
        "  Dictionary:  {} entries",
        bundle.dictionary.len()
    ));
    display::section_bot();
    println!();

    display::section_top("VERSIONS");
    if bundle.versions.is_empty() {
        display::row("  (unversioned site)");
    } else {
        for (position, version) in bundle.versions.iter().enumerate() {
            let marker = if position == 0 { " (default)" } else { "" };
            display::row(&format!(
                "  ▸ {:<12} {}{}",
                version.name, version.label, marker
            ));
        }
    }
    display::section_bot();
    println!();

    display::section_top("INDEXES");
    let max_docs = bundle
        .indexes
        .iter()
        .map(|entry| entry.documents.len())
        .max()
        .unwrap_or(1)
        .max(1);
    for entry in &bundle.indexes {
        let docs = entry.documents.len();
        let bar_len = if docs == 0 { 0 } else { (docs * 24 / max_docs).max(1) };
        let bar: String = "█".repeat(bar_len);
        let empty: String = "░".repeat(24 - bar_len);
        display::row(&format!(
            "  {} {:>7} docs {:>8} terms  {}{}",
            display::kind_label(entry.kind),
            docs,
            entry.index.term_count(),
            bar,
            empty
        ));
    }
    display::section_bot();
    println!();

    Ok(())
}
