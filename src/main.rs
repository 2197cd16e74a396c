//! DirView — headless directory browser.
//!
//! Thin binary entry point. It drives the `dirview-core` explorer the same
//! way a window would: submit the typed path or pattern, wait for the scan
//! to complete, optionally re-sort, and render the ordered rows.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use dirview_core::model::format::format_count;
use dirview_core::{Entry, Explorer, ExplorerConfig, SortColumn, SortDirection};
use std::path::PathBuf;
use std::time::Duration;

/// Longest time to wait for a listing before giving up.
const SCAN_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Parser)]
#[command(name = "dirview", version, about = "List a directory the way DirView shows it")]
struct Cli {
    /// Directory to list, or a directory plus wildcard pattern (e.g. `src/*.rs`).
    /// Defaults to the current directory.
    input: Option<String>,

    /// Column to sort by once the listing completes.
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Sort descending.
    #[arg(long)]
    desc: bool,

    /// Print rows as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Size,
    Modified,
    Type,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortColumn::Name,
            SortArg::Size => SortColumn::Size,
            SortArg::Modified => SortColumn::Modified,
            SortArg::Type => SortColumn::Kind,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the listing.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExplorerConfig::default(),
    };

    let cwd = std::env::current_dir().context("resolving current directory")?;
    let mut explorer = Explorer::open(&cwd, &config);

    if let Some(input) = cli.input.as_deref() {
        if !explorer.submit_input(input) {
            bail!("not a directory: {input}");
        }
    }

    let summary = explorer
        .wait_for_completion(SCAN_TIMEOUT)
        .with_context(|| format!("listing {} timed out", explorer.current_path().display()))?;

    if cli.sort.is_some() || cli.desc {
        let column = cli.sort.map(SortColumn::from).unwrap_or_default();
        let direction = if cli.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        explorer.resort(column, direction);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(explorer.rows())?);
    } else {
        print_table(explorer.rows());
        println!();
        println!(
            "{} entries in {}{} ({:?}, {} unreadable)",
            format_count(summary.entry_count as u64),
            explorer.current_path().display(),
            explorer
                .pattern()
                .map(|p| format!(" matching '{p}'"))
                .unwrap_or_default(),
            summary.duration,
            summary.error_count,
        );
    }

    explorer.stop();
    Ok(())
}

fn print_table(rows: &[Entry]) {
    let name_width = rows
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    println!(
        "{:<name_width$}  {:>10}  {:<9}  {}",
        "Name", "Size", "Type", "Modified"
    );
    for entry in rows {
        println!(
            "{:<name_width$}  {:>10}  {:<9}  {}",
            entry.name.as_str(),
            entry.display_size,
            entry.kind_label(),
            entry.display_modified,
        );
    }
}
