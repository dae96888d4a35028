//! Pairscope CLI — explore pair correlations from the terminal.
//!
//! Commands:
//! - `show` — build the dataset for two identifiers and print it with its
//!   statistics, optionally brushing a row selection
//! - `universe` — list the selectable identifiers
//! - `variables` — run the index category enumeration on its own

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pairscope_core::data::provider::SeriesProvider;
use pairscope_core::data::{CsvDirProvider, SeriesStore, SyntheticProvider, Universe};
use pairscope_core::domain::dataset::Selection;
use pairscope_core::session::{publish_all, Event, PairSession};

mod diagnostics;
mod sink;

use sink::ConsoleSink;

#[derive(Parser)]
#[command(name = "pairscope", about = "Pairscope CLI — pair correlation explorer")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the pair dataset for two identifiers and print it with statistics.
    Show {
        /// First identifier (e.g. AAPL).
        first: String,

        /// Second identifier (e.g. GOOG).
        second: String,

        /// Directory of table_<id>.csv files. Defaults to ./daily.
        #[arg(long, default_value = "daily")]
        data_dir: PathBuf,

        /// Use deterministic synthetic series instead of CSV files.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Universe TOML file. Defaults to the compiled-in set.
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Row positions to brush after the initial build, e.g. "3,4,9".
        #[arg(long)]
        select: Option<String>,

        /// Search index URL for the one-shot startup diagnostics.
        #[arg(long)]
        index_url: Option<String>,
    },
    /// List the identifier universe.
    Universe {
        /// Universe TOML file. Defaults to the compiled-in set.
        #[arg(long)]
        universe: Option<PathBuf>,
    },
    /// Enumerate categorical variable values from the search index.
    Variables {
        /// Search index URL.
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Show {
            first,
            second,
            data_dir,
            synthetic,
            universe,
            select,
            index_url,
        } => cmd_show(
            &first, &second, data_dir, synthetic, universe, select, index_url,
        ),
        Commands::Universe { universe } => cmd_universe(universe),
        Commands::Variables { url } => cmd_variables(&url),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_universe(path: Option<PathBuf>) -> Result<Universe> {
    match path {
        Some(path) => Universe::from_file(&path).map_err(|e| anyhow::anyhow!(e)),
        None => Ok(Universe::default_set()),
    }
}

/// Parse a comma-separated list of row positions.
fn parse_selection(raw: &str) -> Result<Selection> {
    let mut positions = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Ok(position) = part.parse::<usize>() else {
            bail!("invalid row position '{part}' in --select");
        };
        positions.push(position);
    }
    if positions.is_empty() {
        bail!("--select needs at least one row position");
    }
    Ok(Selection::of(positions))
}

fn cmd_show(
    first: &str,
    second: &str,
    data_dir: PathBuf,
    synthetic: bool,
    universe: Option<PathBuf>,
    select: Option<String>,
    index_url: Option<String>,
) -> Result<()> {
    // One-shot side channel, before any session work; never fatal.
    if let Some(url) = &index_url {
        diagnostics::run_startup_diagnostics(url);
    }

    let universe = load_universe(universe)?;
    let provider: Box<dyn SeriesProvider> = if synthetic {
        let end = chrono::Utc::now().date_naive();
        let start = end - chrono::Duration::days(365);
        Box::new(SyntheticProvider::new(start, end))
    } else {
        Box::new(CsvDirProvider::new(data_dir))
    };

    let store = SeriesStore::new(provider);
    let (mut session, effects) = PairSession::new(store, universe, first, second)?;

    let mut sink = ConsoleSink;
    publish_all(&effects, &mut sink);

    if let Some(raw) = select {
        let selection = parse_selection(&raw)?;
        let effects = session.handle(Event::SelectionChanged { selection })?;
        publish_all(&effects, &mut sink);
    }

    Ok(())
}

fn cmd_universe(universe: Option<PathBuf>) -> Result<()> {
    let universe = load_universe(universe)?;
    for identifier in &universe.identifiers {
        println!("{identifier}");
    }
    Ok(())
}

fn cmd_variables(url: &str) -> Result<()> {
    let values = diagnostics::IndexDiagnostics::new(url).category_values()?;
    for value in &values.networks {
        println!("network: {value}");
    }
    for value in &values.pops {
        println!("pop: {value}");
    }
    for value in &values.hosts {
        println!("host: {value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parsing() {
        let selection = parse_selection("3, 4,9").unwrap();
        assert_eq!(selection.positions(), &[3, 4, 9]);

        assert!(parse_selection("3,x").is_err());
        assert!(parse_selection("").is_err());
    }
}
