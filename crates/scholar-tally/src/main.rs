//! scholar-tally - Entry point
//!
//! Tallies an author's citations per publication per year and renders a
//! stacked bar chart.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_tally::cache::SnapshotCache;
use scholar_tally::config::{Config, DEFAULT_CACHE_DIR, DEFAULT_START_YEAR};
use scholar_tally::tally::{TallyTable, YearRange};
use scholar_tally::{ScholarClient, chart, export, pipeline};

#[derive(Parser, Debug)]
#[command(name = "scholar-tally")]
#[command(about = "Per-year citation tallies for an author's publications")]
#[command(version)]
struct Cli {
    /// Author name to search for
    #[arg(long)]
    author: String,

    /// First year of the tally range (through the current year)
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// Directory for cached API snapshots
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Output path for the stacked bar chart
    #[arg(long, default_value = "citations.svg")]
    chart: PathBuf,

    /// Output path for the JSON tally
    #[arg(long, default_value = "data.json")]
    export: PathBuf,

    /// Optional output path for a CSV view of the tally
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        author = %cli.author,
        start_year = cli.start_year,
        "Starting citation tally"
    );

    let client = ScholarClient::new(Config::new(cli.api_key))?;
    let cache = SnapshotCache::open(&cli.cache_dir)?;
    let range = YearRange::through_current(cli.start_year);

    let run = pipeline::run(&client, &cache, &cli.author, range).await?;

    if run.report.dropped() > 0 {
        tracing::warn!(
            missing_year = run.report.missing_year,
            out_of_range = run.report.out_of_range,
            "citations dropped during tally"
        );
    }

    // Export before the chart so an empty tally still leaves data.json behind.
    export::write_json(&run.tally, &cli.export)?;
    tracing::info!(path = %cli.export.display(), "tally exported");

    let table = TallyTable::from_tally(&run.tally);

    if let Some(ref csv_path) = cli.csv {
        export::write_csv(&table, csv_path)?;
        tracing::info!(path = %csv_path.display(), "CSV exported");
    }

    chart::render(&table, &cli.chart, chart::DEFAULT_SIZE)?;
    tracing::info!(path = %cli.chart.display(), "chart rendered");

    Ok(())
}
