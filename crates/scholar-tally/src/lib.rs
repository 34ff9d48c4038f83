//! scholar-tally
//!
//! Fetches an author's publication list from the Semantic Scholar Graph API,
//! counts how many citations each publication received per year, caches every
//! remote response to disk, and renders the result as a stacked bar chart.
//!
//! # Pipeline
//!
//! 1. **Resolve** the author profile (cache-or-fetch).
//! 2. **Initialize** a zero-filled year range for every cited publication.
//! 3. **Count** citing works into year buckets, classifying each citation.
//! 4. **Render & export** a stacked bar chart (SVG) and a JSON tally.
//!
//! # Example
//!
//! ```no_run
//! use scholar_tally::{cache::SnapshotCache, client::ScholarClient, config::Config};
//! use scholar_tally::{pipeline, tally::YearRange};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScholarClient::new(Config::default())?;
//!     let cache = SnapshotCache::open("cache")?;
//!     let range = YearRange::through_current(2014);
//!
//!     let run = pipeline::run(&client, &cache, "Ada Lovelace", range).await?;
//!     println!("{} citations counted", run.report.counted);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod tally;

pub use client::ScholarClient;
pub use config::Config;
pub use error::{CacheError, ChartError, ClientError, ExportError, TallyError};
