//! Per-publication, per-year citation counters.
//!
//! The tally maps publication title to a year-indexed counter row. Rows are
//! pre-filled with zero for every year in range before counting begins, so a
//! missing bucket during counting always means the citation year falls
//! outside the configured window.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar years covered by a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Create a range from `start` through `end` inclusive.
    ///
    /// An inverted range is normalized to the single year `start`.
    #[must_use]
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end: end.max(start) }
    }

    /// Range from `start` through the current calendar year.
    #[must_use]
    pub fn through_current(start: i32) -> Self {
        Self::new(start, Utc::now().year())
    }

    /// First year in range.
    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// Last year in range.
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Check whether a year falls inside the range.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Iterate the years in ascending order.
    #[must_use]
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }
}

/// Outcome of tallying a single citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationOutcome {
    /// Year present and inside the range; bucket incremented.
    Counted,
    /// Citing paper carries no publication year; dropped.
    MissingYear,
    /// Year present but outside the range; dropped.
    OutOfRange,
}

/// Aggregated citation classification for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyReport {
    /// Citations counted into a year bucket.
    pub counted: u64,
    /// Citations dropped for lack of a publication year.
    pub missing_year: u64,
    /// Citations dropped for a year outside the range.
    pub out_of_range: u64,
}

impl TallyReport {
    /// Record one classification outcome.
    pub fn record(&mut self, outcome: CitationOutcome) {
        match outcome {
            CitationOutcome::Counted => self.counted += 1,
            CitationOutcome::MissingYear => self.missing_year += 1,
            CitationOutcome::OutOfRange => self.out_of_range += 1,
        }
    }

    /// Total citations dropped for any reason.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.missing_year + self.out_of_range
    }

    /// Total citations seen.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.counted + self.dropped()
    }
}

/// Publication title -> year label -> citation count.
///
/// Year keys are four-digit strings, so the BTreeMap ordering is
/// chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationTally(BTreeMap<String, BTreeMap<String, u64>>);

impl CitationTally {
    /// Build a tally with a zero-filled row for every publication with at
    /// least one citation.
    ///
    /// Insertion is keyed by title and unconditional: publications sharing a
    /// title overwrite each other's row, and the survivors share one row
    /// during counting.
    #[must_use]
    pub fn init<'a>(titles: impl IntoIterator<Item = &'a str>, range: &YearRange) -> Self {
        let mut tally = Self::default();
        for title in titles {
            let row: BTreeMap<String, u64> =
                range.years().map(|year| (year.to_string(), 0)).collect();
            tally.0.insert(title.to_string(), row);
        }
        tally
    }

    /// Classify one citation year and, if counted, increment the bucket.
    ///
    /// A year that resolves to no pre-filled bucket is out of range by
    /// construction (see module docs).
    pub fn apply(&mut self, title: &str, year: Option<i32>) -> CitationOutcome {
        let Some(year) = year else {
            return CitationOutcome::MissingYear;
        };

        match self.0.get_mut(title).and_then(|row| row.get_mut(&year.to_string())) {
            Some(bucket) => {
                *bucket += 1;
                CitationOutcome::Counted
            }
            None => CitationOutcome::OutOfRange,
        }
    }

    /// Number of publication rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the tally has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up one publication's counter row.
    #[must_use]
    pub fn row(&self, title: &str) -> Option<&BTreeMap<String, u64>> {
        self.0.get(title)
    }

    /// Iterate rows in title order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, u64>)> {
        self.0.iter()
    }

    /// Sum of all counted citations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().flat_map(BTreeMap::values).sum()
    }
}

/// Row/column view of a tally: rows are years ascending, columns are
/// publication titles in title order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyTable {
    years: Vec<String>,
    titles: Vec<String>,
    /// `counts[year_index][title_index]`
    counts: Vec<Vec<u64>>,
}

impl TallyTable {
    /// Derive the table from a tally.
    ///
    /// Year rows are the union of all year labels; rows created by
    /// [`CitationTally::init`] share one label set, so in practice this is
    /// the initialized range.
    #[must_use]
    pub fn from_tally(tally: &CitationTally) -> Self {
        let titles: Vec<String> = tally.iter().map(|(title, _)| title.clone()).collect();

        let years: Vec<String> = tally
            .iter()
            .flat_map(|(_, row)| row.keys().cloned())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let counts = years
            .iter()
            .map(|year| {
                titles
                    .iter()
                    .map(|title| {
                        tally.row(title).and_then(|row| row.get(year)).copied().unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        Self { years, titles, counts }
    }

    /// Year labels, ascending.
    #[must_use]
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Publication titles (column order).
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Count at a row/column position.
    #[must_use]
    pub fn count(&self, year_index: usize, title_index: usize) -> u64 {
        self.counts[year_index][title_index]
    }

    /// Per-year totals across all publications.
    #[must_use]
    pub fn year_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Largest per-year total, the stacked chart's y ceiling.
    #[must_use]
    pub fn max_year_total(&self) -> u64 {
        self.year_totals().into_iter().max().unwrap_or(0)
    }

    /// Check whether the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
