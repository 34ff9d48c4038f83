//! Property-based tests for the citation tally.

use proptest::prelude::*;

use scholar_tally::tally::{CitationOutcome, CitationTally, TallyReport, YearRange};

/// Generate a year range of at most a decade somewhere plausible.
fn arb_range() -> impl Strategy<Value = YearRange> {
    (1990i32..2030, 0i32..10).prop_map(|(start, span)| YearRange::new(start, start + span))
}

/// Generate citation years around (and outside) the tally window.
fn arb_years() -> impl Strategy<Value = Vec<Option<i32>>> {
    proptest::collection::vec(proptest::option::of(1980i32..2040), 0..200)
}

proptest! {
    /// Every citation lands in exactly one report bucket.
    #[test]
    fn report_partitions_citations((range, years) in (arb_range(), arb_years())) {
        let mut tally = CitationTally::init(["Paper"], &range);
        let mut report = TallyReport::default();

        for year in &years {
            report.record(tally.apply("Paper", *year));
        }

        prop_assert_eq!(report.total() as usize, years.len());
        prop_assert_eq!(report.counted + report.dropped(), report.total());
    }

    /// The tally sum equals the counted total, never the dropped ones.
    #[test]
    fn tally_sum_matches_counted((range, years) in (arb_range(), arb_years())) {
        let mut tally = CitationTally::init(["Paper"], &range);
        let mut report = TallyReport::default();

        for year in &years {
            report.record(tally.apply("Paper", *year));
        }

        prop_assert_eq!(tally.total(), report.counted);
    }

    /// Classification agrees with the range: in-window years count, the rest drop.
    #[test]
    fn outcome_matches_range(range in arb_range(), year in proptest::option::of(1980i32..2040)) {
        let mut tally = CitationTally::init(["Paper"], &range);
        let outcome = tally.apply("Paper", year);

        match year {
            None => prop_assert_eq!(outcome, CitationOutcome::MissingYear),
            Some(y) if range.contains(y) => prop_assert_eq!(outcome, CitationOutcome::Counted),
            Some(_) => prop_assert_eq!(outcome, CitationOutcome::OutOfRange),
        }
    }

    /// Initialization always pre-fills the whole window with zeros.
    #[test]
    fn init_covers_range(range in arb_range()) {
        let tally = CitationTally::init(["Paper"], &range);
        let row = tally.row("Paper").unwrap();

        prop_assert_eq!(row.len() as i32, range.end() - range.start() + 1);
        prop_assert!(row.values().all(|&count| count == 0));
        prop_assert!(row.contains_key(&range.start().to_string()));
        prop_assert!(row.contains_key(&range.end().to_string()));
    }

    /// Applying the same citation stream twice doubles counts, never reorders rows.
    #[test]
    fn apply_is_accumulative((range, years) in (arb_range(), arb_years())) {
        let mut once = CitationTally::init(["Paper"], &range);
        let mut twice = CitationTally::init(["Paper"], &range);

        for year in &years {
            once.apply("Paper", *year);
            twice.apply("Paper", *year);
            twice.apply("Paper", *year);
        }

        prop_assert_eq!(twice.total(), once.total() * 2);
    }
}
