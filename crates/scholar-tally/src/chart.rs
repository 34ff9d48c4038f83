//! Stacked bar chart of the citation tally.
//!
//! One bar per year, one colored segment per publication, rendered to an
//! SVG file with `plotters`.

use std::path::Path;

use plotters::prelude::*;

use crate::error::ChartError;
use crate::tally::TallyTable;

/// Default chart dimensions in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (1024, 640);

/// Legend labels longer than this are truncated.
const LEGEND_LABEL_CHARS: usize = 48;

/// Render the table as a stacked bar chart.
///
/// # Errors
///
/// Returns [`ChartError::Empty`] when the table has no columns, or
/// [`ChartError::Render`] on a backend failure.
pub fn render(table: &TallyTable, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
    if table.is_empty() {
        return Err(ChartError::Empty);
    }

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let n_years = table.years().len();
    let y_max = ((table.max_year_total().max(1)) as f64 * 1.1).ceil() as u64;

    let mut chart = ChartBuilder::on(&root)
        .caption("Citations per year", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d((0..n_years as i32 - 1).into_segmented(), 0u64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|coord| match coord {
            SegmentValue::CenterOf(i) if *i >= 0 => {
                table.years().get(*i as usize).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .y_desc("Citations")
        .draw()
        .map_err(render_err)?;

    // Stack bottom-up: each column's segment starts where the previous
    // column's segment for that year ended.
    let mut stack_base = vec![0u64; n_years];

    for (column, title) in table.titles().iter().enumerate() {
        let color = Palette99::pick(column);

        let mut segments = Vec::with_capacity(n_years);
        for (year_index, base) in stack_base.iter_mut().enumerate() {
            let count = table.count(year_index, column);
            if count == 0 {
                continue;
            }

            let (bottom, top) = (*base, *base + count);
            *base = top;

            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(year_index as i32), bottom),
                    (SegmentValue::Exact(year_index as i32 + 1), top),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            segments.push(bar);
        }

        chart
            .draw_series(segments)
            .map_err(render_err)?
            .label(legend_label(title))
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::Render(e.to_string())
}

fn legend_label(title: &str) -> String {
    if title.chars().count() > LEGEND_LABEL_CHARS {
        let truncated: String = title.chars().take(LEGEND_LABEL_CHARS).collect();
        format!("{truncated}…")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::{CitationTally, YearRange};

    fn sample_table() -> TallyTable {
        let range = YearRange::new(2020, 2021);
        let mut tally = CitationTally::init(["Paper A", "Paper B"], &range);
        tally.apply("Paper A", Some(2020));
        tally.apply("Paper B", Some(2020));
        tally.apply("Paper B", Some(2021));
        TallyTable::from_tally(&tally)
    }

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        render(&sample_table(), &path, DEFAULT_SIZE).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("2020"));
    }

    #[test]
    fn test_render_empty_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        let result = render(&TallyTable::from_tally(&CitationTally::default()), &path, (100, 100));
        assert!(matches!(result, Err(ChartError::Empty)));
    }

    #[test]
    fn test_legend_label_truncates_long_titles() {
        let long = "x".repeat(100);
        let label = legend_label(&long);
        assert!(label.chars().count() <= LEGEND_LABEL_CHARS + 1);
        assert!(label.ends_with('…'));

        assert_eq!(legend_label("short"), "short");
    }

    #[test]
    fn test_render_single_year_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");

        let range = YearRange::new(2021, 2021);
        let mut tally = CitationTally::init(["Only Paper"], &range);
        tally.apply("Only Paper", Some(2021));

        render(&TallyTable::from_tally(&tally), &path, (320, 240)).unwrap();
        assert!(path.exists());
    }
}
