//! Console Report Module
//! Text output for table inspection, the Covid comparison and the region summary.

use crate::data::DataCleaner;
use crate::stats::{CovidImpact, RegionSummary};
use polars::prelude::*;

const PREVIEW_ROWS: usize = 5;

/// Percentage with two decimals. `NaN` prints as `NaN%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// The two Covid comparison lines, before then during.
pub fn covid_lines(impact: &CovidImpact) -> [String; 2] {
    [
        format!(
            "Mean Unemployment Rate before Covid (before Mar 2020): {}",
            format_percent(impact.before)
        ),
        format!(
            "Mean Unemployment Rate during Covid (Mar 2020 - Jun 2020): {}",
            format_percent(impact.during)
        ),
    ]
}

pub fn print_covid_impact(impact: &CovidImpact) {
    for line in covid_lines(impact) {
        println!("{}", line);
    }
}

/// Column name, dtype and non-null count per column.
pub fn schema_lines(df: &DataFrame) -> Vec<String> {
    let name_width = df
        .get_column_names()
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        .max("Column".len());

    let mut lines = vec![format!(
        "{:<name_width$}  {:>14}  {}",
        "Column", "Non-Null Count", "Dtype"
    )];
    for column in df.get_columns() {
        let non_null = column.len() - column.null_count();
        lines.push(format!(
            "{:<name_width$}  {:>14}  {}",
            column.name().as_str(),
            format!("{} non-null", non_null),
            column.dtype()
        ));
    }
    lines
}

/// Print the first rows, shape, schema and missing counts of a table.
pub fn print_overview(df: &DataFrame) {
    println!("First {} rows:", PREVIEW_ROWS);
    println!("{}", df.head(Some(PREVIEW_ROWS)));

    println!("\nInfo:");
    println!("{} rows, {} columns", df.height(), df.width());
    for line in schema_lines(df) {
        println!("{}", line);
    }

    println!("\nMissing values per column:");
    for (name, missing) in DataCleaner::missing_counts(df) {
        println!("{}: {}", name, missing);
    }
}

pub fn print_duplicates(count: usize) {
    println!("\nDuplicate rows: {}", count);
}

/// Aligned `region | min | mean | max` table, one line per region.
pub fn region_summary_lines(summary: &[RegionSummary]) -> Vec<String> {
    let region_width = summary
        .iter()
        .map(|s| s.region.len())
        .max()
        .unwrap_or(0)
        .max("region".len());

    let mut lines = vec![format!(
        "{:<region_width$} | {:>8} | {:>8} | {:>8}",
        "region", "min", "mean", "max"
    )];
    for s in summary {
        lines.push(format!(
            "{:<region_width$} | {:>8.2} | {:>8.2} | {:>8.2}",
            s.region, s.min, s.mean, s.max
        ));
    }
    lines
}

pub fn print_region_summary(summary: &[RegionSummary]) {
    println!("\nState-wise Unemployment Rate Summary (min, mean, max):");
    for line in region_summary_lines(summary) {
        println!("{}", line);
    }
}
