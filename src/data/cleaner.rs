//! Data Cleaner Module
//! Parses dates, reports the table shape, drops duplicate and incomplete rows.

use super::loader::{DATE_COL, RATE_COL};
use crate::report;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the origin of Polars' Date type.
pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Accepted date layouts, day before month. ISO dates are still read year-first.
const DAY_FIRST_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d"];

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// What the cleaning pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub unparseable_dates: usize,
    pub duplicates_removed: usize,
    pub rows_with_missing_removed: usize,
    pub rows_after: usize,
}

/// Handles data cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Run every cleaning step in order and print the inspection report.
    ///
    /// Duplicates are removed before incomplete rows so the printed duplicate
    /// count refers to the table as loaded.
    pub fn clean(df: DataFrame) -> Result<(DataFrame, CleaningReport), CleanerError> {
        let rows_before = df.height();

        let (df, unparseable_dates) = Self::parse_dates(df)?;
        let df = Self::coerce_rate(df)?;

        report::print_overview(&df);

        let (df, duplicates_removed) = Self::drop_duplicates(df)?;
        report::print_duplicates(duplicates_removed);

        let (df, rows_with_missing_removed) = Self::drop_missing(df)?;

        let summary = CleaningReport {
            rows_before,
            unparseable_dates,
            duplicates_removed,
            rows_with_missing_removed,
            rows_after: df.height(),
        };
        if summary.unparseable_dates > 0 {
            log::warn!("{} date values could not be parsed", summary.unparseable_dates);
        }
        log::info!(
            "Cleaned {} -> {} rows ({} duplicates, {} incomplete)",
            summary.rows_before,
            summary.rows_after,
            summary.duplicates_removed,
            summary.rows_with_missing_removed
        );

        Ok((df, summary))
    }

    /// Parse a single day-first date. Surrounding whitespace is ignored.
    pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        DAY_FIRST_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    }

    /// Convert the date column to Polars' Date type. Unparseable values become null.
    ///
    /// Returns the frame and the number of non-null values that failed to parse.
    pub fn parse_dates(mut df: DataFrame) -> Result<(DataFrame, usize), CleanerError> {
        if df.column(DATE_COL)?.dtype() == &DataType::Date {
            return Ok((df, 0));
        }

        let text = df.column(DATE_COL)?.cast(&DataType::String)?;
        let mut unparseable = 0usize;
        let days: Vec<Option<i32>> = text
            .str()?
            .into_iter()
            .map(|value| {
                let value = value?;
                let parsed = Self::parse_day_first(value);
                if parsed.is_none() {
                    log::debug!("Unparseable date {:?}", value);
                    unparseable += 1;
                }
                parsed.map(|date| date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            })
            .collect();

        let dates = Series::new(DATE_COL.into(), days).cast(&DataType::Date)?;
        df.with_column(dates)?;
        Ok((df, unparseable))
    }

    /// Cast the rate column to Float64. Non-numeric text becomes null.
    pub fn coerce_rate(mut df: DataFrame) -> Result<DataFrame, CleanerError> {
        if df.column(RATE_COL)?.dtype() != &DataType::Float64 {
            let rate = df.column(RATE_COL)?.cast(&DataType::Float64)?;
            df.with_column(rate)?;
        }
        Ok(df)
    }

    /// Count rows identical to an earlier row across every column.
    pub fn count_duplicates(df: &DataFrame) -> Result<usize, CleanerError> {
        if df.height() == 0 {
            return Ok(0);
        }
        let unique = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }

    /// Keep the first occurrence of every duplicate set, preserving row order.
    pub fn drop_duplicates(df: DataFrame) -> Result<(DataFrame, usize), CleanerError> {
        let duplicates = Self::count_duplicates(&df)?;
        if duplicates == 0 {
            return Ok((df, 0));
        }
        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        Ok((deduped, duplicates))
    }

    /// Drop every row with a null in any column.
    pub fn drop_missing(df: DataFrame) -> Result<(DataFrame, usize), CleanerError> {
        let before = df.height();
        let cleaned = df.drop_nulls::<String>(None)?;
        let removed = before - cleaned.height();
        Ok((cleaned, removed))
    }

    /// Null count per column, in column order.
    pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }
}
