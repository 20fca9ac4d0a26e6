//! Observation Records
//! Typed rows extracted from the cleaned DataFrame.

use super::cleaner::UNIX_EPOCH_DAYS_FROM_CE;
use super::loader::{AREA_COL, DATE_COL, RATE_COL, REGION_COL};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing value in column '{column}' at row {row}")]
    Missing { column: &'static str, row: usize },
    #[error("Date out of range at row {0}")]
    InvalidDate(usize),
}

/// Urban/Rural classification of an observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Area {
    Urban,
    Rural,
    Other(String),
}

impl Area {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Urban" => Area::Urban,
            "Rural" => Area::Rural,
            other => Area::Other(other.to_string()),
        }
    }
}

/// Calendar month bucket, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One cleaned row of the unemployment table.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub region: String,
    pub area: Area,
    /// Estimated unemployment rate, in percent.
    pub rate: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, region: &str, area: Area, rate: f64) -> Self {
        Self {
            date,
            region: region.to_string(),
            area,
            rate,
        }
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.date.year(),
            month: self.date.month(),
        }
    }
}

/// The cleaned observation table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    records: Vec<Observation>,
}

impl ObservationTable {
    /// Build records from a cleaned DataFrame.
    ///
    /// Expects the date column as Polars `Date`; any null is an error since
    /// cleaning has already dropped incomplete rows.
    pub fn from_frame(df: &DataFrame) -> Result<Self, RecordError> {
        let dates = df.column(DATE_COL)?.date()?;
        let regions = df.column(REGION_COL)?.cast(&DataType::String)?;
        let regions = regions.str()?;
        let areas = df.column(AREA_COL)?.cast(&DataType::String)?;
        let areas = areas.str()?;
        let rates = df.column(RATE_COL)?.cast(&DataType::Float64)?;
        let rates = rates.f64()?;

        let records = dates
            .physical()
            .into_iter()
            .zip(regions)
            .zip(areas)
            .zip(rates)
            .enumerate()
            .map(|(row, (((days, region), area), rate))| {
                let days = days.ok_or(RecordError::Missing { column: DATE_COL, row })?;
                let date = NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                    .ok_or(RecordError::InvalidDate(row))?;
                let region = region.ok_or(RecordError::Missing { column: REGION_COL, row })?;
                let area = area.ok_or(RecordError::Missing { column: AREA_COL, row })?;
                let rate = rate.ok_or(RecordError::Missing { column: RATE_COL, row })?;

                Ok(Observation::new(date, region.trim(), Area::parse(area), rate))
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        log::debug!("Extracted {} observations", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
