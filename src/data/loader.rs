//! CSV Data Loader Module
//! Reads the unemployment table with Polars and normalizes its header.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Normalized names of the columns the analysis reads.
pub const DATE_COL: &str = "date";
pub const REGION_COL: &str = "region";
pub const AREA_COL: &str = "area";
pub const RATE_COL: &str = "estimated_unemployment_rate_(%)";

pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COL, REGION_COL, AREA_COL, RATE_COL];

const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Required column '{0}' not found")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and normalize its column names.
    ///
    /// Malformed rows are an error, the reader is not lenient.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let mut df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?;

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| Self::normalize_column_name(name.as_str()))
            .collect();
        df.set_column_names(names)?;

        Self::check_required_columns(&df)?;

        log::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(df)
    }

    /// Trim, replace spaces with underscores, lower-case.
    pub fn normalize_column_name(name: &str) -> String {
        name.trim().replace(' ', "_").to_lowercase()
    }

    /// Get list of column names from a DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn check_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let columns = Self::get_columns(df);
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn normalizes_header_names() {
        assert_eq!(
            DataLoader::normalize_column_name(" Estimated Unemployment Rate (%)"),
            "estimated_unemployment_rate_(%)"
        );
        assert_eq!(DataLoader::normalize_column_name("Region "), "region");
        assert_eq!(DataLoader::normalize_column_name(" Date"), "date");
    }

    #[test]
    fn loads_and_renames_columns() {
        let file = write_csv(
            "Region, Date, Frequency, Estimated Unemployment Rate (%),Area\n\
             Assam, 31-05-2019, Monthly,4.5,Rural\n\
             Assam, 30-06-2019, Monthly,5.5,Urban\n",
        );

        let df = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            DataLoader::get_columns(&df),
            vec!["region", "date", "frequency", RATE_COL, "area"]
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let file = write_csv("Region,Date,Area\nAssam,31-05-2019,Rural\n");

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        match err {
            LoaderError::MissingColumn(name) => assert_eq!(name, RATE_COL),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_rows_fail_to_parse() {
        let file = write_csv(
            "Region,Date,Estimated Unemployment Rate (%),Area\n\
             Assam,31-05-2019,4.5,Rural,extra,fields\n",
        );

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }
}
