//! Series provider trait and structured error types.
//!
//! The `SeriesProvider` trait abstracts over backing sources (CSV directory,
//! synthetic walks) so implementations can be swapped and mocked for tests.
//! The memoizing store sits above this trait — providers don't know about
//! the cache.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::series::{Observation, SeriesError, TimeSeries};

/// Structured error types for series loading.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no series data for identifier '{identifier}'")]
    MissingSeries { identifier: String },

    #[error("failed to read series '{identifier}': {reason}")]
    ReadFailed { identifier: String, reason: String },

    #[error("malformed series '{identifier}': {reason}")]
    Malformed { identifier: String, reason: String },

    #[error("invalid series: {0}")]
    Invalid(#[from] SeriesError),
}

/// Trait for series backing sources.
///
/// `fetch` performs the full blocking read for one identifier; callers that
/// need memoization go through `SeriesStore`.
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Load the complete series for an identifier.
    fn fetch(&self, identifier: &str) -> Result<TimeSeries, DataError>;
}

/// Reads one series per identifier from a directory of CSV tables.
///
/// Layout: `{dir}/table_<identifier>.csv` (identifier lowercased), headerless
/// rows of at least six fields with the date first (`%Y-%m-%d`) and the
/// closing value sixth. Only the close column feeds the pipeline.
pub struct CsvDirProvider {
    dir: PathBuf,
}

impl CsvDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn table_path(&self, identifier: &str) -> PathBuf {
        self.dir
            .join(format!("table_{}.csv", identifier.to_lowercase()))
    }

    fn parse_table(identifier: &str, path: &Path) -> Result<TimeSeries, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ReadFailed {
                identifier: identifier.to_string(),
                reason: e.to_string(),
            })?;

        let mut observations = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| DataError::Malformed {
                identifier: identifier.to_string(),
                reason: format!("row {}: {e}", line + 1),
            })?;
            if record.len() < 6 {
                return Err(DataError::Malformed {
                    identifier: identifier.to_string(),
                    reason: format!("row {}: expected at least 6 fields, got {}", line + 1, record.len()),
                });
            }

            let date = NaiveDate::parse_from_str(&record[0], "%Y-%m-%d").map_err(|e| {
                DataError::Malformed {
                    identifier: identifier.to_string(),
                    reason: format!("row {}: bad date '{}': {e}", line + 1, &record[0]),
                }
            })?;
            let value: f64 = record[5].parse().map_err(|e| DataError::Malformed {
                identifier: identifier.to_string(),
                reason: format!("row {}: bad close '{}': {e}", line + 1, &record[5]),
            })?;

            observations.push(Observation { date, value });
        }

        Ok(TimeSeries::new(identifier, observations)?)
    }
}

impl SeriesProvider for CsvDirProvider {
    fn name(&self) -> &str {
        "csv-dir"
    }

    fn fetch(&self, identifier: &str) -> Result<TimeSeries, DataError> {
        let path = self.table_path(identifier);
        if !path.exists() {
            return Err(DataError::MissingSeries {
                identifier: identifier.to_string(),
            });
        }
        Self::parse_table(identifier, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_table_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("pairscope_csv_{}_{id}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_close_column_from_headerless_table() {
        let dir = temp_table_dir();
        fs::write(
            dir.join("table_aapl.csv"),
            "2024-01-02,AAPL,99.0,101.0,98.0,100.5,1000\n\
             2024-01-03,AAPL,100.0,103.0,99.5,102.0,1100\n",
        )
        .unwrap();

        let provider = CsvDirProvider::new(&dir);
        let series = provider.fetch("AAPL").unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].value, 100.5);
        assert_eq!(series.observations()[1].value, 102.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_table_is_missing_series() {
        let dir = temp_table_dir();
        let provider = CsvDirProvider::new(&dir);

        let result = provider.fetch("NOPE");
        assert!(matches!(
            result,
            Err(DataError::MissingSeries { identifier }) if identifier == "NOPE"
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn short_row_is_malformed() {
        let dir = temp_table_dir();
        fs::write(dir.join("table_aapl.csv"), "2024-01-02,100.5\n").unwrap();

        let provider = CsvDirProvider::new(&dir);
        assert!(matches!(
            provider.fetch("AAPL"),
            Err(DataError::Malformed { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
