//! Time series — the fundamental data unit.
//!
//! A series is an ordered sequence of (date, value) observations keyed by
//! date. Dates are strictly increasing; construction sorts its input and
//! rejects duplicates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single dated value in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Construction errors for a time series.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("duplicate date {date} in series '{identifier}'")]
    DuplicateDate {
        identifier: String,
        date: NaiveDate,
    },
}

/// A named time series with strictly increasing dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    identifier: String,
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from unordered observations.
    ///
    /// Observations are sorted by date ascending. A duplicate date is a
    /// construction error rather than a silent last-row-wins.
    pub fn new(
        identifier: impl Into<String>,
        mut observations: Vec<Observation>,
    ) -> Result<Self, SeriesError> {
        let identifier = identifier.into();
        observations.sort_by_key(|obs| obs.date);
        for pair in observations.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(SeriesError::DuplicateDate {
                    identifier,
                    date: pair[0].date,
                });
            }
        }
        Ok(Self {
            identifier,
            observations,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// First difference of values against the previous date in this series.
    ///
    /// The result has one fewer entry than the source; the first date has no
    /// previous value and therefore no return.
    pub fn returns(&self) -> Vec<Observation> {
        self.observations
            .windows(2)
            .map(|pair| Observation {
                date: pair[1].date,
                value: pair[1].value - pair[0].value,
            })
            .collect()
    }
}
