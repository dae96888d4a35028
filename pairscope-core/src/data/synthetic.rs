//! Synthetic series provider — deterministic random walks, no files.
//!
//! A developer/debug source: every identifier maps to a reproducible walk
//! seeded from a BLAKE3 hash of its name, so the same identifier always
//! yields the same series regardless of fetch order.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::series::{Observation, TimeSeries};

use super::provider::{DataError, SeriesProvider};

/// Deterministic random-walk provider over weekday dates.
pub struct SyntheticProvider {
    start: NaiveDate,
    end: NaiveDate,
}

impl SyntheticProvider {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    fn walk(&self, identifier: &str) -> Vec<Observation> {
        let seed: [u8; 32] = *blake3::hash(identifier.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut observations = Vec::new();
        let mut value = 100.0_f64;
        let mut current = self.start;

        while current <= self.end {
            let weekday = current.weekday();
            if weekday == Weekday::Sat || weekday == Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }

            value *= 1.0 + rng.gen_range(-0.03..0.03);
            observations.push(Observation {
                date: current,
                value,
            });
            current += chrono::Duration::days(1);
        }

        observations
    }
}

impl SeriesProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, identifier: &str) -> Result<TimeSeries, DataError> {
        Ok(TimeSeries::new(identifier, self.walk(identifier))?)
    }
}
