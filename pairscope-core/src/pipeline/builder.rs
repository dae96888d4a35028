//! Pair dataset construction: fetch, derive returns, inner-join on date.
//!
//! The builder holds no dataset cache — a dataset is rebuilt on every
//! identifier change. The series store alone guarantees one source read per
//! identifier, so swapped argument order never re-reads the source.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::provider::DataError;
use crate::data::store::SeriesStore;
use crate::domain::dataset::{PairDataset, PairRow};
use crate::domain::series::TimeSeries;

/// Errors from pair construction.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot pair identifier '{identifier}' with itself")]
    SameIdentifier { identifier: String },

    #[error("'{first}' and '{second}' share no common dates")]
    EmptyJoin { first: String, second: String },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Build the inner-joined, return-augmented dataset for two distinct series.
///
/// Rows are ascending by date. A row survives only if both levels and both
/// returns are defined and finite on that date; in particular the earliest
/// shared date is dropped whenever a return cannot be computed for it.
/// `build_pair(a, b)` and `build_pair(b, a)` produce row-for-row identical
/// datasets with the column roles swapped.
pub fn build_pair(
    store: &mut SeriesStore,
    first: &str,
    second: &str,
) -> Result<PairDataset, BuildError> {
    if first == second {
        return Err(BuildError::SameIdentifier {
            identifier: first.to_string(),
        });
    }

    let first_series = store.get(first)?;
    let second_series = store.get(second)?;

    let first_values = value_map(&first_series);
    let second_values = value_map(&second_series);
    let first_returns = return_map(&first_series);
    let second_returns = return_map(&second_series);

    let mut rows = Vec::new();
    for (&date, &first_value) in &first_values {
        let Some(&second_value) = second_values.get(&date) else {
            continue;
        };
        let (Some(&first_return), Some(&second_return)) =
            (first_returns.get(&date), second_returns.get(&date))
        else {
            continue;
        };
        if !first_value.is_finite()
            || !second_value.is_finite()
            || !first_return.is_finite()
            || !second_return.is_finite()
        {
            continue;
        }
        rows.push(PairRow {
            date,
            first: first_value,
            second: second_value,
            first_return,
            second_return,
        });
    }

    if rows.is_empty() {
        return Err(BuildError::EmptyJoin {
            first: first.to_string(),
            second: second.to_string(),
        });
    }

    tracing::debug!(first, second, rows = rows.len(), "pair dataset built");
    Ok(PairDataset::from_rows(first, second, rows))
}

fn value_map(series: &TimeSeries) -> BTreeMap<NaiveDate, f64> {
    series
        .observations()
        .iter()
        .map(|obs| (obs.date, obs.value))
        .collect()
}

fn return_map(series: &TimeSeries) -> BTreeMap<NaiveDate, f64> {
    series
        .returns()
        .iter()
        .map(|obs| (obs.date, obs.value))
        .collect()
}
