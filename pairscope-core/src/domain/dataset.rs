//! Pair dataset — two series inner-joined on date with derived returns.
//!
//! A `PairDataset` is the join product the rest of the pipeline works on.
//! Invariants: rows sorted by date ascending, no duplicate dates, every row
//! fully defined in all four numeric columns. The builder in
//! `pipeline::builder` is the only producer.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One joined row: levels and first-difference returns for both series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairRow {
    pub date: NaiveDate,
    pub first: f64,
    pub second: f64,
    pub first_return: f64,
    pub second_return: f64,
}

/// The inner-joined, return-augmented combination of two series.
#[derive(Debug, Clone)]
pub struct PairDataset {
    first_id: String,
    second_id: String,
    rows: Vec<PairRow>,
}

impl PairDataset {
    pub(crate) fn from_rows(
        first_id: impl Into<String>,
        second_id: impl Into<String>,
        rows: Vec<PairRow>,
    ) -> Self {
        Self {
            first_id: first_id.into(),
            second_id: second_id.into(),
            rows,
        }
    }

    /// A dataset with zero rows, the degenerate join result.
    pub fn empty(first_id: impl Into<String>, second_id: impl Into<String>) -> Self {
        Self::from_rows(first_id, second_id, Vec::new())
    }

    pub fn first_id(&self) -> &str {
        &self.first_id
    }

    pub fn second_id(&self) -> &str {
        &self.second_id
    }

    pub fn rows(&self) -> &[PairRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The date-indexed four-column table published to presentation sinks.
    ///
    /// Columns: `date`, `first`, `second`, `first_returns`, `second_returns`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let dates: Vec<i32> = self
            .rows
            .iter()
            .map(|r| (r.date - epoch).num_days() as i32)
            .collect();
        let firsts: Vec<f64> = self.rows.iter().map(|r| r.first).collect();
        let seconds: Vec<f64> = self.rows.iter().map(|r| r.second).collect();
        let first_returns: Vec<f64> = self.rows.iter().map(|r| r.first_return).collect();
        let second_returns: Vec<f64> = self.rows.iter().map(|r| r.second_return).collect();

        DataFrame::new(vec![
            Column::new("date".into(), dates).cast(&DataType::Date)?,
            Column::new("first".into(), firsts),
            Column::new("second".into(), seconds),
            Column::new("first_returns".into(), first_returns),
            Column::new("second_returns".into(), second_returns),
        ])
    }
}

/// A set of row positions scoping statistics to a brushed sub-range.
///
/// The empty selection is a sentinel meaning "the entire dataset", not "zero
/// rows". A selection is replaced wholesale on every selection event and has
/// no identity beyond the dataset it indexes into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    positions: Vec<usize>,
}

impl Selection {
    /// The whole-dataset sentinel.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of(positions: Vec<usize>) -> Self {
        Self { positions }
    }

    /// True for the whole-dataset sentinel.
    pub fn is_all(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A borrowed view over a subset of a dataset's rows.
///
/// Produced by `pipeline::filter::apply`; positions are already resolved
/// against the dataset (in range, in selection order).
#[derive(Debug)]
pub struct DatasetView<'a> {
    dataset: &'a PairDataset,
    positions: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    pub(crate) fn new(dataset: &'a PairDataset, positions: Vec<usize>) -> Self {
        debug_assert!(positions.iter().all(|&p| p < dataset.len()));
        Self { dataset, positions }
    }

    pub fn dataset(&self) -> &PairDataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &PairRow> + '_ {
        self.positions.iter().map(|&p| &self.dataset.rows()[p])
    }
}
