//! Domain types: series, joined datasets, selections, views.

pub mod dataset;
pub mod series;

pub use dataset::{DatasetView, PairDataset, PairRow, Selection};
pub use series::{Observation, SeriesError, TimeSeries};
