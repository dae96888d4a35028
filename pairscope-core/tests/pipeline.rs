//! End-to-end pipeline tests: store → builder → filter → summarizer.

use chrono::NaiveDate;
use pairscope_core::data::provider::{DataError, SeriesProvider};
use pairscope_core::data::store::SeriesStore;
use pairscope_core::domain::dataset::Selection;
use pairscope_core::domain::series::{Observation, TimeSeries};
use pairscope_core::pipeline::{build_pair, filter, summarize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory provider over fixed series, counting source reads.
struct FixedProvider {
    series: Vec<TimeSeries>,
    fetches: Arc<AtomicUsize>,
}

impl SeriesProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch(&self, identifier: &str) -> Result<TimeSeries, DataError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.series
            .iter()
            .find(|s| s.identifier() == identifier)
            .cloned()
            .ok_or_else(|| DataError::MissingSeries {
                identifier: identifier.to_string(),
            })
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn series(identifier: &str, points: &[(u32, f64)]) -> TimeSeries {
    let observations = points
        .iter()
        .map(|&(day, value)| Observation {
            date: date(day),
            value,
        })
        .collect();
    TimeSeries::new(identifier, observations).unwrap()
}

fn store_with(series_list: Vec<TimeSeries>) -> (SeriesStore, Arc<AtomicUsize>) {
    let fetches = Arc::new(AtomicUsize::new(0));
    let store = SeriesStore::new(Box::new(FixedProvider {
        series: series_list,
        fetches: Arc::clone(&fetches),
    }));
    (store, fetches)
}

fn two_series_store() -> (SeriesStore, Arc<AtomicUsize>) {
    store_with(vec![
        series("A", &[(2, 10.0), (3, 12.0), (4, 11.0)]),
        series("B", &[(2, 20.0), (3, 19.0), (4, 22.0)]),
    ])
}

#[test]
fn full_pipeline_over_whole_dataset() {
    let (mut store, _) = two_series_store();

    let dataset = build_pair(&mut store, "A", "B").unwrap();
    let summary = summarize(&filter::apply(&dataset, &Selection::all()));

    // d1 is dropped (undefined returns); d2 and d3 survive.
    assert_eq!(summary.count(), 2);
    assert_eq!(summary.first.mean, 11.5);
    assert_eq!(summary.second.mean, 20.5);
    assert_eq!(summary.first_returns.mean, 0.5);
    assert_eq!(summary.second_returns.mean, 1.0);
    assert_eq!(summary.first.min, 11.0);
    assert_eq!(summary.first.max, 12.0);
}

#[test]
fn explicit_full_selection_equals_pass_through() {
    let (mut store, _) = two_series_store();
    let dataset = build_pair(&mut store, "A", "B").unwrap();

    let pass_through = summarize(&filter::apply(&dataset, &Selection::all()));
    let explicit = summarize(&filter::apply(
        &dataset,
        &Selection::of((0..dataset.len()).collect()),
    ));

    assert_eq!(pass_through, explicit);
}

#[test]
fn subset_selection_scopes_statistics() {
    let (mut store, _) = store_with(vec![
        series("A", &[(2, 10.0), (3, 12.0), (4, 11.0), (5, 15.0), (6, 9.0)]),
        series("B", &[(2, 20.0), (3, 19.0), (4, 22.0), (5, 21.0), (6, 24.0)]),
    ]);
    let dataset = build_pair(&mut store, "A", "B").unwrap();
    let full = summarize(&filter::apply(&dataset, &Selection::all()));

    let selection = Selection::of(vec![0, 2]);
    let scoped = summarize(&filter::apply(&dataset, &selection));

    assert_eq!(scoped.count(), selection.len());
    assert!(scoped.first.mean >= full.first.min);
    assert!(scoped.first.mean <= full.first.max);
    assert!(scoped.second.mean >= full.second.min);
    assert!(scoped.second.mean <= full.second.max);
}

#[test]
fn swapped_build_order_reads_each_source_once() {
    let (mut store, fetches) = two_series_store();

    build_pair(&mut store, "A", "B").unwrap();
    build_pair(&mut store, "B", "A").unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[test]
fn repeated_store_gets_are_value_equal() {
    let (mut store, fetches) = two_series_store();

    let a1 = store.get("A").unwrap();
    let a2 = store.get("A").unwrap();

    assert!(Arc::ptr_eq(&a1, &a2));
    assert_eq!(a1.observations(), a2.observations());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}
