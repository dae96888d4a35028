//! Memoizing series store.
//!
//! One store instance is owned by one session; it is never shared across
//! independent sessions and never global. A cache miss performs the
//! provider's blocking read inline with the triggering event — acceptable
//! for a small, fixed identifier universe. A larger universe would move the
//! load behind the `SeriesProvider` seam onto an explicit async task.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::series::TimeSeries;

use super::provider::{DataError, SeriesProvider};

/// Loads and memoizes one time series per identifier.
///
/// Memoization is exact: the first `get` for an identifier reads the backing
/// source, every later `get` returns a clone of the same `Arc` without
/// touching the provider. Series are never invalidated or evicted. Failed
/// loads are not cached; a later `get` retries the source.
pub struct SeriesStore {
    provider: Box<dyn SeriesProvider>,
    cache: HashMap<String, Arc<TimeSeries>>,
}

impl SeriesStore {
    pub fn new(provider: Box<dyn SeriesProvider>) -> Self {
        Self {
            provider,
            cache: HashMap::new(),
        }
    }

    /// Fetch a series, reading the backing source at most once per identifier.
    pub fn get(&mut self, identifier: &str) -> Result<Arc<TimeSeries>, DataError> {
        if let Some(series) = self.cache.get(identifier) {
            return Ok(Arc::clone(series));
        }

        tracing::debug!(identifier, provider = self.provider.name(), "series cache miss, loading");
        let series = Arc::new(self.provider.fetch(identifier)?);
        tracing::info!(identifier, observations = series.len(), "series loaded");
        self.cache.insert(identifier.to_string(), Arc::clone(&series));
        Ok(series)
    }

    /// True if the identifier has already been loaded.
    pub fn is_cached(&self, identifier: &str) -> bool {
        self.cache.contains_key(identifier)
    }

    /// Number of identifiers loaded so far.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::Observation;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that counts fetches and fails for unknown identifiers.
    struct CountingProvider {
        fetches: Arc<AtomicUsize>,
    }

    impl SeriesProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self, identifier: &str) -> Result<TimeSeries, DataError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if identifier == "MISSING" {
                return Err(DataError::MissingSeries {
                    identifier: identifier.to_string(),
                });
            }
            let observations = (0..3)
                .map(|i| Observation {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2 + i).unwrap(),
                    value: 10.0 + i as f64,
                })
                .collect();
            Ok(TimeSeries::new(identifier, observations).unwrap())
        }
    }

    fn counting_store() -> (SeriesStore, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let store = SeriesStore::new(Box::new(CountingProvider {
            fetches: Arc::clone(&fetches),
        }));
        (store, fetches)
    }

    #[test]
    fn second_get_returns_same_instance_without_reload() {
        let (mut store, fetches) = counting_store();

        let a = store.get("AAPL").unwrap();
        let b = store.get("AAPL").unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_identifiers_load_independently() {
        let (mut store, fetches) = counting_store();

        store.get("AAPL").unwrap();
        store.get("GOOG").unwrap();
        store.get("AAPL").unwrap();

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert_eq!(store.cached_count(), 2);
    }

    #[test]
    fn missing_series_propagates_and_is_not_cached() {
        let (mut store, fetches) = counting_store();

        assert!(store.get("MISSING").is_err());
        assert!(!store.is_cached("MISSING"));

        // A retry hits the source again rather than a cached failure.
        assert!(store.get("MISSING").is_err());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }
}
