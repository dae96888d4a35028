//! Startup index diagnostics — one-shot term-aggregation queries.
//!
//! Enumerates categorical values (pop, network, host) from an external
//! search index and prints them once before any session work. This is a
//! side channel with no coupling to pipeline state: it runs exactly once,
//! and a failure is logged rather than aborting startup.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const CATEGORY_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("index request failed: {0}")]
    Request(String),

    #[error("unexpected index response: {0}")]
    Format(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    aggregations: Option<Aggregations>,
}

#[derive(Debug, Deserialize)]
struct Aggregations {
    pop_list: Option<TermsAggregation>,
    network_list: Option<TermsAggregation>,
    host_list: Option<TermsAggregation>,
}

#[derive(Debug, Deserialize)]
struct TermsAggregation {
    #[serde(default)]
    buckets: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
struct Bucket {
    key: String,
}

/// Distinct values per category, at most [`CATEGORY_LIMIT`] each.
#[derive(Debug, Default)]
pub struct CategoryValues {
    pub pops: Vec<String>,
    pub networks: Vec<String>,
    pub hosts: Vec<String>,
}

/// Client for the external search index.
pub struct IndexDiagnostics {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl IndexDiagnostics {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Run the three term-aggregation queries and collect their buckets.
    pub fn category_values(&self) -> Result<CategoryValues, DiagnosticsError> {
        let body = serde_json::json!({
            "size": 0,
            "aggs": {
                "pop_list": { "terms": { "field": "pop.raw", "size": CATEGORY_LIMIT } },
                "network_list": { "terms": { "field": "network.raw", "size": CATEGORY_LIMIT } },
                "host_list": { "terms": { "field": "host.raw", "size": CATEGORY_LIMIT } },
            }
        });

        let url = format!("{}/_search", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| DiagnosticsError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DiagnosticsError::Request(format!(
                "index returned status {}",
                response.status()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .map_err(|e| DiagnosticsError::Format(e.to_string()))?;
        Ok(extract(parsed))
    }
}

fn extract(response: SearchResponse) -> CategoryValues {
    fn keys(aggregation: Option<TermsAggregation>) -> Vec<String> {
        aggregation
            .map(|a| {
                a.buckets
                    .into_iter()
                    .take(CATEGORY_LIMIT)
                    .map(|b| b.key)
                    .collect()
            })
            .unwrap_or_default()
    }

    match response.aggregations {
        Some(aggregations) => CategoryValues {
            pops: keys(aggregations.pop_list),
            networks: keys(aggregations.network_list),
            hosts: keys(aggregations.host_list),
        },
        None => CategoryValues::default(),
    }
}

/// Query the index and print the category values; log and continue on error.
pub fn run_startup_diagnostics(url: &str) {
    match IndexDiagnostics::new(url).category_values() {
        Ok(values) => {
            for value in &values.networks {
                println!("network: {value}");
            }
            for value in &values.pops {
                println!("pop: {value}");
            }
            for value in &values.hosts {
                println!("host: {value}");
            }
        }
        Err(e) => tracing::warn!(error = %e, "startup index diagnostics failed"),
    }
}
