//! Descriptive statistics — pure functions over a dataset view.
//!
//! Every statistic is a pure function of the view's column values: same
//! rows in, identical summary out. `count` is the row count and zero is a
//! valid result; the remaining statistics follow the usual degenerate
//! conventions (NaN on an empty column, NaN sample std on a single value).

use serde::{Deserialize, Serialize};

use crate::domain::dataset::DatasetView;

/// Summary of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Compute the full summary for one column of values.
    pub fn compute(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            count: values.len(),
            mean: mean(values),
            std: std_dev(values),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.50),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Descriptive statistics for all four pair columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub first_id: String,
    pub second_id: String,
    pub first: ColumnSummary,
    pub second: ColumnSummary,
    pub first_returns: ColumnSummary,
    pub second_returns: ColumnSummary,
}

impl PairSummary {
    /// Row count the summary was computed over.
    pub fn count(&self) -> usize {
        self.first.count
    }

    /// Fixed-width text report for the presentation sink.
    pub fn render(&self) -> String {
        let labels = [
            self.first_id.clone(),
            self.second_id.clone(),
            format!("{}_returns", self.first_id),
            format!("{}_returns", self.second_id),
        ];
        let columns = [
            &self.first,
            &self.second,
            &self.first_returns,
            &self.second_returns,
        ];
        let width = labels.iter().map(|l| l.len()).max().unwrap_or(0).max(12) + 2;

        let mut out = String::from("      ");
        for label in &labels {
            out.push_str(&format!("{label:>width$}"));
        }
        out.push('\n');

        let rows: [(&str, fn(&ColumnSummary) -> f64); 7] = [
            ("mean", |c| c.mean),
            ("std", |c| c.std),
            ("min", |c| c.min),
            ("25%", |c| c.q1),
            ("50%", |c| c.median),
            ("75%", |c| c.q3),
            ("max", |c| c.max),
        ];

        out.push_str(&format!("{:<6}", "count"));
        for column in columns {
            out.push_str(&format!("{:>width$}", column.count));
        }
        out.push('\n');

        for (name, pick) in rows {
            out.push_str(&format!("{name:<6}"));
            for column in columns {
                out.push_str(&format!("{:>width$.4}", pick(column)));
            }
            out.push('\n');
        }
        out
    }
}

/// Summarize all four columns of a view.
pub fn summarize(view: &DatasetView<'_>) -> PairSummary {
    let mut first = Vec::with_capacity(view.len());
    let mut second = Vec::with_capacity(view.len());
    let mut first_returns = Vec::with_capacity(view.len());
    let mut second_returns = Vec::with_capacity(view.len());

    for row in view.rows() {
        first.push(row.first);
        second.push(row.second);
        first_returns.push(row.first_return);
        second_returns.push(row.second_return);
    }

    PairSummary {
        first_id: view.dataset().first_id().to_string(),
        second_id: view.dataset().second_id().to_string(),
        first: ColumnSummary::compute(&first),
        second: ColumnSummary::compute(&second),
        first_returns: ColumnSummary::compute(&first_returns),
        second_returns: ColumnSummary::compute(&second_returns),
    }
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1); NaN below two values.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Linear-interpolation quantile over pre-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let weight = rank - lo as f64;
    sorted[lo] * (1.0 - weight) + sorted[hi] * weight
}
