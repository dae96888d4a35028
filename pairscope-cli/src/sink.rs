//! Console presentation sink — prints published effects to stdout.

use pairscope_core::domain::dataset::PairDataset;
use pairscope_core::pipeline::PairSummary;
use pairscope_core::session::{PresentationSink, Slot};

/// Prints the published dataset table, statistics report, and chooser
/// updates. The terminal stand-in for the rendering layer.
pub struct ConsoleSink;

impl PresentationSink for ConsoleSink {
    fn dataset_changed(&mut self, dataset: &PairDataset) {
        println!(
            "dataset: {} vs {} ({} rows)",
            dataset.first_id(),
            dataset.second_id(),
            dataset.len()
        );
        match dataset.to_dataframe() {
            Ok(df) => println!("{df}"),
            Err(e) => tracing::warn!(error = %e, "could not render dataset table"),
        }
    }

    fn summary_changed(&mut self, summary: &PairSummary) {
        println!("{}", summary.render());
    }

    fn choices_changed(&mut self, slot: Slot, value: &str, allowed: &[String]) {
        println!(
            "{} = {value} (alternatives: {})",
            slot.label(),
            allowed.join(", ")
        );
    }
}
