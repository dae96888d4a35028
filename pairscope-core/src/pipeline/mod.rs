//! The reactive pipeline: pair construction, selection filtering,
//! statistical summarization.

pub mod builder;
pub mod filter;
pub mod summarize;

pub use builder::{build_pair, BuildError};
pub use filter::apply;
pub use summarize::{summarize, ColumnSummary, PairSummary};
