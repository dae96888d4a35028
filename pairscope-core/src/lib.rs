//! Pairscope Core — the reactive pair-correlation pipeline.
//!
//! This crate contains everything with real invariants:
//! - Domain types (time series, joined pair datasets, selections, views)
//! - Series loading with per-identifier memoization
//! - Pair construction (inner join on date + first-difference returns)
//! - Selection-scoped descriptive statistics
//! - The event-driven session that keeps all of the above consistent and
//!   publishes results to presentation sinks
//!
//! Rendering, transport, and argument parsing live outside this crate.

pub mod data;
pub mod domain;
pub mod pipeline;
pub mod session;
