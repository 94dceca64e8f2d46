//! Pipelining engine: producer worker, consumer driver, run finalization.
//!
//! - [`Pipeline`] - Configured engine with `run()`/`run_with()` entry points
//! - [`PipeStats`] - Summary counters for a completed run

mod driver;
mod pipeline;
mod worker;

// Re-export for use within the crate
pub use pipeline::{PipeStats, Pipeline};
