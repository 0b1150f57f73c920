//! Benchmark runtime aggregation and grouped bar chart rendering.
//!
//! `benchplot` reads benchmark timing CSV files, averages the runtime of every
//! (binary, benchmark) pairing and draws the result as a grouped bar chart.

#![warn(missing_docs)]

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;

pub use aggregate::{
    aggregate, aggregate_files, AggregatedResults, AggregatedRow, BenchmarkRecord,
};
pub use chart::{render_chart, ChartStyle, ChartTarget, RenderOutcome};
pub use error::{PlotError, Result};
