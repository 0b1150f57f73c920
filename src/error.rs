//! Error type shared by the aggregation and rendering stages.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Failures raised while loading benchmark results or drawing the chart.
#[derive(Debug, Error)]
pub enum PlotError {
    /// No CSV files were supplied.
    #[error("no input files given")]
    NoInputs,
    /// The CSV reader failed to open or parse a file.
    #[error("failed to read {path}: {source}")]
    Csv {
        /// File being read.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },
    /// A required header is absent from an input file.
    #[error("{path}: missing required column '{column}'")]
    MissingColumn {
        /// File lacking the column.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },
    /// A runtime cell could not be parsed as a number.
    #[error("{path}:{line}: invalid runtime value '{value}'")]
    InvalidRuntime {
        /// File containing the bad value.
        path: PathBuf,
        /// One-based line number of the record.
        line: u64,
        /// Raw cell contents.
        value: String,
    },
    /// Aggregation produced no rows.
    #[error("nothing to plot: no benchmark rows were found")]
    EmptyResults,
    /// The output path extension does not name a supported image format.
    #[error("unsupported output format for {path} (expected {expected})")]
    UnsupportedFormat {
        /// Requested output path.
        path: PathBuf,
        /// Human readable list of accepted extensions.
        expected: &'static str,
    },
    /// The plotting backend reported a failure.
    #[error("failed to draw chart: {0}")]
    Draw(String),
    /// No usable font could be loaded for raster output.
    #[error("font unavailable: {0}")]
    Font(String),
    /// The chart viewer could not be started or exited unsuccessfully.
    #[error("failed to launch chart viewer '{viewer}': {reason}")]
    Viewer {
        /// Command that was run.
        viewer: String,
        /// What went wrong.
        reason: String,
    },
    /// I/O error outside of CSV parsing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
