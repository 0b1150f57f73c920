//! Loading benchmark CSV files and averaging runtimes per (binary, benchmark).
//!
//! Every input file must carry the `Binary`, `Benchmark File` and
//! `Runtime (s)` columns; any other column is ignored. Rows from all files are
//! concatenated and grouped by their (binary, benchmark) pair, and each group
//! is reduced to the arithmetic mean of its runtime samples.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PlotError, Result};

/// Header naming the executable that produced a run.
pub const BINARY_COLUMN: &str = "Binary";
/// Header naming the benchmark workload.
pub const BENCHMARK_COLUMN: &str = "Benchmark File";
/// Header holding the measured wall-clock runtime in seconds.
pub const RUNTIME_COLUMN: &str = "Runtime (s)";

/// One row of an input file.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// File the row was read from.
    pub source: PathBuf,
    /// Binary path as written in the file.
    pub binary: String,
    /// Benchmark file as written in the file.
    pub benchmark: String,
    /// Runtime in seconds, `None` when the cell was empty or a missing-value
    /// marker such as `NA` or `NaN`.
    pub runtime_secs: Option<f64>,
}

/// Mean runtime of one (binary, benchmark) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRow {
    /// Binary path.
    pub binary: String,
    /// Benchmark file.
    pub benchmark: String,
    /// Arithmetic mean of the runtime samples, `None` if the group had none.
    pub mean_runtime_secs: Option<f64>,
    /// Number of runtime samples averaged.
    pub samples: usize,
}

/// Aggregated runtimes, one row per distinct (binary, benchmark) pair, sorted
/// by binary and then benchmark.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedResults {
    rows: Vec<AggregatedRow>,
}

impl AggregatedResults {
    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no pair was aggregated.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in (binary, benchmark) order.
    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// Looks up the mean runtime of a pair.
    pub fn get(&self, binary: &str, benchmark: &str) -> Option<f64> {
        self.rows
            .binary_search_by(|row| {
                (row.binary.as_str(), row.benchmark.as_str()).cmp(&(binary, benchmark))
            })
            .ok()
            .and_then(|idx| self.rows[idx].mean_runtime_secs)
    }

    /// Distinct binaries in row order.
    pub fn binaries(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|row| row.binary.as_str()))
    }

    /// Distinct benchmarks in order of first appearance.
    pub fn benchmarks(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|row| row.benchmark.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    samples: usize,
}

/// Groups records by (binary, benchmark) and averages their runtimes.
pub fn aggregate(records: &[BenchmarkRecord]) -> AggregatedResults {
    let mut groups: BTreeMap<(&str, &str), Accumulator> = BTreeMap::new();
    for record in records {
        let acc = groups
            .entry((record.binary.as_str(), record.benchmark.as_str()))
            .or_default();
        if let Some(runtime) = record.runtime_secs {
            acc.sum += runtime;
            acc.samples += 1;
        }
    }

    let rows = groups
        .into_iter()
        .map(|((binary, benchmark), acc)| AggregatedRow {
            binary: binary.to_string(),
            benchmark: benchmark.to_string(),
            mean_runtime_secs: (acc.samples > 0).then(|| acc.sum / acc.samples as f64),
            samples: acc.samples,
        })
        .collect();
    AggregatedResults { rows }
}

/// Reads every file in order and aggregates the combined rows.
///
/// Fails on the first unreadable or malformed file; no partial result is
/// returned.
pub fn aggregate_files<P: AsRef<Path>>(paths: &[P]) -> Result<AggregatedResults> {
    if paths.is_empty() {
        return Err(PlotError::NoInputs);
    }
    let records = load_records(paths)?;
    let results = aggregate(&records);
    debug!(
        records = records.len(),
        pairs = results.len(),
        "aggregated benchmark runtimes"
    );
    Ok(results)
}

/// Reads and concatenates the records of every file.
pub fn load_records<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<BenchmarkRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(read_records(path.as_ref())?);
    }
    Ok(records)
}

/// Reads the records of a single CSV file.
pub fn read_records(path: &Path) -> Result<Vec<BenchmarkRecord>> {
    let reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    let records = collect_records(reader, path)?;
    debug!(path = %path.display(), rows = records.len(), "read benchmark file");
    Ok(records)
}

/// Reads records from any reader, attributing them to `source`.
pub fn read_records_from<R: io::Read>(input: R, source: &Path) -> Result<Vec<BenchmarkRecord>> {
    let reader = ReaderBuilder::new().flexible(true).from_reader(input);
    collect_records(reader, source)
}

struct Columns {
    binary: usize,
    benchmark: usize,
    runtime: usize,
}

fn collect_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    source: &Path,
) -> Result<Vec<BenchmarkRecord>> {
    let headers = reader
        .headers()
        .map_err(|err| csv_error(source, err))?
        .clone();
    let columns = Columns {
        binary: find_column(&headers, BINARY_COLUMN, source)?,
        benchmark: find_column(&headers, BENCHMARK_COLUMN, source)?,
        runtime: find_column(&headers, RUNTIME_COLUMN, source)?,
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for result in reader.records() {
        let row = result.map_err(|err| csv_error(source, err))?;
        let binary = row.get(columns.binary).unwrap_or("");
        let benchmark = row.get(columns.benchmark).unwrap_or("");
        if binary.is_empty() || benchmark.is_empty() {
            dropped += 1;
            continue;
        }
        let runtime_secs = parse_runtime(&row, columns.runtime, source)?;
        records.push(BenchmarkRecord {
            source: source.to_path_buf(),
            binary: binary.to_string(),
            benchmark: benchmark.to_string(),
            runtime_secs,
        });
    }
    if dropped > 0 {
        warn!(
            path = %source.display(),
            dropped,
            "skipped rows without a binary or benchmark"
        );
    }
    Ok(records)
}

fn find_column(headers: &StringRecord, name: &'static str, source: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PlotError::MissingColumn {
            path: source.to_path_buf(),
            column: name,
        })
}

/// Cell values read as a missing runtime sample, matching the usual CSV
/// tooling defaults.
const MISSING_RUNTIME_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse_runtime(row: &StringRecord, idx: usize, source: &Path) -> Result<Option<f64>> {
    let raw = row.get(idx).unwrap_or("").trim();
    if raw.is_empty() || MISSING_RUNTIME_MARKERS.contains(&raw) {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(|secs| (!secs.is_nan()).then_some(secs))
        .map_err(|_| PlotError::InvalidRuntime {
            path: source.to_path_buf(),
            line: row.position().map(|pos| pos.line()).unwrap_or(0),
            value: raw.to_string(),
        })
}

fn csv_error(path: &Path, source: csv::Error) -> PlotError {
    PlotError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
