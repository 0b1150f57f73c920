use std::ops::Range;
use std::path::Path;

use crate::aggregate::AggregatedResults;
use crate::error::{PlotError, Result};

/// Chart title.
pub const CHART_TITLE: &str = "Benchmark Performance Comparison";
/// X axis description.
pub const X_AXIS_LABEL: &str = "Benchmark";
/// Y axis description.
pub const Y_AXIS_LABEL: &str = "Average Runtime (seconds)";

/// Share of a benchmark slot covered by its group of bars.
const GROUP_WIDTH: f64 = 0.8;
/// Padding between the outermost bars and the plot edges.
const EDGE_PADDING: f64 = 0.1;
/// Headroom above the tallest bar.
const Y_HEADROOM: f64 = 1.05;

/// Label drawn under one benchmark group.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// X coordinate of the group center.
    pub position: f64,
    /// Benchmark name without directory or extension.
    pub label: String,
}

/// A single bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Index of the benchmark this bar belongs to.
    pub benchmark: usize,
    /// X coordinate of the bar center.
    pub center: f64,
    /// Mean runtime in seconds.
    pub height: f64,
}

/// Bars of one binary, drawn in one color.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label: the binary's file name.
    pub label: String,
    /// Bars in benchmark order. Benchmarks without data have no bar.
    pub bars: Vec<Bar>,
}

/// Geometry of a grouped bar chart, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// One tick per benchmark.
    pub ticks: Vec<Tick>,
    /// One series per binary.
    pub series: Vec<Series>,
    /// Width of each bar in x units.
    pub bar_width: f64,
    /// Bottom of the y axis: zero, or below the lowest bar when a mean is
    /// negative.
    pub y_min: f64,
    /// Top of the y axis.
    pub y_max: f64,
}

impl ChartLayout {
    /// Lays out one bar per (binary, benchmark) pair.
    ///
    /// Benchmark `j` owns slot `j`; the bar of binary `i` is centered at
    /// `j + i * bar_width` with `bar_width = 0.8 / binaries`.
    pub fn from_results(results: &AggregatedResults) -> Result<Self> {
        if results.is_empty() {
            return Err(PlotError::EmptyResults);
        }
        let binaries = results.binaries();
        let benchmarks = results.benchmarks();
        let bar_width = GROUP_WIDTH / binaries.len() as f64;
        let group_offset = (binaries.len() - 1) as f64 * bar_width / 2.0;

        let ticks = benchmarks
            .iter()
            .enumerate()
            .map(|(slot, benchmark)| Tick {
                position: slot as f64 + group_offset,
                label: benchmark_label(benchmark),
            })
            .collect();

        let series: Vec<Series> = binaries
            .iter()
            .enumerate()
            .map(|(i, binary)| Series {
                label: binary_label(binary),
                bars: benchmarks
                    .iter()
                    .enumerate()
                    .filter_map(|(slot, benchmark)| {
                        results.get(binary, benchmark).map(|height| Bar {
                            benchmark: slot,
                            center: slot as f64 + i as f64 * bar_width,
                            height,
                        })
                    })
                    .collect(),
            })
            .collect();

        let heights: Vec<f64> = series
            .iter()
            .flat_map(|s| s.bars.iter())
            .map(|bar| bar.height)
            .filter(|h| h.is_finite())
            .collect();
        let tallest = heights.iter().copied().fold(0.0_f64, f64::max);
        let lowest = heights.iter().copied().fold(0.0_f64, f64::min);
        let y_min = lowest * Y_HEADROOM;
        let y_max = if tallest > 0.0 {
            tallest * Y_HEADROOM
        } else if lowest < 0.0 {
            0.0
        } else {
            1.0
        };

        Ok(Self {
            ticks,
            series,
            bar_width,
            y_min,
            y_max,
        })
    }

    /// Horizontal extent covering every bar plus padding.
    pub fn x_range(&self) -> Range<f64> {
        let half = self.bar_width / 2.0;
        let last_slot = self.ticks.len().saturating_sub(1) as f64;
        let start = -half - EDGE_PADDING;
        let end = last_slot - half + GROUP_WIDTH + EDGE_PADDING;
        start..end
    }

    /// Vertical extent covering every bar plus headroom, always including zero.
    pub fn y_range(&self) -> Range<f64> {
        self.y_min..self.y_max
    }

    /// Label of the tick closest to `x`.
    pub fn tick_label(&self, x: f64) -> &str {
        self.ticks
            .iter()
            .min_by(|a, b| (a.position - x).abs().total_cmp(&(b.position - x).abs()))
            .map(|tick| tick.label.as_str())
            .unwrap_or("")
    }

    /// Total number of bars drawn.
    pub fn bar_count(&self) -> usize {
        self.series.iter().map(|s| s.bars.len()).sum()
    }
}

/// Benchmark label: file name without directory and extension.
pub fn benchmark_label(raw: &str) -> String {
    Path::new(raw)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| raw.to_string())
}

/// Binary label: file name without directory.
pub fn binary_label(raw: &str) -> String {
    Path::new(raw)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| raw.to_string())
}
