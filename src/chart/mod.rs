#![forbid(unsafe_code)]

//! Grouped bar chart rendering for aggregated benchmark runtimes.
//!
//! Benchmarks are laid out along the x axis and every binary contributes one
//! colored bar per benchmark. The chart is either written to an image file or
//! handed to a [`ChartViewer`].

use std::path::{Path, PathBuf};

use tracing::info;

use crate::aggregate::AggregatedResults;
use crate::error::Result;

#[cfg(feature = "raster")]
mod fonts;
mod layout;
mod render;
mod viewer;

/// Backend-independent chart geometry and the fixed chart captions.
pub use layout::{
    benchmark_label, binary_label, Bar, ChartLayout, Series, Tick, CHART_TITLE, X_AXIS_LABEL,
    Y_AXIS_LABEL,
};

/// Drawing the layout with plotters.
pub use render::{render_svg, render_to_file, ChartStyle, ImageFormat};

/// Displaying charts when no output file is requested.
pub use viewer::{ChartViewer, SystemViewer};

/// Where a chart goes.
pub enum ChartTarget<'a> {
    /// Write an image; the format follows the file extension.
    File(&'a Path),
    /// Render in memory and pass the SVG to a viewer.
    Display(&'a dyn ChartViewer),
}

/// What [`render_chart`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The chart was written to `path`.
    Saved {
        /// Output file.
        path: PathBuf,
        /// Format used.
        format: ImageFormat,
    },
    /// The chart was shown by the viewer.
    Displayed,
}

/// Draws the aggregated results and sends the chart to `target`.
///
/// Nothing is written when the output format is unsupported or there are no
/// results to draw. With [`ChartTarget::Display`] the renderer itself writes
/// no file.
pub fn render_chart(
    results: &AggregatedResults,
    target: ChartTarget<'_>,
    style: &ChartStyle,
) -> Result<RenderOutcome> {
    match target {
        ChartTarget::File(path) => {
            let format = ImageFormat::from_path(path)?;
            let layout = ChartLayout::from_results(results)?;
            render_to_file(&layout, style, path, format)?;
            info!(path = %path.display(), bars = layout.bar_count(), "chart saved");
            Ok(RenderOutcome::Saved {
                path: path.to_path_buf(),
                format,
            })
        }
        ChartTarget::Display(viewer) => {
            let layout = ChartLayout::from_results(results)?;
            let svg = render_svg(&layout, style)?;
            viewer.show(&svg)?;
            Ok(RenderOutcome::Displayed)
        }
    }
}
