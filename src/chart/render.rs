use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use super::layout::{ChartLayout, CHART_TITLE, X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::error::{PlotError, Result};

pub(crate) const FONT_FAMILY: &str = "sans-serif";

#[cfg(feature = "raster")]
const SUPPORTED_EXTENSIONS: &str = ".svg, .png, .bmp, .jpg or .jpeg";
#[cfg(not(feature = "raster"))]
const SUPPORTED_EXTENSIONS: &str = ".svg (bitmap formats need the `raster` feature)";

/// Canvas settings for a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// TrueType font used for bitmap output. The system fonts are searched
    /// when unset.
    pub font: Option<PathBuf>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            font: None,
        }
    }
}

/// Image format chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Scalable vector graphics.
    Svg,
    /// Portable network graphics.
    #[cfg(feature = "raster")]
    Png,
    /// Windows bitmap.
    #[cfg(feature = "raster")]
    Bmp,
    /// JPEG.
    #[cfg(feature = "raster")]
    Jpeg,
}

impl ImageFormat {
    /// Infers the format from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            #[cfg(feature = "raster")]
            Some("png") => Ok(ImageFormat::Png),
            #[cfg(feature = "raster")]
            Some("bmp") => Ok(ImageFormat::Bmp),
            #[cfg(feature = "raster")]
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            _ => Err(PlotError::UnsupportedFormat {
                path: path.to_path_buf(),
                expected: SUPPORTED_EXTENSIONS,
            }),
        }
    }

    /// True for formats drawn by the bitmap backend.
    pub fn is_raster(self) -> bool {
        !matches!(self, ImageFormat::Svg)
    }
}

/// Renders the chart into an in-memory SVG document.
pub fn render_svg(layout: &ChartLayout, style: &ChartStyle) -> Result<String> {
    prepare_fonts(style)?;
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        draw(&root, layout)?;
    }
    Ok(svg)
}

/// Renders the chart into `path` using `format`.
pub fn render_to_file(
    layout: &ChartLayout,
    style: &ChartStyle,
    path: &Path,
    format: ImageFormat,
) -> Result<()> {
    prepare_fonts(style)?;
    debug!(path = %path.display(), ?format, "rendering chart");
    let size = (style.width, style.height);
    if format.is_raster() {
        draw_bitmap(layout, path, size)
    } else {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw(&root, layout)
    }
}

#[cfg(feature = "raster")]
fn draw_bitmap(layout: &ChartLayout, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw(&root, layout)
}

#[cfg(not(feature = "raster"))]
fn draw_bitmap(_layout: &ChartLayout, path: &Path, _size: (u32, u32)) -> Result<()> {
    Err(PlotError::UnsupportedFormat {
        path: path.to_path_buf(),
        expected: SUPPORTED_EXTENSIONS,
    })
}

#[cfg(feature = "raster")]
fn prepare_fonts(style: &ChartStyle) -> Result<()> {
    super::fonts::ensure_font(style.font.as_deref())
}

#[cfg(not(feature = "raster"))]
fn prepare_fonts(_style: &ChartStyle) -> Result<()> {
    Ok(())
}

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, layout: &ChartLayout) -> Result<()> {
    root.fill(&WHITE).map_err(draw_error)?;

    let x_axis = BenchmarkAxis {
        layout,
        range: layout.x_range(),
    };
    let mut chart = ChartBuilder::on(root)
        .caption(CHART_TITLE, (FONT_FAMILY, 26))
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(70)
        .build_cartesian_2d(x_axis, layout.y_range())
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(layout.ticks.len())
        .x_label_style((FONT_FAMILY, 14).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|y| format!("{y:.2}"))
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()
        .map_err(draw_error)?;

    let half = layout.bar_width / 2.0;
    let total = layout.series.len();
    for (idx, series) in layout.series.iter().enumerate() {
        let color = series_color(idx, total);
        chart
            .draw_series(series.bars.iter().map(|bar| {
                Rectangle::new(
                    [(bar.center - half, 0.0), (bar.center + half, bar.height)],
                    color.filled(),
                )
            }))
            .map_err(draw_error)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font((FONT_FAMILY, 14))
        .draw()
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

/// X axis whose key points are the benchmark group centers, labelled with
/// the benchmark names.
struct BenchmarkAxis<'a> {
    layout: &'a ChartLayout,
    range: Range<f64>,
}

impl Ranged for BenchmarkAxis<'_> {
    type ValueType = f64;
    type FormatOption = NoDefaultFormatting;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.range.end - self.range.start;
        let size = (limit.1 - limit.0) as f64;
        ((value - self.range.start) / span * size).round() as i32 + limit.0
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.layout.ticks.iter().map(|tick| tick.position).collect()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

impl ValueFormatter<f64> for BenchmarkAxis<'_> {
    fn format_ext(&self, value: &f64) -> String {
        self.layout.tick_label(*value).to_string()
    }
}

/// Evenly spaced hues at fixed saturation and lightness, one per binary.
pub(crate) fn series_color(idx: usize, total: usize) -> HSLColor {
    let hue = idx as f64 / total.max(1) as f64;
    HSLColor(hue, 0.65, 0.55)
}

fn draw_error<E>(err: plotters::drawing::DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync,
{
    PlotError::Draw(err.to_string())
}
