#![allow(missing_docs)]

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use benchplot::chart::{ChartViewer, ImageFormat};
use benchplot::{
    aggregate_files, render_chart, AggregatedResults, ChartStyle, ChartTarget, PlotError,
    RenderOutcome,
};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingViewer {
    shown: RefCell<Vec<String>>,
}

impl ChartViewer for RecordingViewer {
    fn show(&self, svg: &str) -> benchplot::Result<()> {
        self.shown.borrow_mut().push(svg.to_string());
        Ok(())
    }
}

fn fixture_results() -> AggregatedResults {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bench");
    aggregate_files(&[dir.join("run_a.csv"), dir.join("run_b.csv")]).expect("aggregate")
}

fn entries(dir: &TempDir) -> usize {
    fs::read_dir(dir.path()).expect("read dir").count()
}

#[cfg(not(feature = "raster"))]
#[test]
fn output_path_produces_svg_file() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("chart.svg");
    let outcome = render_chart(
        &fixture_results(),
        ChartTarget::File(&out),
        &ChartStyle::default(),
    )
    .expect("render");

    assert_eq!(
        outcome,
        RenderOutcome::Saved {
            path: out.clone(),
            format: ImageFormat::Svg,
        }
    );
    let svg = fs::read_to_string(&out).expect("chart written");
    assert!(svg.contains("Benchmark Performance Comparison"));
    assert!(svg.contains("binary_trees"));
    assert!(svg.contains("jlox"));
}

#[cfg(not(feature = "raster"))]
#[test]
fn display_hands_svg_to_viewer_without_writing() {
    let svg_files_in_cwd = || {
        fs::read_dir(".")
            .expect("read cwd")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "svg"))
            .count()
    };
    let before = svg_files_in_cwd();
    let viewer = RecordingViewer::default();
    let outcome = render_chart(
        &fixture_results(),
        ChartTarget::Display(&viewer),
        &ChartStyle::default(),
    )
    .expect("render");

    assert_eq!(outcome, RenderOutcome::Displayed);
    let shown = viewer.shown.borrow();
    assert_eq!(shown.len(), 1);
    assert!(shown[0].contains("Average Runtime (seconds)"));
    assert_eq!(svg_files_in_cwd(), before);
}

#[test]
fn unsupported_extension_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("chart.pdf");
    let err = render_chart(
        &fixture_results(),
        ChartTarget::File(&out),
        &ChartStyle::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::UnsupportedFormat { .. }));
    assert_eq!(entries(&dir), 0);
}

#[test]
fn empty_results_are_not_drawn() {
    let dir = TempDir::new().expect("tempdir");
    let out = dir.path().join("chart.svg");
    let viewer = RecordingViewer::default();

    let err = render_chart(
        &AggregatedResults::default(),
        ChartTarget::File(&out),
        &ChartStyle::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::EmptyResults));

    let err = render_chart(
        &AggregatedResults::default(),
        ChartTarget::Display(&viewer),
        &ChartStyle::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PlotError::EmptyResults));
    assert!(viewer.shown.borrow().is_empty());
    assert_eq!(entries(&dir), 0);
}
