#![allow(missing_docs)]

use std::fs;
use std::path::PathBuf;

use benchplot::{aggregate_files, PlotError};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/bench")
        .join(name)
}

#[test]
fn averages_repeated_runs() {
    let results = aggregate_files(&[fixture("run_a.csv")]).expect("aggregate");
    assert_eq!(results.len(), 3);
    assert_eq!(
        results.get("./target/release/clox", "benchmarks/fib.lox"),
        Some(2.0)
    );
    assert_eq!(
        results.get("./target/release/clox", "benchmarks/zoo.lox"),
        Some(0.5)
    );
    assert_eq!(results.get("./build/jlox", "benchmarks/fib.lox"), Some(4.5));
}

#[test]
fn disjoint_files_add_up() {
    let a = aggregate_files(&[fixture("run_a.csv")]).expect("aggregate a");
    let b = aggregate_files(&[fixture("run_b.csv")]).expect("aggregate b");
    let both = aggregate_files(&[fixture("run_a.csv"), fixture("run_b.csv")]).expect("aggregate");
    assert_eq!(both.len(), a.len() + b.len());
    assert_eq!(
        both.binaries(),
        vec!["./build/jlox", "./target/release/clox", "./target/release/rlox"]
    );
}

#[test]
fn groups_span_files() {
    let dir = TempDir::new().expect("tempdir");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    fs::write(&first, "Binary,Benchmark File,Runtime (s)\nbin1,b1.lox,1.0\n").unwrap();
    fs::write(&second, "Runtime (s),Binary,Benchmark File\n3.0,bin1,b1.lox\n").unwrap();

    let results = aggregate_files(&[&first, &second]).expect("aggregate");
    assert_eq!(results.len(), 1);
    assert_eq!(results.get("bin1", "b1.lox"), Some(2.0));
    assert_eq!(results.rows()[0].samples, 2);
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.csv");
    let err = aggregate_files(&[fixture("run_a.csv"), missing.clone()]).unwrap_err();
    match err {
        PlotError::Csv { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_runtime_column_fails_whole_run() {
    let err = aggregate_files(&[fixture("run_a.csv"), fixture("no_runtime.csv")]).unwrap_err();
    assert!(matches!(
        err,
        PlotError::MissingColumn {
            column: "Runtime (s)",
            ..
        }
    ));
    assert!(err.to_string().contains("no_runtime.csv"));
}
