#![allow(missing_docs)]

use std::path::PathBuf;

use benchplot::{aggregate, BenchmarkRecord};
use proptest::prelude::*;

fn record(binary: &str, benchmark: &str, runtime: f64) -> BenchmarkRecord {
    BenchmarkRecord {
        source: PathBuf::from("prop.csv"),
        binary: binary.to_string(),
        benchmark: benchmark.to_string(),
        runtime_secs: Some(runtime),
    }
}

fn arb_rows() -> impl Strategy<Value = Vec<(String, String, f64)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["clox", "jlox", "rlox"]),
            prop::sample::select(vec!["fib.lox", "zoo.lox", "trees.lox", "equality.lox"]),
            0.0f64..100.0,
        )
            .prop_map(|(binary, benchmark, runtime)| {
                (binary.to_string(), benchmark.to_string(), runtime)
            }),
        1..64,
    )
}

proptest! {
    #[test]
    fn prop_mean_matches_matching_rows(rows in arb_rows()) {
        let records: Vec<BenchmarkRecord> = rows
            .iter()
            .map(|(binary, benchmark, runtime)| record(binary, benchmark, *runtime))
            .collect();
        let results = aggregate(&records);

        for row in results.rows() {
            let matching: Vec<f64> = rows
                .iter()
                .filter(|(b, m, _)| *b == row.binary && *m == row.benchmark)
                .map(|(_, _, runtime)| *runtime)
                .collect();
            prop_assert!(!matching.is_empty());
            prop_assert_eq!(row.samples, matching.len());
            let expected = matching.iter().sum::<f64>() / matching.len() as f64;
            let mean = row.mean_runtime_secs.expect("mean present");
            prop_assert!((mean - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    #[test]
    fn prop_one_row_per_distinct_pair(rows in arb_rows()) {
        let records: Vec<BenchmarkRecord> = rows
            .iter()
            .map(|(binary, benchmark, runtime)| record(binary, benchmark, *runtime))
            .collect();
        let mut keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|(b, m, _)| (b.as_str(), m.as_str()))
            .collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(aggregate(&records).len(), keys.len());
    }

    #[test]
    fn prop_single_row_is_unchanged(runtime in 0.0f64..1e6) {
        let results = aggregate(&[record("bin", "solo.lox", runtime)]);
        prop_assert_eq!(results.get("bin", "solo.lox"), Some(runtime));
    }
}
