//! Collection benchmarks: `Vec`, `VecDeque` and `LinkedList` compared on the
//! same operations, one suite per operation.

use std::collections::{LinkedList, VecDeque};
use std::hint::black_box;
use suitebench::{bench, suite_with_config, BenchmarkDescriptor, EngineConfig, EngineError, Suite};

/// Every suite name, in run order.
pub const SUITE_NAMES: [&str; 5] = ["push", "get", "set", "append", "fold"];

/// Build the suites whose name contains `filter` (all of them when `None`).
pub fn build_suites(
    config: &EngineConfig,
    size: usize,
    filter: Option<&str>,
) -> Result<Vec<Suite>, EngineError> {
    SUITE_NAMES
        .iter()
        .filter(|name| filter.map_or(true, |pattern| name.contains(pattern)))
        .map(|name| suite_with_config(*name, config.clone(), descriptors(name, size)))
        .collect()
}

fn descriptors(suite: &str, size: usize) -> Vec<BenchmarkDescriptor> {
    match suite {
        "push" => push(size),
        "get" => get(size),
        "set" => set(size),
        "append" => append(size),
        "fold" => fold(size),
        _ => Vec::new(),
    }
}

fn push(size: usize) -> Vec<BenchmarkDescriptor> {
    vec![
        bench("Vec", move || {
            let mut v = Vec::new();
            for i in 0..size {
                v.push(i);
            }
            black_box(v);
        }),
        bench("VecDeque", move || {
            let mut d = VecDeque::new();
            for i in 0..size {
                d.push_back(i);
            }
            black_box(d);
        }),
        bench("LinkedList", move || {
            let mut l = LinkedList::new();
            for i in 0..size {
                l.push_back(i);
            }
            black_box(l);
        }),
    ]
}

fn get(size: usize) -> Vec<BenchmarkDescriptor> {
    let v: Vec<usize> = (0..size).collect();
    let d: VecDeque<usize> = (0..size).collect();
    let l: LinkedList<usize> = (0..size).collect();
    let middle = size / 2;

    vec![
        bench("Vec", move || {
            for i in 0..v.len() {
                black_box(v[black_box(i)]);
            }
        }),
        bench("VecDeque", move || {
            for i in 0..d.len() {
                black_box(d[black_box(i)]);
            }
        }),
        // Linear access only: one lookup from the middle
        bench("LinkedList", move || {
            black_box(l.iter().nth(black_box(middle)));
        }),
    ]
}

fn set(size: usize) -> Vec<BenchmarkDescriptor> {
    let mut v: Vec<usize> = vec![0; size];
    let mut d: VecDeque<usize> = std::iter::repeat(0).take(size).collect();
    let mut l: LinkedList<usize> = std::iter::repeat(0).take(size).collect();
    let middle = size / 2;

    vec![
        bench("Vec", move || {
            for i in 0..v.len() {
                v[i] = black_box(i);
            }
            black_box(&v);
        }),
        bench("VecDeque", move || {
            for i in 0..d.len() {
                d[i] = black_box(i);
            }
            black_box(&d);
        }),
        bench("LinkedList", move || {
            if let Some(slot) = l.iter_mut().nth(black_box(middle)) {
                *slot = black_box(middle);
            }
            black_box(&l);
        }),
    ]
}

fn append(size: usize) -> Vec<BenchmarkDescriptor> {
    let v: Vec<usize> = (0..size).collect();
    let d: VecDeque<usize> = (0..size).collect();
    let l: LinkedList<usize> = (0..size).collect();

    vec![
        bench("Vec", move || {
            let mut left = v.clone();
            let mut right = v.clone();
            left.append(&mut right);
            black_box(left);
        }),
        bench("VecDeque", move || {
            let mut left = d.clone();
            let mut right = d.clone();
            left.append(&mut right);
            black_box(left);
        }),
        bench("LinkedList", move || {
            let mut left = l.clone();
            let mut right = l.clone();
            left.append(&mut right);
            black_box(left);
        }),
    ]
}

fn fold(size: usize) -> Vec<BenchmarkDescriptor> {
    let v: Vec<u64> = (0..size as u64).collect();
    let d: VecDeque<u64> = (0..size as u64).collect();
    let l: LinkedList<u64> = (0..size as u64).collect();

    vec![
        bench("Vec", move || {
            black_box(v.iter().fold(0u64, |acc, x| acc.wrapping_add(*x)));
        }),
        bench("VecDeque", move || {
            black_box(d.iter().fold(0u64, |acc, x| acc.wrapping_add(*x)));
        }),
        bench("LinkedList", move || {
            black_box(l.iter().fold(0u64, |acc, x| acc.wrapping_add(*x)));
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> EngineConfig {
        EngineConfig {
            samples: 2,
            iterations: Some(1),
            warmup_iterations: 0,
            target_sample_duration_ms: 0,
            pin_core: None,
        }
    }

    #[test]
    fn test_all_suites_built_in_order() {
        let suites = build_suites(&quick(), 8, None).unwrap();
        let names: Vec<&str> = suites.iter().map(Suite::name).collect();

        assert_eq!(names, SUITE_NAMES);
        for suite in &suites {
            assert_eq!(
                suite.names().collect::<Vec<_>>(),
                vec!["Vec", "VecDeque", "LinkedList"]
            );
        }
    }

    #[test]
    fn test_filter() {
        let suites = build_suites(&quick(), 8, Some("e")).unwrap();
        let names: Vec<&str> = suites.iter().map(Suite::name).collect();
        assert_eq!(names, vec!["get", "set", "append"]);

        assert!(build_suites(&quick(), 8, Some("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = EngineConfig {
            samples: 0,
            ..quick()
        };
        assert!(build_suites(&config, 8, None).is_err());
    }

    #[test]
    fn test_every_benchmark_runs() {
        let mut suites = build_suites(&quick(), 16, None).unwrap();
        for suite in suites.iter_mut() {
            suite.run();
        }

        for suite in &suites {
            for bench in suite.benchmarks() {
                assert!(bench.error().is_none(), "{} failed", bench);
                assert!(bench.stats().is_some());
            }
        }
    }

    #[test]
    fn test_zero_size_is_harmless() {
        let mut suites = build_suites(&quick(), 0, None).unwrap();
        for suite in suites.iter_mut() {
            suite.run();
        }
        assert!(suites
            .iter()
            .flat_map(Suite::benchmarks)
            .all(|b| b.error().is_none()));
    }
}
