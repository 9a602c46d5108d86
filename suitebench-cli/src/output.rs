//! Output formatting for the runner
//!
//! Progress lines come from the bridge; this module adds the header, the
//! per-suite summary and the JSON report.

use colored::*;
use serde::Serialize;
use suitebench::{EngineConfig, Suite};
use suitebench_engine::{format_seconds, Benchmark, Stats};

pub fn print_header(config: &EngineConfig, suites: usize, size: usize) {
    println!("{}", "SuiteBench - Collection Benchmarks".bold());
    println!(
        "{} {} {} ({} elements, {} samples, {})",
        "Running".green().bold(),
        suites,
        if suites == 1 { "suite" } else { "suites" },
        size,
        config.samples,
        match config.iterations {
            Some(n) => format!("{} iterations/sample", n),
            None => format!("auto-scaled to {}ms/sample", config.target_sample_duration_ms),
        }
    );
    println!();
}

pub fn print_listing(suites: &[Suite]) {
    for suite in suites {
        println!("{}", suite.name().cyan().bold());
        for name in suite.names() {
            println!("    {}", name);
        }
    }
}

/// Fastest benchmark of a suite by calls per second, ignoring failures.
pub fn fastest(suite: &Suite) -> Option<&Benchmark> {
    suite
        .benchmarks()
        .iter()
        .filter(|b| b.stats().is_some())
        .max_by(|a, b| a.hz().total_cmp(&b.hz()))
}

pub fn print_summary(suites: &[Suite]) {
    println!("{}", "─".repeat(80).dimmed());
    for suite in suites {
        match fastest(suite) {
            Some(best) => println!(
                "{} {} {} ({} per call)",
                "Fastest".green().bold(),
                format!("{}:", suite.name()).cyan(),
                best.name().bold(),
                format_seconds(best.stats().map_or(0.0, |s| s.mean)).dimmed()
            ),
            None => println!(
                "{} {} no successful benchmarks",
                "Fastest".dimmed(),
                format!("{}:", suite.name()).cyan()
            ),
        }
    }

    let failed = failures(suites);
    if failed > 0 {
        println!(
            "{} {} benchmark(s) failed",
            "Warning:".yellow().bold(),
            failed
        );
    }
}

pub fn failures(suites: &[Suite]) -> usize {
    suites
        .iter()
        .flat_map(Suite::benchmarks)
        .filter(|b| b.error().is_some())
        .count()
}

/// One benchmark outcome in the JSON report
#[derive(Debug, Serialize)]
pub struct BenchmarkReport<'a> {
    pub suite: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<&'a Stats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn reports(suites: &[Suite]) -> Vec<BenchmarkReport<'_>> {
    suites
        .iter()
        .flat_map(|suite| {
            suite.benchmarks().iter().map(move |bench| BenchmarkReport {
                suite: suite.name(),
                name: bench.name(),
                stats: bench.stats(),
                error: bench.error().map(ToString::to_string),
            })
        })
        .collect()
}

pub fn print_json(suites: &[Suite]) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&reports(suites))?);
    Ok(())
}
