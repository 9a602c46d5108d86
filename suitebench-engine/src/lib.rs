use std::fmt;

pub mod config;
pub mod error;
pub mod event;
pub mod measurement;
pub mod output;
pub mod statistics;
pub mod suite;

pub use config::EngineConfig;
pub use error::{BenchError, EngineError, Result};
pub use event::{Event, EventKind, Handler};
pub use output::*;
pub use statistics::Stats;
pub use suite::Suite;

/// A named function registered in a [`Suite`], with the outcome of its last run.
pub struct Benchmark {
    name: String,
    func: Box<dyn FnMut()>,
    stats: Option<Stats>,
    error: Option<BenchError>,
}

impl Benchmark {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self::from_boxed(name, Box::new(func))
    }

    pub fn from_boxed(name: impl Into<String>, func: Box<dyn FnMut()>) -> Self {
        Self {
            name: name.into(),
            func,
            stats: None,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Timing summary of the last successful run.
    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    /// Failure of the last run, if the function panicked.
    pub fn error(&self) -> Option<&BenchError> {
        self.error.as_ref()
    }

    /// Calls per second from the last run, 0 if it has not run or failed.
    pub fn hz(&self) -> f64 {
        self.stats.as_ref().map_or(0.0, |s| s.hz)
    }

    pub(crate) fn execute(&mut self, config: &EngineConfig) {
        self.stats = None;
        self.error = None;
        match measurement::measure(self.func.as_mut(), config) {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => self.error = Some(e),
        }
    }
}

impl fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("stats", &self.stats)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Renders the one-line progress report emitted on each cycle,
/// e.g. `push x 1,234,567 ops/sec ±0.52% (50 runs sampled)`.
impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "{}: {}", self.name, error);
        }

        let (hz, rme, size) = self
            .stats
            .as_ref()
            .map_or((0.0, 0.0, 0), |s| (s.hz, s.rme, s.sample.len()));

        write!(
            f,
            "{} x {} ops/sec \u{b1}{:.2}% ({} run{} sampled)",
            self.name,
            format_hz(hz),
            rme,
            size,
            if size == 1 { "" } else { "s" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_stats(name: &str, stats: Stats) -> Benchmark {
        let mut bench = Benchmark::new(name, || {});
        bench.stats = Some(stats);
        bench
    }

    #[test]
    fn test_display_not_run() {
        let bench = Benchmark::new("idle", || {});
        assert_eq!(bench.to_string(), "idle x 0.00 ops/sec ±0.00% (0 runs sampled)");
    }

    #[test]
    fn test_display_fast_benchmark() {
        // 1µs per call, no spread
        let bench = with_stats("add", Stats::from_samples(1000, vec![0.000_001; 4]));
        let line = bench.to_string();

        assert!(line.starts_with("add x "), "{}", line);
        assert!(line.contains(" ops/sec ±"), "{}", line);
        assert!(line.ends_with("(4 runs sampled)"), "{}", line);
        // ~1,000,000 ops/sec is grouped with separators
        assert!(line.contains(",000"), "{}", line);
    }

    #[test]
    fn test_display_slow_benchmark_has_decimals() {
        let bench = with_stats("sleep", Stats::from_samples(1, vec![0.5]));
        assert_eq!(bench.to_string(), "sleep x 2.00 ops/sec ±0.00% (1 run sampled)");
    }

    #[test]
    fn test_display_error() {
        let mut bench = Benchmark::new("broken", || {});
        bench.error = Some(BenchError::Panicked("index out of bounds".to_string()));
        assert_eq!(bench.to_string(), "broken: panicked: index out of bounds");
    }

    #[test]
    fn test_execute_resets_previous_outcome() {
        let mut should_panic = true;
        let mut bench = Benchmark::new("flaky", move || {
            if should_panic {
                should_panic = false;
                panic!("first run fails");
            }
        });
        let config = EngineConfig {
            samples: 2,
            iterations: Some(1),
            warmup_iterations: 0,
            ..Default::default()
        };

        bench.execute(&config);
        assert!(bench.error().is_some());
        assert!(bench.stats().is_none());

        bench.execute(&config);
        assert!(bench.error().is_none());
        assert_eq!(bench.stats().map(|s| s.sample.len()), Some(2));
    }
}
