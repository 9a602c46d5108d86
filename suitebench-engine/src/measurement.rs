use crate::config::EngineConfig;
use crate::error::BenchError;
use crate::statistics::Stats;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Calibration never scales a sample beyond this many calls
pub const MAX_ITERATIONS: usize = 1 << 24;

/// Run the full timing loop for one function: warmup, calibration, sampling.
///
/// A panic anywhere in the loop is caught and returned as an error.
pub fn measure(func: &mut dyn FnMut(), config: &EngineConfig) -> Result<Stats, BenchError> {
    panic::catch_unwind(AssertUnwindSafe(|| measure_unguarded(func, config)))
        .map_err(|payload| BenchError::Panicked(panic_message(payload.as_ref())))
}

fn measure_unguarded(func: &mut dyn FnMut(), config: &EngineConfig) -> Stats {
    // Warmup phase
    for _ in 0..config.warmup_iterations {
        func();
    }

    let iterations = match config.iterations {
        Some(iterations) => iterations,
        None => calibrate(
            func,
            Duration::from_millis(config.target_sample_duration_ms),
        ),
    };

    let mut sample = Vec::with_capacity(config.samples);
    for _ in 0..config.samples {
        let elapsed = time_iterations(func, iterations);
        sample.push(elapsed.as_secs_f64() / iterations as f64);
    }

    Stats::from_samples(iterations, sample)
}

/// Find how many calls make one sample last at least `target`.
///
/// Doubles from a single call, stopping at [`MAX_ITERATIONS`].
pub fn calibrate(func: &mut dyn FnMut(), target: Duration) -> usize {
    let mut iterations = 1;
    loop {
        let elapsed = time_iterations(func, iterations);
        if elapsed >= target || iterations >= MAX_ITERATIONS {
            return iterations;
        }
        iterations = (iterations * 2).min(MAX_ITERATIONS);
    }
}

pub fn time_iterations(func: &mut dyn FnMut(), iterations: usize) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        func();
    }
    start.elapsed()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
