//! Register named functions into benchmark suites and run them with console
//! progress.
//!
//! ```no_run
//! use suitebench::{bench, run, suite};
//!
//! let math = suite(
//!     "math",
//!     [
//!         bench("add", || {
//!             std::hint::black_box(2 + 2);
//!         }),
//!         bench("mul", || {
//!             std::hint::black_box(3 * 7);
//!         }),
//!     ],
//! );
//!
//! let answer = run([math], 42);
//! assert_eq!(answer, 42);
//! ```
//!
//! The timing loop, calibration and statistics all live in
//! [`suitebench_engine`]; this crate only maps descriptors onto engine suites
//! and prints the engine's lifecycle events.

mod console;

use std::borrow::BorrowMut;
use std::fmt;
use std::io::{self, Write};

pub use console::{cycle_line, start_line, COMPLETE_LINE};
pub use suitebench_engine::{EngineConfig, EngineError, Event, EventKind, Suite};

use console::SharedWriter;

/// A named benchmark function waiting to be added to a suite.
pub struct BenchmarkDescriptor {
    name: String,
    func: Box<dyn FnMut()>,
}

impl BenchmarkDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for BenchmarkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Pair a name with the function to time.
///
/// Names are not validated; uniqueness is left to the engine.
pub fn bench<F>(name: impl Into<String>, func: F) -> BenchmarkDescriptor
where
    F: FnMut() + 'static,
{
    BenchmarkDescriptor {
        name: name.into(),
        func: Box::new(func),
    }
}

/// Build a suite from descriptors, keeping their order.
///
/// Uses [`EngineConfig::load`] for timing parameters.
pub fn suite<I>(name: impl Into<String>, descriptors: I) -> Suite
where
    I: IntoIterator<Item = BenchmarkDescriptor>,
{
    let mut suite = Suite::with_loaded_config(name);
    register(&mut suite, descriptors);
    suite
}

/// Like [`suite`], with explicit timing parameters.
pub fn suite_with_config<I>(
    name: impl Into<String>,
    config: EngineConfig,
    descriptors: I,
) -> Result<Suite, EngineError>
where
    I: IntoIterator<Item = BenchmarkDescriptor>,
{
    let mut suite = Suite::with_config(name, config)?;
    register(&mut suite, descriptors);
    Ok(suite)
}

fn register<I>(suite: &mut Suite, descriptors: I)
where
    I: IntoIterator<Item = BenchmarkDescriptor>,
{
    for BenchmarkDescriptor { name, func } in descriptors {
        suite.add_boxed(name, func);
    }
}

/// Run every suite in order, printing progress to stdout, and hand back
/// `passthrough` untouched.
pub fn run<I, S, T>(suites: I, passthrough: T) -> T
where
    I: IntoIterator<Item = S>,
    S: BorrowMut<Suite>,
{
    run_to(io::stdout(), suites, passthrough)
}

/// Like [`run`], writing progress lines to `out` instead of stdout.
///
/// Write failures are logged and otherwise ignored.
pub fn run_to<W, I, S, T>(out: W, suites: I, passthrough: T) -> T
where
    W: Write + 'static,
    I: IntoIterator<Item = S>,
    S: BorrowMut<Suite>,
{
    let out = SharedWriter::new(out);

    for mut entry in suites {
        let suite: &mut Suite = entry.borrow_mut();

        let on_start = out.clone();
        let on_cycle = out.clone();
        let on_complete = out.clone();
        suite
            .on(EventKind::Start, move |event| {
                on_start.write_line(&start_line(event))
            })
            .on(EventKind::Cycle, move |event| {
                on_cycle.write_line(&cycle_line(event))
            })
            .on(EventKind::Complete, move |_| {
                on_complete.write_line(COMPLETE_LINE)
            })
            .run();
    }

    passthrough
}
