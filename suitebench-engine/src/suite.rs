//! Named, ordered collections of benchmarks and their run loop.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::event::{Event, EventKind, Listeners};
use crate::Benchmark;
use std::cell::Cell;
use std::fmt;
use tracing::{debug, warn};

/// A named collection of benchmarks run together.
///
/// Benchmarks run in the order they were added. Handlers subscribed with
/// [`Suite::on`] stay attached across runs.
pub struct Suite {
    name: String,
    config: EngineConfig,
    benchmarks: Vec<Benchmark>,
    listeners: Listeners,
}

impl Suite {
    /// Create an empty suite using the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: EngineConfig::default(),
            benchmarks: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    /// Create an empty suite configured from `suitebench.toml` and the
    /// environment (see [`EngineConfig::load`]).
    pub fn with_loaded_config(name: impl Into<String>) -> Self {
        let mut suite = Self::new(name);
        suite.config = EngineConfig::load();
        suite
    }

    pub fn with_config(name: impl Into<String>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut suite = Self::new(name);
        suite.config = config;
        Ok(suite)
    }

    /// Register a benchmark at the end of the suite.
    ///
    /// Names are not checked for uniqueness.
    pub fn add<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.push(Benchmark::new(name, func))
    }

    pub fn add_boxed(&mut self, name: impl Into<String>, func: Box<dyn FnMut()>) -> &mut Self {
        self.push(Benchmark::from_boxed(name, func))
    }

    pub fn push(&mut self, benchmark: Benchmark) -> &mut Self {
        self.benchmarks.push(benchmark);
        self
    }

    /// Subscribe a handler to one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: FnMut(&Event<'_>) + 'static,
    {
        self.listeners.push(kind, Box::new(handler));
        self
    }

    /// Run every benchmark in order, emitting events as it goes.
    ///
    /// Returns once the last benchmark has been timed.
    pub fn run(&mut self) -> &mut Self {
        let Suite {
            name,
            config,
            benchmarks,
            listeners,
        } = &mut *self;
        let name = name.as_str();
        let abort = Cell::new(false);

        debug!(
            suite = %name,
            benchmarks = benchmarks.len(),
            handlers = listeners.len(),
            "suite starting"
        );

        let previous_affinity = config.pin_core.and_then(|core| pin_thread(name, core));

        listeners.emit(&Event::new(EventKind::Start, name, None, &abort));

        for bench in benchmarks.iter_mut() {
            if abort.get() {
                break;
            }

            bench.execute(config);
            debug!(suite = %name, bench = bench.name(), hz = bench.hz(), "benchmark cycle");

            if let Some(error) = bench.error() {
                warn!(suite = %name, bench = bench.name(), error = %error, "benchmark failed");
                listeners.emit(&Event::new(EventKind::Error, name, Some(&*bench), &abort));
            }
            listeners.emit(&Event::new(EventKind::Cycle, name, Some(&*bench), &abort));
        }

        if abort.get() {
            debug!(suite = %name, "suite aborted");
            listeners.emit(&Event::new(EventKind::Abort, name, None, &abort));
        }

        listeners.emit(&Event::new(EventKind::Complete, name, None, &abort));

        if let Some(cores) = previous_affinity {
            if let Err(e) = affinity::set_thread_affinity(&cores) {
                warn!(suite = %name, error = %e, "failed to restore thread affinity");
            }
        }
        debug!(suite = %name, "suite complete");

        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.benchmarks.iter().map(Benchmark::name)
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// Pin the current thread to `core`, returning the cores it could run on
/// before so they can be restored.
fn pin_thread(suite: &str, core: usize) -> Option<Vec<usize>> {
    let previous = match affinity::get_thread_affinity() {
        Ok(cores) => cores,
        Err(e) => {
            warn!(suite, core, error = %e, "cannot read thread affinity, not pinning");
            return None;
        }
    };

    match affinity::set_thread_affinity(&[core]) {
        Ok(()) => Some(previous),
        Err(e) => {
            warn!(suite, core, error = %e, "failed to pin benchmark thread");
            None
        }
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("benchmarks", &self.benchmarks)
            .field("handlers", &self.listeners.len())
            .finish()
    }
}
