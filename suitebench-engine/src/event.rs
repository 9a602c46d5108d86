//! Suite lifecycle events and the handlers subscribed to them.

use crate::Benchmark;
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::fmt;

/// Which point of a suite run an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The suite is about to run its first benchmark
    Start,
    /// One benchmark finished its timing loop (successfully or not)
    Cycle,
    /// A benchmark failed; always followed by its `Cycle`
    Error,
    /// A handler requested the run be aborted
    Abort,
    /// The suite finished
    Complete,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Start => "start",
            EventKind::Cycle => "cycle",
            EventKind::Error => "error",
            EventKind::Abort => "abort",
            EventKind::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// An event emitted by [`crate::Suite::run`].
pub struct Event<'a> {
    kind: EventKind,
    suite: &'a str,
    target: Option<&'a Benchmark>,
    timestamp: DateTime<Utc>,
    abort: &'a Cell<bool>,
}

impl<'a> Event<'a> {
    pub(crate) fn new(
        kind: EventKind,
        suite: &'a str,
        target: Option<&'a Benchmark>,
        abort: &'a Cell<bool>,
    ) -> Self {
        Self {
            kind,
            suite,
            target,
            timestamp: Utc::now(),
            abort,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Name of the suite emitting the event.
    pub fn suite(&self) -> &'a str {
        self.suite
    }

    /// The benchmark this event is about. Set for `Cycle` and `Error`.
    pub fn target(&self) -> Option<&'a Benchmark> {
        self.target
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Ask the suite to skip its remaining benchmarks.
    ///
    /// The benchmark currently reported still completes its events; the
    /// suite then emits `Abort` followed by `Complete`.
    pub fn abort(&self) {
        self.abort.set(true);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.get()
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("suite", &self.suite)
            .field("target", &self.target.map(Benchmark::name))
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// Callback subscribed to a suite event.
pub type Handler = Box<dyn FnMut(&Event<'_>)>;

/// Handlers of one suite, kept in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    handlers: Vec<(EventKind, Handler)>,
}

impl Listeners {
    pub(crate) fn push(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.push((kind, handler));
    }

    pub(crate) fn emit(&mut self, event: &Event<'_>) {
        for (kind, handler) in self.handlers.iter_mut() {
            if *kind == event.kind() {
                handler(event);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}
