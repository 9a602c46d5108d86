//! Console rendering of suite lifecycle events.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use suitebench_engine::Event;
use tracing::warn;

/// Line written when a suite finishes.
pub const COMPLETE_LINE: &str = "Done";

/// Line written when a suite starts.
pub fn start_line(event: &Event<'_>) -> String {
    format!("Benchmarking {}", event.suite())
}

/// Line written after each benchmark: the engine's rendering of its result.
pub fn cycle_line(event: &Event<'_>) -> String {
    event
        .target()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// One output sink shared by the observers of every suite in a run.
pub(crate) struct SharedWriter<W> {
    inner: Rc<RefCell<W>>,
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<W: Write> SharedWriter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            inner: Rc::new(RefCell::new(out)),
        }
    }

    /// Write and flush one line.
    pub(crate) fn write_line(&self, line: &str) {
        let mut out = self.inner.borrow_mut();
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            warn!(error = %e, "failed to write benchmark progress");
        }
    }
}
