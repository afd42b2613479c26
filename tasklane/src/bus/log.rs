//! # LogWriter: simple event printer
//!
//! An observer that prints every event it sees to stdout and never
//! handles it, so the rest of the observer list still runs. Register it
//! first to trace all traffic on a bus. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [event] name=Ping tag=1 thread="tasklane-event"
//! [event] name=Stop tag=0 thread="tasklane-event"
//! ```

use super::event::Event;
use super::observer::Observer;

use std::thread;

/// Event printer observer.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<E: Event> Observer<E> for LogWriter {
    fn on_event(&self, event: &E) -> bool {
        println!(
            "[event] name={} tag={} thread={:?}",
            event.name(),
            event.tag(),
            thread::current().name().unwrap_or("unnamed"),
        );
        false
    }
}
