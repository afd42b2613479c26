//! # Observer: event handlers registered on the bus
//!
//! The [`Observer`] trait is the extension point of the event bus. Every
//! fired event is offered to the registered observers in registration
//! order until one of them reports it handled.
//!
//! ```text
//! Event flow:
//!   any thread ── fire(event) ──► EVENT runner queue ──► dispatch pass
//!                                                          │
//!              ┌──────────────────────────┬────────────────┘
//!              ▼                          ▼
//!        Observer A (false)  ──►   Observer B (true)   ╳  Observer C
//! ```
//!
//! Observers run on the bus role's thread, one event at a time.

use super::event::Event;

use std::fmt;

/// Receiver of bus events.
///
/// `on_event` returns `true` if the event was handled, which ends the
/// dispatch pass for that event.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tasklane::{Event, Observer};
///
/// struct Counter(AtomicUsize);
///
/// impl<E: Event> Observer<E> for Counter {
///     fn on_event(&self, _event: &E) -> bool {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         false
///     }
/// }
/// ```
pub trait Observer<E: Event>: Send + Sync {
    /// Called on the bus thread for every event that reaches this
    /// observer.
    fn on_event(&self, event: &E) -> bool;
}

/// Registration token returned by
/// [`EventBus::register`](crate::EventBus::register).
///
/// Present it to [`EventBus::unregister`](crate::EventBus::unregister)
/// to remove the observer again.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub(crate) u64);

impl fmt::Debug for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({})", self.0)
    }
}
