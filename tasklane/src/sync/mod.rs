//! Synchronization primitives for tasklane.
//!
//! This module provides the blocking primitive the task runners park on:
//! - [`WaitableEvent`]: a payload-free signal backed by a condition
//!   variable, supporting indefinite, timed, and deadline waits.
//!
//! ## Design notes
//!
//! - Signals are not counted. A [`WaitableEvent::signal`] with nobody
//!   waiting has no effect.
//! - A waiter that must not miss a signal sent between "check for work"
//!   and "go to sleep" locks the event first ([`WaitableEvent::lock`]),
//!   checks, then waits on the returned [`WaitGuard`]. Signalling takes
//!   the same lock, so the signal either lands before the check or wakes
//!   the wait.

mod waitable;

pub use waitable::{WaitGuard, WaitableEvent};
