//! # Tasklane
//!
//! **Tasklane** is a small thread-per-role task runtime with a typed,
//! asynchronous event bus on top.
//!
//! Instead of a pool of interchangeable workers, Tasklane gives each
//! *role* (`EVENT`, `IO`, or any other index you configure) one dedicated
//! OS thread with its own run loop. Work is posted to a role, never to a
//! thread, which keeps state owned by a role free of locks.
//!
//! Tasklane offers:
//!
//! - **Per-role task runners** with immediate and delayed tasks, FIFO
//!   order for immediate work and deadline order for delayed work
//! - A **typed event bus** delivering events to observers on the event
//!   role, in registration order, until one handles them
//! - **Saturating time arithmetic** (`TimeDelta`, `TimeTicks`) that never
//!   wraps
//! - An **`events!` macro** that declares an event set, its tags and a
//!   typed handler trait in one go
//! - A **`Bootstrap`** wrapper that runs an application until it fires the
//!   stop event
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tasklane::{Bootstrap, Event, EventBus, Observer};
//!
//! tasklane::events! {
//!     #[derive(Debug)]
//!     pub enum AppEvent {
//!         Ping(i32, i32),
//!     }
//! }
//!
//! struct Listener {
//!     bus: EventBus<AppEvent>,
//! }
//!
//! impl AppEventHandler for Listener {
//!     fn on_ping(&self, a: &i32, b: &i32) -> bool {
//!         println!("ping {a} {b}");
//!         self.bus.fire(AppEvent::stop()).is_ok()
//!     }
//! }
//!
//! impl Observer<AppEvent> for Listener {
//!     fn on_event(&self, event: &AppEvent) -> bool {
//!         event.dispatch(self)
//!     }
//! }
//!
//! Bootstrap::new()
//!     .run(|bus: &EventBus<AppEvent>| {
//!         bus.register(Arc::new(Listener { bus: bus.clone() })).unwrap();
//!         bus.fire(AppEvent::Ping(3, 1)).unwrap();
//!     })
//!     .unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`runtime`]: roles, the runtime, its builder and handle
//! - [`bus`]: events, observers and the event bus
//! - [`time`]: saturating durations and monotonic instants
//! - [`sync`]: the signal runners park on
//!
//! ## Features
//!
//! - `logging`: exports [`LogWriter`](bus::LogWriter), an observer that
//!   prints every event to stdout.

extern crate self as tasklane;

mod bootstrap;
mod error;

pub mod bus;
pub mod runtime;
pub mod sync;
pub mod time;

pub use bootstrap::{Application, Bootstrap};
pub use bus::{Event, EventBus, Observer, ObserverId, Tag};
pub use error::{PostError, RegisterError, RuntimeError};
pub use runtime::{Handle, Role, Runtime, RuntimeBuilder};
pub use time::{TimeDelta, TimeTicks};

#[cfg(feature = "logging")]
pub use bus::LogWriter;

pub use tasklane_macros::events;
