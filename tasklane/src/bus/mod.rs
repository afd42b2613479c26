//! Typed publish/subscribe over a task runner.
//!
//! This module contains the event bus: an ordered list of observers owned
//! by one role's thread, and the machinery to fire events at it from any
//! thread.
//!
//! It is responsible for:
//! - registering and unregistering observers,
//! - queuing fired events as tasks on the bus role,
//! - offering each event to observers in order until one handles it.
//!
//! Event sets are usually declared with [`events!`](crate::events), which
//! generates the [`Event`] implementation and a per-set handler trait.

mod core;
mod event;
mod list;
mod observer;

#[cfg(feature = "logging")]
mod log;

pub use self::core::EventBus;
pub use event::{Event, Tag};
pub use observer::{Observer, ObserverId};

#[cfg(feature = "logging")]
pub use log::LogWriter;
