//! Thread-bound task runners.
//!
//! This module contains the scheduler: one single-threaded task runner
//! per [`Role`], each with its own OS thread and its own run loop.
//!
//! It is responsible for:
//! - accepting immediate and delayed tasks from any thread,
//! - running them on the role's thread in post order (immediate tasks) or
//!   deadline order (delayed tasks),
//! - parking idle runners until new work or the next deadline,
//! - starting, stopping, and joining runner threads.
//!
//! Most users interact with [`Runtime`] and [`Handle`]; the runner itself
//! is internal.

mod core;
mod incoming;
mod pending;
mod role;
mod runner;

pub(crate) mod builder;
pub(crate) mod context;

pub use builder::RuntimeBuilder;
pub use self::core::{Handle, Runtime};
pub use role::Role;
