//! Error types used by the task runners and the event bus.
//!
//! - [`PostError`]: soft failures returned to whoever posts work (tasks,
//!   events). The caller decides whether to retry, drop, or escalate.
//! - [`RuntimeError`]: failures of the runtime lifecycle itself
//!   (configuration, thread start-up, runner threads dying).
//! - [`RegisterError`]: an observer could not be added to an event bus.
//!
//! Programming-contract violations (unregistering an observer off the bus
//! thread, configuring zero roles) are panics, not error values.

use crate::runtime::Role;

use std::io;
use thiserror::Error;

/// Errors returned when work cannot be queued on a runner.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    /// The runtime was not built with this role.
    #[error("no task runner exists for role {role}")]
    UnknownRole {
        /// The role that was addressed.
        role: Role,
    },

    /// The runner for this role has stopped accepting work.
    #[error("task runner for role {role} has stopped")]
    Stopped {
        /// The role that was addressed.
        role: Role,
    },
}

impl PostError {
    /// Returns a short stable label (snake_case) for logs.
    ///
    /// # Example
    /// ```
    /// use tasklane::{PostError, Role};
    ///
    /// let err = PostError::Stopped { role: Role::IO };
    /// assert_eq!(err.as_label(), "post_stopped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PostError::UnknownRole { .. } => "post_unknown_role",
            PostError::Stopped { .. } => "post_stopped",
        }
    }

    /// Returns the role the failed post was addressed to.
    pub fn role(&self) -> Role {
        match self {
            PostError::UnknownRole { role } | PostError::Stopped { role } => *role,
        }
    }
}

/// Errors produced while building or running a runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The configured primary role is not part of the role set.
    #[error("role {role} is outside the configured {roles} roles")]
    UnknownRole {
        /// The offending role.
        role: Role,
        /// Number of roles the runtime was configured with.
        roles: usize,
    },

    /// [`Runtime::run`](crate::Runtime::run) was called more than once.
    #[error("runtime has already been started")]
    AlreadyStarted,

    /// The OS refused to start a runner thread.
    #[error("failed to spawn thread for role {role}: {source}")]
    Spawn {
        /// The role whose thread could not be started.
        role: Role,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A task panicked on a runner thread, taking the thread down.
    #[error("task runner thread for role {role} panicked")]
    RunnerPanicked {
        /// The role whose thread panicked.
        role: Role,
    },

    /// Posting work required to start the runtime failed.
    #[error(transparent)]
    Post(#[from] PostError),

    /// Registering a built-in observer failed.
    #[error(transparent)]
    Register(#[from] RegisterError),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::UnknownRole { .. } => "runtime_unknown_role",
            RuntimeError::AlreadyStarted => "runtime_already_started",
            RuntimeError::Spawn { .. } => "runtime_spawn_failed",
            RuntimeError::RunnerPanicked { .. } => "runtime_runner_panicked",
            RuntimeError::Post(err) => err.as_label(),
            RuntimeError::Register(err) => err.as_label(),
        }
    }
}

/// Errors returned by [`EventBus::register`](crate::EventBus::register).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// The same observer instance is already registered or pending.
    #[error("observer is already registered on this bus")]
    Duplicate,

    /// The registration could not be posted to the bus thread.
    #[error(transparent)]
    Post(#[from] PostError),
}

impl RegisterError {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegisterError::Duplicate => "register_duplicate",
            RegisterError::Post(err) => err.as_label(),
        }
    }
}
