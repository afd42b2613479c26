use super::context;

use std::fmt;

/// Logical identity of one thread-bound task runner.
///
/// A runtime owns exactly one runner per role. The two well-known roles
/// are [`Role::EVENT`], the primary role driven by the thread that calls
/// [`Runtime::run`](crate::Runtime::run) and the home of the event bus,
/// and [`Role::IO`], for blocking file, IPC, and network work. Runtimes
/// configured with more roles address them with [`Role::new`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(usize);

impl Role {
    /// The main thread. Hosts the event bus.
    pub const EVENT: Role = Role(0);

    /// Thread for IO work, i.e. file, IPC and network.
    pub const IO: Role = Role(1);

    /// Creates the role with the given index.
    pub const fn new(index: usize) -> Self {
        Role(index)
    }

    /// Returns the role index.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns the role of the runner driving the calling thread, or
    /// `None` outside of any runner.
    pub fn current() -> Option<Role> {
        context::current_role()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Role::EVENT => f.write_str("event"),
            Role::IO => f.write_str("io"),
            Role(index) => write!(f, "role-{index}"),
        }
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Role({self})")
    }
}
