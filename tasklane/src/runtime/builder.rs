use super::Runtime;
use super::role::Role;
use crate::error::RuntimeError;

/// Default number of roles: [`Role::EVENT`] and [`Role::IO`].
const DEFAULT_ROLES: usize = 2;

/// Default prefix for runner thread names.
const DEFAULT_THREAD_NAME: &str = "tasklane";

/// Builder for configuring and creating a runtime.
///
/// `RuntimeBuilder` allows customizing runtime parameters before
/// constructing the runtime: how many roles (and therefore runner
/// threads) exist, which role runs on the calling thread, and how runner
/// threads are named.
///
/// # Examples
///
/// ```rust
/// use tasklane::{Role, RuntimeBuilder};
///
/// let runtime = RuntimeBuilder::new()
///     .roles(3)
///     .thread_name("app")
///     .build()
///     .unwrap();
///
/// assert_eq!(runtime.handle().roles().count(), 3);
/// assert_eq!(runtime.handle().primary_role(), Role::EVENT);
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeBuilder {
    /// Number of roles in the runtime.
    roles: usize,

    /// Role driven by the thread calling [`Runtime::run`].
    primary: Role,

    /// Prefix for runner thread names.
    thread_name: String,
}

impl RuntimeBuilder {
    /// Creates a new `RuntimeBuilder` with default configuration.
    ///
    /// By default the runtime has two roles, [`Role::EVENT`] and
    /// [`Role::IO`], and [`Role::EVENT`] is the primary role.
    pub fn new() -> Self {
        Self {
            roles: DEFAULT_ROLES,
            primary: Role::EVENT,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }

    /// Sets the number of roles. Roles are numbered `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn roles(mut self, n: usize) -> Self {
        assert!(n > 0, "roles must be > 0");

        self.roles = n;
        self
    }

    /// Sets the role whose loop runs on the thread calling
    /// [`Runtime::run`].
    pub fn primary(mut self, role: Role) -> Self {
        self.primary = role;
        self
    }

    /// Sets the prefix of runner thread names.
    ///
    /// A runner thread is named `"<prefix>-<role>"`, e.g. `"tasklane-io"`.
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    /// Builds the runtime with the configured options.
    ///
    /// All runners are constructed and accept posts from this point on.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownRole`] if the primary role is not
    /// one of the configured roles.
    pub fn build(self) -> Result<Runtime, RuntimeError> {
        if self.primary.index() >= self.roles {
            return Err(RuntimeError::UnknownRole {
                role: self.primary,
                roles: self.roles,
            });
        }

        Ok(Runtime::new(self.roles, self.primary, self.thread_name))
    }
}

impl Default for RuntimeBuilder {
    /// Creates a default `RuntimeBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
