use super::Handle;
use super::role::Role;

use std::cell::{Cell, RefCell};

thread_local! {
    /// Thread-local handle to the runtime driving this thread.
    ///
    /// This is set while a runner loop runs on the thread and allows
    /// tasks to post further work without explicit parameter passing.
    pub(crate) static CURRENT_HANDLE: RefCell<Option<Handle>> =
        const { RefCell::new(None) };

    /// Thread-local role of the runner driving this thread.
    pub(crate) static CURRENT_ROLE: Cell<Option<Role>> =
        const { Cell::new(None) };
}

/// Enters the runtime execution context for the current thread.
///
/// This function temporarily installs the runtime handle and the role of
/// the runner for the duration of the closure `f`. After the closure
/// completes, the previous context is restored.
///
/// # Arguments
///
/// * `handle` - Handle to the runtime owning the runner.
/// * `role` - Role of the runner about to run on this thread.
/// * `f` - Closure executed inside the runtime context.
pub(crate) fn enter_context<R>(handle: Handle, role: Role, f: impl FnOnce() -> R) -> R {
    let prev_handle = CURRENT_HANDLE.with(|h| h.replace(Some(handle)));
    let prev_role = CURRENT_ROLE.with(|r| r.replace(Some(role)));

    let out = f();

    CURRENT_ROLE.with(|r| r.set(prev_role));
    CURRENT_HANDLE.with(|h| h.replace(prev_handle));

    out
}

/// Returns a clone of the handle installed on this thread, if any.
pub(crate) fn current_handle() -> Option<Handle> {
    CURRENT_HANDLE.with(|h| h.borrow().clone())
}

pub(crate) fn current_role() -> Option<Role> {
    CURRENT_ROLE.with(Cell::get)
}
