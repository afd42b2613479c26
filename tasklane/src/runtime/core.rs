use super::context::{self, enter_context};
use super::role::Role;
use super::runner::TaskRunner;
use crate::error::{PostError, RuntimeError};
use crate::time::TimeDelta;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// The set of task runners, one per role.
///
/// `Runtime` is responsible for:
/// - owning one [`TaskRunner`] per configured role,
/// - driving the primary role's loop on the calling thread,
/// - starting and joining one dedicated thread per other role,
/// - stopping every runner on shutdown.
///
/// Runners exist from construction onward, so work may be posted before
/// [`run`](Self::run) is called; it runs once the loops start.
///
/// Dropping the runtime stops every runner.
pub struct Runtime {
    handle: Handle,
}

/// A cheap, cloneable reference to a [`Runtime`].
///
/// Handles are `Send + Sync` and can be moved into tasks or other
/// threads to post work to any role.
#[derive(Clone)]
pub struct Handle {
    shared: Arc<Shared>,
}

struct Shared {
    /// Runners indexed by role.
    runners: Vec<TaskRunner>,

    /// Role whose loop runs on the thread calling `Runtime::run`.
    primary: Role,

    /// Prefix for the names of runner threads.
    thread_name: String,

    /// Set by the first call to `Runtime::run`.
    started: AtomicBool,
}

impl Runtime {
    /// Returns a builder with the default configuration.
    pub fn builder() -> super::builder::RuntimeBuilder {
        super::builder::RuntimeBuilder::new()
    }

    /// Creates a runtime instance.
    ///
    /// # Arguments
    ///
    /// * `roles` - Number of roles, and therefore runners.
    /// * `primary` - Role driven by the thread calling [`run`](Self::run).
    /// * `thread_name` - Prefix for the names of runner threads.
    pub(crate) fn new(roles: usize, primary: Role, thread_name: String) -> Self {
        let runners = (0..roles).map(|i| TaskRunner::new(Role::new(i))).collect();

        Self {
            handle: Handle {
                shared: Arc::new(Shared {
                    runners,
                    primary,
                    thread_name,
                    started: AtomicBool::new(false),
                }),
            },
        }
    }

    /// Returns a handle for posting work to this runtime.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Runs every role until [`stop_all`](Handle::stop_all) is called.
    ///
    /// `init` is posted to the primary role, one thread is started for
    /// every other role, and the primary role's loop then runs on the
    /// calling thread. Once it returns, the other threads are joined.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::AlreadyStarted`] on a second call,
    /// - [`RuntimeError::Post`] if the runtime was stopped before it ran,
    /// - [`RuntimeError::Spawn`] if a runner thread could not be started,
    /// - [`RuntimeError::RunnerPanicked`] if a task panicked on a
    ///   non-primary runner thread.
    ///
    /// # Panics
    ///
    /// A panic in a task on the primary role propagates out of `run`,
    /// after every other runner has been told to stop.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tasklane::{Role, Runtime};
    ///
    /// let runtime = Runtime::builder().build().unwrap();
    /// let handle = runtime.handle().clone();
    ///
    /// runtime
    ///     .run(move || {
    ///         let on_io = handle.clone();
    ///         handle
    ///             .post_task(Role::IO, move || on_io.stop_all())
    ///             .unwrap();
    ///     })
    ///     .unwrap();
    /// ```
    pub fn run<F>(&self, init: F) -> Result<(), RuntimeError>
    where
        F: FnOnce() + Send + 'static,
    {
        let shared = &self.handle.shared;
        if shared.started.swap(true, Ordering::AcqRel) {
            return Err(RuntimeError::AlreadyStarted);
        }

        let primary = shared.primary;
        self.handle.post_task(primary, init)?;

        let stop_guard = StopGuard(&self.handle);
        let mut threads = Vec::with_capacity(shared.runners.len().saturating_sub(1));

        for runner in shared.runners.iter().filter(|r| r.role() != primary) {
            let role = runner.role();
            let handle = self.handle.clone();

            let spawned = thread::Builder::new()
                .name(format!("{}-{}", shared.thread_name, role))
                .spawn(move || handle.run_runner(role));

            match spawned {
                Ok(join) => threads.push((role, join)),
                Err(source) => {
                    drop(stop_guard);
                    let _ = join_all(threads);
                    return Err(RuntimeError::Spawn { role, source });
                }
            }
        }

        self.handle.run_runner(primary);

        drop(stop_guard);
        join_all(threads)
    }

    /// Signals every runner to stop. See [`Handle::stop_all`].
    pub fn stop_all(&self) {
        self.handle.stop_all();
    }
}

impl Drop for Runtime {
    /// Stops every runner.
    ///
    /// Runner threads are only joined by [`Runtime::run`]; dropping a
    /// runtime that is still running from another thread merely asks its
    /// loops to return.
    fn drop(&mut self) {
        self.handle.stop_all();
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("handle", &self.handle)
            .finish()
    }
}

impl Handle {
    /// Returns the handle of the runtime driving the calling thread, or
    /// `None` when called outside of any runner.
    pub fn current() -> Option<Handle> {
        context::current_handle()
    }

    /// Posts `callback` for immediate execution on `role`'s thread.
    ///
    /// Tasks posted to the same role from the same thread run in the
    /// order they were posted.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::UnknownRole`] if the runtime has no such role
    /// and [`PostError::Stopped`] once the role's runner has stopped.
    pub fn post_task<F>(&self, role: Role, callback: F) -> Result<(), PostError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post_delayed_task(role, callback, TimeDelta::zero())
    }

    /// Posts `callback` to run on `role`'s thread against `target`,
    /// holding only a weak reference to it.
    ///
    /// If every strong reference to `target` is gone by the time the task
    /// runs, `callback` is dropped without being called.
    ///
    /// # Errors
    ///
    /// Same as [`post_task`](Self::post_task).
    pub fn post_task_weak<T, F>(
        &self,
        role: Role,
        target: &Arc<T>,
        callback: F,
    ) -> Result<(), PostError>
    where
        T: Send + Sync + 'static,
        F: FnOnce(&T) + Send + 'static,
    {
        let target = Arc::downgrade(target);
        self.post_task(role, move || {
            if let Some(target) = target.upgrade() {
                callback(&target);
            }
        })
    }

    /// Posts `callback` to run on `role`'s thread once `delay` has
    /// elapsed.
    ///
    /// Delayed tasks run in deadline order; tasks with equal deadlines run
    /// in post order. A non-positive `delay` is the same as
    /// [`post_task`](Self::post_task).
    ///
    /// # Errors
    ///
    /// Same as [`post_task`](Self::post_task).
    pub fn post_delayed_task<F>(
        &self,
        role: Role,
        callback: F,
        delay: TimeDelta,
    ) -> Result<(), PostError>
    where
        F: FnOnce() + Send + 'static,
    {
        let runner = self.runner(role).ok_or(PostError::UnknownRole { role })?;
        runner.post(Box::new(callback), delay)
    }

    /// Returns `true` if called from the thread running `role`'s loop.
    pub fn currently_on(&self, role: Role) -> bool {
        self.runner(role)
            .is_some_and(TaskRunner::runs_tasks_in_current_thread)
    }

    /// Returns `true` while `role`'s runner still accepts work.
    pub fn is_running(&self, role: Role) -> bool {
        self.runner(role).is_some_and(TaskRunner::is_accepting)
    }

    /// Signals every runner to stop after the task it is running.
    ///
    /// Idle runners wake immediately. Posts made afterwards fail with
    /// [`PostError::Stopped`], and queued tasks that have not started are
    /// dropped without running.
    pub fn stop_all(&self) {
        for runner in &self.shared.runners {
            runner.stop();
        }
    }

    /// Returns the role driven by the thread calling
    /// [`Runtime::run`].
    pub fn primary_role(&self) -> Role {
        self.shared.primary
    }

    /// Returns every role of this runtime, in index order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.shared.runners.iter().map(TaskRunner::role)
    }

    fn runner(&self, role: Role) -> Option<&TaskRunner> {
        self.shared.runners.get(role.index())
    }

    /// Runs `role`'s loop on the calling thread inside the runtime
    /// context.
    fn run_runner(&self, role: Role) {
        if let Some(runner) = self.runner(role) {
            enter_context(self.clone(), role, || runner.run());
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("roles", &self.shared.runners.len())
            .field("primary", &self.shared.primary)
            .finish_non_exhaustive()
    }
}

/// Stops every runner when dropped, including while unwinding out of the
/// primary loop.
struct StopGuard<'a>(&'a Handle);

impl Drop for StopGuard<'_> {
    fn drop(&mut self) {
        self.0.stop_all();
    }
}

/// Joins runner threads, reporting the first failure.
fn join_all(threads: Vec<(Role, JoinHandle<()>)>) -> Result<(), RuntimeError> {
    let mut result = Ok(());

    for (role, join) in threads {
        if join.join().is_err() && result.is_ok() {
            result = Err(RuntimeError::RunnerPanicked { role });
        }
    }

    result
}
