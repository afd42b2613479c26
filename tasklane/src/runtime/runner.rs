use super::incoming::{IncomingQueue, TaskQueue};
use super::pending::{Callback, PendingTask};
use super::role::Role;
use crate::error::PostError;
use crate::sync::WaitableEvent;
use crate::time::{TimeDelta, TimeTicks};

use std::collections::BinaryHeap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ThreadId};

/// A single-threaded task runner bound to one role.
///
/// A `TaskRunner` executes posted tasks one at a time on the thread it
/// is bound to. Tasks may be posted from any thread.
///
/// The execution order of one loop iteration is:
/// 1. Refill the triage queue from the incoming queue if it is empty
/// 2. Run one immediate task, or move one future task to the delayed heap
/// 3. Run the earliest delayed task if it is due
/// 4. Park until a new post, the next deadline, or a stop request
pub(crate) struct TaskRunner {
    /// Role this runner serves.
    role: Role,

    /// Tasks posted from any thread, waiting to be triaged.
    incoming: IncomingQueue,

    /// Cleared by [`stop`](Self::stop); checked after every loop phase.
    keep_running: AtomicBool,

    /// Thread the runner is bound to. Set once by [`run`](Self::run).
    thread_id: OnceLock<ThreadId>,

    /// Used to sleep until there is more work to do.
    event: WaitableEvent,
}

/// Stops the runner when its loop returns or unwinds.
struct StopOnExit<'a>(&'a TaskRunner);

impl Drop for StopOnExit<'_> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Loop state only ever touched by the bound thread.
#[derive(Default)]
struct LoopState {
    /// Tasks taken from the incoming queue, in post order.
    triage: TaskQueue,

    /// Tasks whose run time lies in the future.
    delayed: BinaryHeap<PendingTask>,

    /// Deadline of the earliest delayed task, or null if there is none.
    delayed_work_time: TimeTicks,

    /// A recent sample of the clock, used to skip clock reads while the
    /// earliest deadline is known to be ahead of it.
    recent_time: TimeTicks,
}

impl TaskRunner {
    /// Creates a runner for `role`. It accepts posts immediately but runs
    /// nothing until [`run`](Self::run) is called.
    pub(crate) fn new(role: Role) -> Self {
        Self {
            role,
            incoming: IncomingQueue::new(),
            keep_running: AtomicBool::new(true),
            thread_id: OnceLock::new(),
            event: WaitableEvent::new(),
        }
    }

    pub(crate) fn role(&self) -> Role {
        self.role
    }

    /// Queues `callback` to run after `delay`.
    ///
    /// A non-positive `delay` queues the task for immediate execution.
    pub(crate) fn post(&self, callback: Callback, delay: TimeDelta) -> Result<(), PostError> {
        let run_time = if delay.is_positive() {
            TimeTicks::now() + delay
        } else {
            TimeTicks::null()
        };

        if self.incoming.push(callback, run_time).is_err() {
            return Err(PostError::Stopped { role: self.role });
        }

        self.event.signal();
        Ok(())
    }

    /// Returns `true` if called from the thread this runner is bound to.
    pub(crate) fn runs_tasks_in_current_thread(&self) -> bool {
        self.thread_id.get() == Some(&thread::current().id())
    }

    /// Returns `true` until the runner has been stopped.
    pub(crate) fn is_accepting(&self) -> bool {
        self.incoming.is_accepting()
    }

    /// Stops the runner after the task it is currently running.
    ///
    /// Later posts are rejected and tasks still in the incoming queue are
    /// dropped without running.
    pub(crate) fn stop(&self) {
        let dropped = self.incoming.close();
        self.keep_running.store(false, Ordering::Release);
        self.event.signal();

        drop(dropped);
    }

    /// Binds the runner to the current thread and runs its loop until
    /// [`stop`](Self::stop) is called.
    ///
    /// The runner is stopped on the way out, including when a task
    /// panics, so later posts to this role fail instead of queueing work
    /// nobody will run.
    pub(crate) fn run(&self) {
        self.bind_to_current_thread();
        let _stop = StopOnExit(self);

        let mut state = LoopState::default();

        while self.keep_running() {
            let mut did_work = self.do_work(&mut state);
            if !self.keep_running() {
                break;
            }

            did_work |= self.do_delayed_work(&mut state);
            if !self.keep_running() {
                break;
            }

            if did_work {
                continue;
            }

            self.wait_for_work(&state);
        }
    }

    /// Records the calling thread as the runner's thread.
    ///
    /// `Runtime::run` starts each loop once, so the runner is never bound
    /// twice.
    fn bind_to_current_thread(&self) {
        let current = thread::current().id();
        let bound = *self.thread_id.get_or_init(|| current);

        debug_assert_eq!(bound, current, "task runner bound to two threads");
    }

    fn keep_running(&self) -> bool {
        self.keep_running.load(Ordering::Acquire)
    }

    /// Runs one immediate task, or files one future task into the delayed
    /// heap. Returns `true` if a task was taken from the triage queue.
    fn do_work(&self, state: &mut LoopState) -> bool {
        if state.triage.is_empty() {
            self.incoming.swap_into(&mut state.triage);
        }

        let Some(task) = state.triage.pop_front() else {
            return false;
        };

        if task.run_time.is_null() {
            task.run();
        } else {
            let sequence_num = task.sequence_num;
            let run_time = task.run_time;
            state.delayed.push(task);

            // The new task may now be the earliest deadline.
            if state.delayed.peek().map(|t| t.sequence_num) == Some(sequence_num) {
                state.delayed_work_time = run_time;
            }
        }

        true
    }

    /// Runs the earliest delayed task if it is due. Returns `true` if a
    /// task ran.
    fn do_delayed_work(&self, state: &mut LoopState) -> bool {
        let Some(next_run_time) = state.delayed.peek().map(|t| t.run_time) else {
            return false;
        };

        if next_run_time > state.recent_time {
            state.recent_time = TimeTicks::now();
            if next_run_time > state.recent_time {
                state.delayed_work_time = next_run_time;
                return false;
            }
        }

        let Some(task) = state.delayed.pop() else {
            return false;
        };

        state.delayed_work_time = state
            .delayed
            .peek()
            .map_or(TimeTicks::null(), |t| t.run_time);

        task.run();
        true
    }

    /// Parks until a post, the next delayed deadline, or a stop request.
    ///
    /// The wake condition is checked with the event locked, so a post or
    /// stop landing after the check still wakes the wait.
    fn wait_for_work(&self, state: &LoopState) {
        let guard = self.event.lock();

        if !self.keep_running() || !state.triage.is_empty() || !self.incoming.is_empty() {
            return;
        }

        if state.delayed_work_time.is_null() {
            guard.wait();
        } else {
            guard.timed_wait_until(state.delayed_work_time);
        }
    }
}
