use super::pending::{Callback, PendingTask};
use crate::time::TimeTicks;

use std::collections::VecDeque;
use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// FIFO queue of tasks in transit to a runner thread.
pub(crate) type TaskQueue = VecDeque<PendingTask>;

/// The cross-thread entry point of a task runner.
///
/// Any thread may push into the incoming queue; only the runner thread
/// takes tasks out, and it does so by swapping the whole queue with its
/// (empty) triage queue. The lock is therefore held only for one push or
/// one swap, never while a task runs.
pub(crate) struct IncomingQueue {
    inner: Mutex<Incoming>,
}

struct Incoming {
    /// Tasks posted since the runner last drained the queue.
    tasks: TaskQueue,

    /// Sequence number handed to the next posted task.
    next_sequence_num: u64,

    /// Cleared once the runner stops; later posts are rejected.
    accepting: bool,
}

impl IncomingQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Incoming {
                tasks: VecDeque::new(),
                next_sequence_num: 0,
                accepting: true,
            }),
        }
    }

    /// Enqueues a task, assigning its sequence number under the lock.
    ///
    /// Returns the callback back to the caller if the queue has been
    /// closed.
    pub(crate) fn push(&self, callback: Callback, run_time: TimeTicks) -> Result<(), Callback> {
        let mut inner = self.lock();
        if !inner.accepting {
            return Err(callback);
        }

        let sequence_num = inner.next_sequence_num;
        inner.next_sequence_num += 1;
        inner
            .tasks
            .push_back(PendingTask::new(callback, sequence_num, run_time));

        Ok(())
    }

    /// Moves every queued task into `triage`, which must be empty.
    pub(crate) fn swap_into(&self, triage: &mut TaskQueue) {
        debug_assert!(triage.is_empty(), "triage queue must be drained first");

        mem::swap(&mut self.lock().tasks, triage);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    /// Stops accepting tasks and returns the ones still queued.
    ///
    /// The returned tasks are never run; the caller drops them outside
    /// the lock.
    pub(crate) fn close(&self) -> TaskQueue {
        let mut inner = self.lock();
        inner.accepting = false;
        mem::take(&mut inner.tasks)
    }

    pub(crate) fn is_accepting(&self) -> bool {
        self.lock().accepting
    }

    fn lock(&self) -> MutexGuard<'_, Incoming> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
