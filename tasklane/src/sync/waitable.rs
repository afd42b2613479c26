use crate::time::{TimeDelta, TimeTicks};

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// A signal that parks threads until it is raised.
///
/// `WaitableEvent` carries no payload and does not queue signals:
/// [`signal`](Self::signal) wakes at most one thread currently blocked in
/// one of the wait methods, and is a no-op otherwise.
///
/// Waits may also return spuriously; callers re-check their own
/// condition after every wake-up.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use tasklane::sync::WaitableEvent;
/// use tasklane::time::TimeDelta;
///
/// let event = Arc::new(WaitableEvent::new());
///
/// // Nobody signals: the wait times out.
/// assert!(!event.timed_wait(TimeDelta::from_milliseconds(1)));
///
/// let guard = event.lock();
/// let signaller = {
///     let event = event.clone();
///     thread::spawn(move || event.signal())
/// };
/// guard.wait();
/// signaller.join().unwrap();
/// ```
#[derive(Default)]
pub struct WaitableEvent {
    /// Mutex paired with `condvar`; guards no data, only the wait/signal
    /// handshake.
    mutex: Mutex<()>,

    /// Condition variable used to park and wake waiters.
    condvar: Condvar,
}

impl WaitableEvent {
    /// Creates a new event with no waiters.
    pub fn new() -> Self {
        Self {
            mutex: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    /// Wakes the next waiter, if any.
    pub fn signal(&self) {
        let _guard = self.acquire();
        self.condvar.notify_one();
    }

    /// Blocks the current thread until the next signal.
    pub fn wait(&self) {
        self.lock().wait();
    }

    /// Blocks until signalled or until `delta` has elapsed.
    ///
    /// Returns `true` if woken by a signal and `false` on timeout. A
    /// non-positive `delta` returns `false` immediately.
    pub fn timed_wait(&self, delta: TimeDelta) -> bool {
        self.lock().timed_wait(delta)
    }

    /// Blocks until signalled or until `end_time` is reached.
    ///
    /// An `end_time` that is not in the future returns `false`
    /// immediately.
    pub fn timed_wait_until(&self, end_time: TimeTicks) -> bool {
        self.lock().timed_wait_until(end_time)
    }

    /// Locks the event so the caller can check its wake condition before
    /// waiting.
    ///
    /// While the returned guard is alive, [`signal`](Self::signal) blocks,
    /// so no signal can slip in between the check and the wait.
    pub fn lock(&self) -> WaitGuard<'_> {
        WaitGuard {
            event: self,
            guard: self.acquire(),
        }
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A locked [`WaitableEvent`], ready to wait.
///
/// Dropping the guard without waiting simply releases the lock.
pub struct WaitGuard<'a> {
    event: &'a WaitableEvent,
    guard: MutexGuard<'a, ()>,
}

impl WaitGuard<'_> {
    /// Releases the lock and blocks until the next signal.
    pub fn wait(self) {
        let _guard = self
            .event
            .condvar
            .wait(self.guard)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Releases the lock and blocks until signalled or until `delta` has
    /// elapsed. Returns `true` if woken by a signal.
    pub fn timed_wait(self, delta: TimeDelta) -> bool {
        let Some(timeout) = delta.to_std().filter(|d| !d.is_zero()) else {
            return false;
        };

        let (_guard, result) = self
            .event
            .condvar
            .wait_timeout(self.guard, timeout)
            .unwrap_or_else(PoisonError::into_inner);

        !result.timed_out()
    }

    /// Releases the lock and blocks until signalled or until `end_time`
    /// is reached. Returns `true` if woken by a signal.
    pub fn timed_wait_until(self, end_time: TimeTicks) -> bool {
        let remaining = end_time - TimeTicks::now();
        self.timed_wait(remaining)
    }
}
