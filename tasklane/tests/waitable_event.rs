use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tasklane::sync::WaitableEvent;
use tasklane::{TimeDelta, TimeTicks};

/// Signals `event` every millisecond until `done` is set.
fn keep_signalling(event: Arc<WaitableEvent>, done: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !done.load(Ordering::SeqCst) {
            event.signal();
            thread::sleep(Duration::from_millis(1));
        }
    })
}

#[test]
fn test_timed_wait_times_out_without_signal() {
    let event = WaitableEvent::new();
    let start = Instant::now();

    assert!(!event.timed_wait(TimeDelta::from_milliseconds(20)));
    assert!(
        start.elapsed() >= Duration::from_millis(19),
        "Wait returned before its timeout"
    );
}

#[test]
fn test_timed_wait_returns_true_when_signalled() {
    let event = Arc::new(WaitableEvent::new());
    let done = Arc::new(AtomicBool::new(false));
    let signaller = keep_signalling(event.clone(), done.clone());

    let signalled = event.timed_wait(TimeDelta::from_seconds(10));

    done.store(true, Ordering::SeqCst);
    signaller.join().unwrap();

    assert!(signalled, "Wait should end on signal");
}

#[test]
fn test_timed_wait_until_past_returns_immediately() {
    let event = WaitableEvent::new();
    let past = TimeTicks::now() - TimeDelta::from_seconds(1);
    let start = Instant::now();

    assert!(!event.timed_wait_until(past));
    assert!(!event.timed_wait(TimeDelta::zero()));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_signal_without_waiter_is_not_queued() {
    let event = WaitableEvent::new();

    event.signal();

    assert!(
        !event.timed_wait(TimeDelta::from_milliseconds(10)),
        "Signals must not be remembered"
    );
}

#[test]
fn test_guard_wait_sees_signal_sent_after_check() {
    let event = Arc::new(WaitableEvent::new());

    let guard = event.lock();
    let signaller = {
        let event = event.clone();
        thread::spawn(move || event.signal())
    };

    assert!(guard.timed_wait(TimeDelta::from_seconds(10)));
    signaller.join().unwrap();
}
