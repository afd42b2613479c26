#![cfg(feature = "logging")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tasklane::{EventBus, LogWriter, Observer, Role, Runtime};

tasklane::events! {
    pub enum TraceEvent {
        Hello(String),
    }
}

struct Count(AtomicUsize);

impl Observer<TraceEvent> for Count {
    fn on_event(&self, _event: &TraceEvent) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst);
        true
    }
}

#[test]
fn test_log_writer_never_handles_events() {
    let runtime = Runtime::builder().build().unwrap();
    let handle = runtime.handle().clone();
    let bus = EventBus::new(handle.clone());
    let count = Arc::new(Count(AtomicUsize::new(0)));

    bus.register(Arc::new(LogWriter::new())).unwrap();
    bus.register(count.clone()).unwrap();
    bus.fire(TraceEvent::Hello("world".to_owned())).unwrap();

    let stopper = handle.clone();
    handle
        .post_task(Role::EVENT, move || stopper.stop_all())
        .unwrap();
    runtime.run(|| {}).unwrap();

    assert_eq!(count.0.load(Ordering::SeqCst), 1);
}
