use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use tasklane::{Bootstrap, Event, EventBus, Observer, Role, RuntimeBuilder, RuntimeError};

tasklane::events! {
    #[derive(Debug)]
    pub enum AppEvent {
        Work(usize),
    }
}

struct Worker {
    bus: EventBus<AppEvent>,
    done: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
}

impl AppEventHandler for Worker {
    fn on_work(&self, n: &usize) -> bool {
        self.done.fetch_add(1, Ordering::SeqCst);
        if *n == 0 {
            self.bus.fire(AppEvent::stop()).unwrap();
        } else {
            self.bus.fire(AppEvent::Work(n - 1)).unwrap();
        }
        true
    }

    fn on_stop(&self) -> bool {
        self.stops.fetch_add(1, Ordering::SeqCst);
        false
    }
}

impl Observer<AppEvent> for Worker {
    fn on_event(&self, event: &AppEvent) -> bool {
        event.dispatch(self)
    }
}

#[test]
fn test_run_until_stop_event() {
    let done = Arc::new(AtomicUsize::new(0));
    let stops = Arc::new(AtomicUsize::new(0));

    let (done_clone, stops_clone) = (done.clone(), stops.clone());
    Bootstrap::new()
        .run(move |bus: &EventBus<AppEvent>| {
            let worker = Worker {
                bus: bus.clone(),
                done: done_clone,
                stops: stops_clone,
            };
            bus.register(Arc::new(worker)).unwrap();
            bus.fire(AppEvent::Work(5)).unwrap();
        })
        .unwrap();

    assert_eq!(done.load(Ordering::SeqCst), 6);
    assert_eq!(
        stops.load(Ordering::SeqCst),
        0,
        "The stop event is consumed by the lifecycle wrapper"
    );
}

#[test]
fn test_application_starts_on_primary_role() {
    let role = Arc::new(Mutex::new(None));

    let role_clone = role.clone();
    Bootstrap::with_builder(RuntimeBuilder::new().roles(3).primary(Role::IO))
        .run(move |bus: &EventBus<AppEvent>| {
            *role_clone.lock().unwrap() = Role::current();
            assert_eq!(bus.role(), Role::IO);

            let stopper = bus.clone();
            bus.handle()
                .post_task(Role::new(2), move || {
                    stopper.fire(AppEvent::stop()).unwrap();
                })
                .unwrap();
        })
        .unwrap();

    assert_eq!(*role.lock().unwrap(), Some(Role::IO));
}

#[test]
fn test_invalid_configuration_is_reported() {
    let started = Arc::new(AtomicUsize::new(0));

    let started_clone = started.clone();
    let result = Bootstrap::with_builder(RuntimeBuilder::new().primary(Role::new(7))).run(
        move |_bus: &EventBus<AppEvent>| {
            started_clone.fetch_add(1, Ordering::SeqCst);
        },
    );

    assert_eq!(started.load(Ordering::SeqCst), 0, "Application must not start");
    let err = result.unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownRole { .. }));
    assert_eq!(err.as_label(), "runtime_unknown_role");
}

#[test]
fn test_bus_is_released_after_run() {
    let bus_slot = Arc::new(Mutex::new(None));

    let slot = bus_slot.clone();
    Bootstrap::new()
        .run(move |bus: &EventBus<AppEvent>| {
            *slot.lock().unwrap() = Some(bus.clone());
            bus.fire(AppEvent::stop()).unwrap();
        })
        .unwrap();

    let bus = bus_slot.lock().unwrap().take().expect("bus should be stored");
    assert_eq!(bus.observer_count(), 0, "Observers are released on exit");
    assert!(bus.fire(AppEvent::Work(1)).is_err());
}
