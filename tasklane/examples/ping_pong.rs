//! Example: Two events bouncing off one listener until a delayed stop

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tasklane::{Bootstrap, Event, EventBus, Observer, Role, TimeDelta, TimeTicks};

tasklane::events! {
    #[derive(Debug)]
    pub enum DemoEvent {
        Ping(i32, i32),
        Pong(f32, i32),
    }
}

struct Listener {
    bus: EventBus<DemoEvent>,
    count: AtomicUsize,
}

impl DemoEventHandler for Listener {
    fn on_ping(&self, _x: &i32, _y: &i32) -> bool {
        println!("{:?} ping, fire pong", TimeTicks::now());
        self.count.fetch_add(1, Ordering::Relaxed);
        self.bus.fire(DemoEvent::Pong(3.2, 1)).is_ok()
    }

    fn on_pong(&self, _x: &f32, _y: &i32) -> bool {
        println!("{:?} pong, fire ping", TimeTicks::now());
        self.count.fetch_add(1, Ordering::Relaxed);
        self.bus.fire(DemoEvent::Ping(3, 1)).is_ok()
    }
}

impl Observer<DemoEvent> for Listener {
    fn on_event(&self, event: &DemoEvent) -> bool {
        event.dispatch(self)
    }
}

fn main() {
    let result = Bootstrap::new().run(|bus: &EventBus<DemoEvent>| {
        let listener = Arc::new(Listener {
            bus: bus.clone(),
            count: AtomicUsize::new(0),
        });
        let id = bus.register(listener.clone()).unwrap();
        bus.fire(DemoEvent::Pong(3.2, 1)).unwrap();

        // Quit after one second
        let bus = bus.clone();
        let handle = bus.handle().clone();
        handle
            .post_delayed_task(
                Role::EVENT,
                move || {
                    bus.unregister(id);
                    println!("{} events handled", listener.count.load(Ordering::Relaxed));
                    bus.fire(DemoEvent::stop()).unwrap();
                },
                TimeDelta::from_seconds(1),
            )
            .unwrap();
    });

    if let Err(err) = result {
        eprintln!("runtime failed: {err}");
    }
}
