//! Example: Posting immediate and delayed tasks across roles

use tasklane::{Role, Runtime, TimeDelta};

fn main() {
    let runtime = Runtime::builder().thread_name("demo").build().unwrap();
    let handle = runtime.handle().clone();

    runtime
        .run(move || {
            for ms in [300, 100, 200] {
                handle
                    .post_delayed_task(
                        Role::IO,
                        move || println!("io: {ms} ms task"),
                        TimeDelta::from_milliseconds(ms),
                    )
                    .unwrap();
            }

            handle
                .post_task(Role::IO, || println!("io: immediate task"))
                .unwrap();

            // Stop everything once the last delayed task has run
            let stopper = handle.clone();
            handle
                .post_delayed_task(
                    Role::EVENT,
                    move || stopper.stop_all(),
                    TimeDelta::from_milliseconds(400),
                )
                .unwrap();
        })
        .unwrap();

    println!("all runners stopped");
}
