use std::sync::{Arc, Mutex};
use std::thread;
use tasklane::{Role, RuntimeBuilder, RuntimeError};

#[test]
fn test_default_configuration() {
    let runtime = RuntimeBuilder::new().build().unwrap();
    let handle = runtime.handle();

    assert_eq!(handle.primary_role(), Role::EVENT);
    assert_eq!(handle.roles().collect::<Vec<_>>(), vec![Role::EVENT, Role::IO]);
    assert!(handle.is_running(Role::EVENT));
    assert!(handle.is_running(Role::IO));
}

#[test]
#[should_panic(expected = "roles must be > 0")]
fn test_zero_roles_panics() {
    let _ = RuntimeBuilder::new().roles(0);
}

#[test]
fn test_primary_outside_role_set_fails() {
    let err = RuntimeBuilder::new()
        .roles(2)
        .primary(Role::new(3))
        .build()
        .unwrap_err();

    assert!(
        matches!(err, RuntimeError::UnknownRole { role, roles: 2 } if role == Role::new(3)),
        "Unexpected error: {err:?}"
    );
    assert_eq!(err.to_string(), "role role-3 is outside the configured 2 roles");
}

#[test]
fn test_extra_roles_get_named_threads() {
    let runtime = RuntimeBuilder::new()
        .roles(3)
        .thread_name("app")
        .build()
        .unwrap();
    let handle = runtime.handle().clone();
    let names = Arc::new(Mutex::new(Vec::new()));

    let names_clone = names.clone();
    runtime
        .run(move || {
            for role in [Role::IO, Role::new(2)] {
                let names = names_clone.clone();
                let stopper = handle.clone();
                handle
                    .post_task(role, move || {
                        let mut names = names.lock().unwrap();
                        names.push(thread::current().name().map(str::to_owned));
                        if names.len() == 2 {
                            stopper.stop_all();
                        }
                    })
                    .unwrap();
            }
        })
        .unwrap();

    let mut names = names.lock().unwrap().clone();
    names.sort();
    assert_eq!(
        names,
        vec![Some("app-io".to_owned()), Some("app-role-2".to_owned())]
    );
}

#[test]
fn test_io_as_primary_role() {
    let runtime = RuntimeBuilder::new().primary(Role::IO).build().unwrap();
    let handle = runtime.handle().clone();
    let seen = Arc::new(Mutex::new(None));

    let seen_clone = seen.clone();
    runtime
        .run(move || {
            assert!(handle.currently_on(Role::IO));

            let on_event = handle.clone();
            handle
                .post_task(Role::EVENT, move || {
                    *seen_clone.lock().unwrap() = thread::current().name().map(str::to_owned);
                    on_event.stop_all();
                })
                .unwrap();
        })
        .unwrap();

    assert_eq!(seen.lock().unwrap().as_deref(), Some("tasklane-event"));
}
