use super::event::Event;
use super::list::ObserverList;
use super::observer::{Observer, ObserverId};
use crate::error::{PostError, RegisterError};
use crate::runtime::{Handle, Role};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Asynchronous, typed event bus.
///
/// `EventBus` is responsible for:
/// - keeping an ordered list of [`Observer`]s,
/// - queuing fired events onto its role's task runner,
/// - offering each event to the observers in registration order until
///   one of them reports it handled.
///
/// Every mutation of the observer list and every dispatch happens on the
/// bus role's thread ([`Role::EVENT`] by default), so observers never run
/// concurrently with each other. Events fired from the same thread are
/// dispatched in the order they were fired.
///
/// Cloning an `EventBus` is cheap and yields another reference to the
/// same bus.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tasklane::{Event, EventBus, Observer, Runtime};
///
/// tasklane::events! {
///     pub enum AppEvent {
///         Hello(String),
///     }
/// }
///
/// struct Greeter;
///
/// impl AppEventHandler for Greeter {
///     fn on_hello(&self, who: &String) -> bool {
///         println!("hello, {who}");
///         true
///     }
/// }
///
/// impl Observer<AppEvent> for Greeter {
///     fn on_event(&self, event: &AppEvent) -> bool {
///         event.dispatch(self)
///     }
/// }
///
/// let runtime = Runtime::builder().build().unwrap();
/// let bus = EventBus::new(runtime.handle().clone());
///
/// bus.register(Arc::new(Greeter)).unwrap();
/// bus.fire(AppEvent::Hello("bus".into())).unwrap();
///
/// assert_eq!(AppEvent::stop().tag(), AppEvent::STOP_TAG);
/// ```
pub struct EventBus<E: Event> {
    inner: Arc<Inner<E>>,
}

struct Inner<E: Event> {
    /// Runtime the bus posts to.
    handle: Handle,

    /// Role whose thread owns the observer list.
    role: Role,

    /// Registered observers.
    observers: Mutex<ObserverList<E>>,

    /// Source of registration ids.
    next_id: AtomicU64,
}

impl<E: Event> EventBus<E> {
    /// Creates a bus dispatching on [`Role::EVENT`].
    pub fn new(handle: Handle) -> Self {
        Self::with_role(handle, Role::EVENT)
    }

    /// Creates a bus dispatching on `role`.
    ///
    /// Posting to an unknown role fails at [`register`](Self::register)
    /// and [`fire`](Self::fire) time with [`PostError::UnknownRole`].
    pub fn with_role(handle: Handle, role: Role) -> Self {
        Self {
            inner: Arc::new(Inner {
                handle,
                role,
                observers: Mutex::new(ObserverList::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Returns the role whose thread dispatches events.
    pub fn role(&self) -> Role {
        self.inner.role
    }

    /// Returns the runtime handle the bus posts to.
    pub fn handle(&self) -> &Handle {
        &self.inner.handle
    }

    /// Registers `observer` at the end of the observer list.
    ///
    /// May be called from any thread. The observer becomes live once the
    /// bus thread processes the registration, so it sees every event
    /// fired after this call returns, provided the event is fired from
    /// the same thread.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::Duplicate`] if the same observer instance is
    ///   already registered or about to be,
    /// - [`RegisterError::Post`] if the bus role is unknown or stopped.
    pub fn register(&self, observer: Arc<dyn Observer<E>>) -> Result<ObserverId, RegisterError> {
        let id = ObserverId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        if !self.inner.lock().reserve(id, &observer) {
            return Err(RegisterError::Duplicate);
        }

        let inner = Arc::clone(&self.inner);
        let posted = self.inner.handle.post_task(self.inner.role, move || {
            inner.lock().insert(id, observer);
        });

        if let Err(err) = posted {
            self.inner.lock().remove(id);
            return Err(err.into());
        }

        Ok(id)
    }

    /// Removes the observer registered under `id`.
    ///
    /// Takes effect immediately: if called from an observer during a
    /// dispatch pass, the removed observer is skipped for the rest of that
    /// pass. Returns `false` if `id` is not registered.
    ///
    /// # Panics
    ///
    /// Panics if not called on the bus role's thread.
    pub fn unregister(&self, id: ObserverId) -> bool {
        assert!(
            self.inner.handle.currently_on(self.inner.role),
            "EventBus::unregister must be called on the {} thread",
            self.inner.role
        );

        self.inner.lock().remove(id)
    }

    /// Returns `true` if `id` is registered or about to be.
    pub fn is_registered(&self, id: ObserverId) -> bool {
        self.inner.lock().contains(id)
    }

    /// Returns the number of live observers.
    pub fn observer_count(&self) -> usize {
        self.inner.lock().len()
    }

    /// Queues `event` for dispatch on the bus thread and returns
    /// immediately.
    ///
    /// The event is owned by the queued task and dropped after the
    /// dispatch pass, whether or not an observer handled it.
    ///
    /// # Errors
    ///
    /// Returns a [`PostError`] if the bus role is unknown or stopped; the
    /// event is dropped in that case.
    pub fn fire(&self, event: E) -> Result<(), PostError> {
        let inner = Arc::clone(&self.inner);
        self.inner.handle.post_task(self.inner.role, move || {
            inner.dispatch(&event);
            drop(event);
        })
    }

    /// Drops every observer and pending registration.
    ///
    /// Observers that hold a clone of the bus keep it alive; call this
    /// once the runtime has finished to release them.
    pub(crate) fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<E: Event> Inner<E> {
    fn lock(&self) -> MutexGuard<'_, ObserverList<E>> {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Offers `event` to every observer in order until one handles it.
    ///
    /// The list lock is released while an observer runs, so observers may
    /// fire, register, or unregister.
    fn dispatch(&self, event: &E) -> bool {
        let len = {
            let mut list = self.lock();
            list.compact();
            list.slot_count()
        };

        for index in 0..len {
            let Some(observer) = self.lock().get(index) else {
                continue;
            };

            if observer.on_event(event) {
                return true;
            }
        }

        false
    }
}

impl<E: Event> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Event> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("role", &self.inner.role)
            .field("observers", &self.observer_count())
            .finish()
    }
}
