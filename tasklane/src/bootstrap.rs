//! Application lifecycle.
//!
//! [`Bootstrap`] wires a [`Runtime`] and an [`EventBus`] together, hands
//! the bus to the application once the runners are live, and keeps the
//! calling thread busy until the application fires the stop event.
//!
//! ```text
//! Bootstrap::run(app)
//!   build runtime ─► create bus ─► register shutdown observer
//!        │
//!        ▼
//!   Runtime::run ─► app.on_start(&bus) on the primary role
//!        │               ...
//!        │          bus.fire(E::stop()) ─► shutdown observer ─► stop_all
//!        ▼
//!   release every observer ─► drop bus
//! ```

use crate::bus::{Event, EventBus, Observer};
use crate::error::RuntimeError;
use crate::runtime::{Handle, RuntimeBuilder};

use std::marker::PhantomData;
use std::sync::Arc;

/// Entry point of an application driven by [`Bootstrap`].
///
/// Any `FnOnce(&EventBus<E>) + Send + 'static` closure is an
/// `Application`.
pub trait Application<E: Event>: Send + 'static {
    /// Called once on the primary role's thread after every runner has
    /// been created. Register observers and fire the first events here.
    fn on_start(self, bus: &EventBus<E>);
}

impl<E, F> Application<E> for F
where
    E: Event,
    F: FnOnce(&EventBus<E>) + Send + 'static,
{
    fn on_start(self, bus: &EventBus<E>) {
        self(bus)
    }
}

/// Runs an [`Application`] until it fires the stop event.
///
/// The bus lives on the runtime's primary role, so
/// [`EventBus::unregister`] may be called from any task on the calling
/// thread.
///
/// # Examples
///
/// ```rust
/// use tasklane::{Bootstrap, Event, EventBus};
///
/// tasklane::events! {
///     pub enum AppEvent {
///         Ready,
///     }
/// }
///
/// Bootstrap::new()
///     .run(|bus: &EventBus<AppEvent>| {
///         bus.fire(AppEvent::Ready).unwrap();
///         bus.fire(AppEvent::stop()).unwrap();
///     })
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    builder: RuntimeBuilder,
}

impl Bootstrap {
    /// Creates a bootstrap with the default runtime configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bootstrap that builds its runtime from `builder`.
    pub fn with_builder(builder: RuntimeBuilder) -> Self {
        Self { builder }
    }

    /// Builds the runtime, starts `app` and blocks until the stop event
    /// has been handled and every runner has returned.
    ///
    /// # Errors
    ///
    /// Any [`RuntimeError`] from building or running the runtime.
    pub fn run<E, A>(self, app: A) -> Result<(), RuntimeError>
    where
        E: Event,
        A: Application<E>,
    {
        let runtime = self.builder.build()?;
        let handle = runtime.handle().clone();

        let bus = EventBus::with_role(handle.clone(), handle.primary_role());
        bus.register(Arc::new(Shutdown::<E>::new(handle)))?;

        let app_bus = bus.clone();
        let result = runtime.run(move || app.on_start(&app_bus));

        // Releases the shutdown observer and any observer holding a bus clone.
        bus.clear();

        result
    }
}

/// Stops every runner when the stop event reaches it.
struct Shutdown<E> {
    handle: Handle,
    _event: PhantomData<fn(&E)>,
}

impl<E> Shutdown<E> {
    fn new(handle: Handle) -> Self {
        Self {
            handle,
            _event: PhantomData,
        }
    }
}

impl<E: Event> Observer<E> for Shutdown<E> {
    fn on_event(&self, event: &E) -> bool {
        if !event.is_stop() {
            return false;
        }

        self.handle.stop_all();
        true
    }
}
