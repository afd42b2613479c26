use super::event::Event;
use super::observer::{Observer, ObserverId};

use std::collections::HashMap;
use std::sync::Arc;

/// A registered observer.
struct Slot<E: Event> {
    id: ObserverId,
    observer: Arc<dyn Observer<E>>,
}

/// Ordered list of observers that tolerates removal during iteration.
///
/// Removing an observer leaves a tombstone in its slot so that indices
/// held by an in-progress dispatch pass stay valid. Tombstones are
/// reclaimed by [`compact`](Self::compact), which the bus calls only
/// between passes.
///
/// Registrations are two-phase: [`reserve`](Self::reserve) records the
/// id on the caller's thread, [`insert`](Self::insert) makes it live on
/// the bus thread. Removing a reserved id cancels the registration.
///
/// An observer instance is live or reserved under at most one id.
pub(crate) struct ObserverList<E: Event> {
    /// Observers in registration order; `None` is a tombstone.
    slots: Vec<Option<Slot<E>>>,
    /// Ids reserved but not inserted yet, with the address of their
    /// observer.
    pending: HashMap<ObserverId, usize>,
    /// Number of `None` entries in `slots`.
    tombstones: usize,
}

impl<E: Event> ObserverList<E> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            pending: HashMap::new(),
            tombstones: 0,
        }
    }

    /// Records `id` as an upcoming registration of `observer`.
    ///
    /// Returns `false` and reserves nothing if the same instance is
    /// already live or reserved.
    pub(crate) fn reserve(&mut self, id: ObserverId, observer: &Arc<dyn Observer<E>>) -> bool {
        let addr = address(observer);
        let taken = self.pending.values().any(|&pending| pending == addr)
            || self.live().any(|slot| address(&slot.observer) == addr);
        if taken {
            return false;
        }

        self.pending.insert(id, addr);
        true
    }

    /// Makes a reserved registration live at the end of the list.
    ///
    /// Returns `false` if the registration was canceled in the meantime.
    pub(crate) fn insert(&mut self, id: ObserverId, observer: Arc<dyn Observer<E>>) -> bool {
        if self.pending.remove(&id).is_none() {
            return false;
        }

        self.slots.push(Some(Slot { id, observer }));
        true
    }

    /// Removes a live or reserved observer.
    ///
    /// Returns `false` if `id` is unknown or was already removed.
    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        if self.pending.remove(&id).is_some() {
            return true;
        }

        let found = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|s| s.id == id));

        match found {
            Some(slot) => {
                *slot = None;
                self.tombstones += 1;
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `id` is live or reserved.
    pub(crate) fn contains(&self, id: ObserverId) -> bool {
        self.pending.contains_key(&id) || self.live().any(|slot| slot.id == id)
    }

    /// Number of live observers.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.tombstones
    }

    /// Number of slots, tombstones included.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the observer at `index`, or `None` for a tombstone or an
    /// index past the end.
    pub(crate) fn get(&self, index: usize) -> Option<Arc<dyn Observer<E>>> {
        self.slots
            .get(index)?
            .as_ref()
            .map(|slot| Arc::clone(&slot.observer))
    }

    /// Drops every tombstone, preserving the order of live observers.
    pub(crate) fn compact(&mut self) {
        if self.tombstones == 0 {
            return;
        }

        self.slots.retain(Option::is_some);
        self.tombstones = 0;
    }

    /// Removes every observer and reservation.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.pending.clear();
        self.tombstones = 0;
    }

    fn live(&self) -> impl Iterator<Item = &Slot<E>> {
        self.slots.iter().flatten()
    }
}

/// Identity of an observer instance, ignoring the vtable.
fn address<E: Event>(observer: &Arc<dyn Observer<E>>) -> usize {
    Arc::as_ptr(observer) as *const () as usize
}
