use std::fmt;

/// Stable numeric identifier of one event type.
///
/// Tags are assigned sequentially by [`events!`](crate::events) in
/// declaration order. Tag `0` is reserved for the stop event.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(u32);

impl Tag {
    /// Tag of the reserved, zero-argument stop event.
    pub const STOP: Tag = Tag(0);

    pub const fn new(value: u32) -> Self {
        Tag(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

/// A set of events that can travel over an [`EventBus`](crate::EventBus).
///
/// Implementors are closed enums, one variant per event type, each
/// variant carrying its own fixed parameter tuple. The
/// [`events!`](crate::events) macro generates both the enum and this
/// implementation; writing it by hand is possible but rarely needed.
///
/// Every event set contains the reserved stop event (tag [`Tag::STOP`]),
/// which [`Bootstrap`](crate::Bootstrap) handles by stopping all task
/// runners.
pub trait Event: Send + 'static {
    /// Returns the tag of this event's variant.
    fn tag(&self) -> Tag;

    /// Returns the name of this event's variant.
    fn name(&self) -> &'static str;

    /// Constructs the reserved stop event.
    fn stop() -> Self
    where
        Self: Sized;

    /// Returns `true` for the reserved stop event.
    fn is_stop(&self) -> bool {
        self.tag() == Tag::STOP
    }
}
