use super::TimeDelta;

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::sync::OnceLock;
use std::time::Instant;

/// Process-wide origin of the monotonic tick clock.
static BASE: OnceLock<Instant> = OnceLock::new();

/// A monotonic timestamp with microsecond resolution.
///
/// Ticks count microseconds since an arbitrary, process-wide origin.
/// The zero value is the *null* tick, meaning "no time set"; a task
/// whose run time is null runs immediately.
///
/// Adding a [`TimeDelta`] saturates: the result clamps to
/// [`TimeTicks::max`] / [`TimeTicks::min`] instead of wrapping, and
/// adding [`TimeDelta::max`] to any tick yields [`TimeTicks::max`].
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeTicks {
    /// Microseconds since the clock origin.
    micros: i64,
}

impl TimeTicks {
    /// Samples the monotonic clock.
    ///
    /// The returned tick is never null.
    pub fn now() -> Self {
        let base = *BASE.get_or_init(Instant::now);
        let elapsed = i64::try_from(base.elapsed().as_micros()).unwrap_or(i64::MAX);

        // Offset by one so the clock origin itself is not the null tick.
        Self {
            micros: elapsed.saturating_add(1),
        }
    }

    /// Returns the null tick.
    pub const fn null() -> Self {
        Self { micros: 0 }
    }

    /// Creates a tick from a raw microsecond count.
    pub const fn from_micros(micros: i64) -> Self {
        Self { micros }
    }

    pub const fn max() -> Self {
        Self { micros: i64::MAX }
    }

    pub const fn min() -> Self {
        Self { micros: i64::MIN }
    }

    pub const fn as_micros(self) -> i64 {
        self.micros
    }

    pub const fn is_null(self) -> bool {
        self.micros == 0
    }

    pub const fn is_max(self) -> bool {
        self.micros == i64::MAX
    }

    pub const fn is_min(self) -> bool {
        self.micros == i64::MIN
    }
}

impl Add<TimeDelta> for TimeTicks {
    type Output = TimeTicks;

    fn add(self, delta: TimeDelta) -> TimeTicks {
        if delta.is_max() {
            return TimeTicks::max();
        }
        if delta.is_min() {
            return TimeTicks::min();
        }

        TimeTicks {
            micros: self.micros.saturating_add(delta.as_micros()),
        }
    }
}

impl AddAssign<TimeDelta> for TimeTicks {
    fn add_assign(&mut self, delta: TimeDelta) {
        *self = *self + delta;
    }
}

impl Sub<TimeDelta> for TimeTicks {
    type Output = TimeTicks;

    fn sub(self, delta: TimeDelta) -> TimeTicks {
        self + -delta
    }
}

impl Sub for TimeTicks {
    type Output = TimeDelta;

    /// Returns the span between two ticks, saturating on overflow.
    fn sub(self, other: TimeTicks) -> TimeDelta {
        TimeDelta::from_microseconds(self.micros.saturating_sub(other.micros))
    }
}

impl fmt::Debug for TimeTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("TimeTicks(null)")
        } else {
            write!(f, "TimeTicks({}us)", self.micros)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_and_never_null() {
        let first = TimeTicks::now();
        let second = TimeTicks::now();

        assert!(!first.is_null());
        assert!(second >= first);
    }

    #[test]
    fn max_delta_saturates_any_tick() {
        for micros in [i64::MIN, -5, 0, 5, i64::MAX - 1] {
            let tick = TimeTicks::from_micros(micros);
            assert!((tick + TimeDelta::max()).is_max());
            assert!((tick + TimeDelta::min()).is_min());
        }
    }

    #[test]
    fn addition_clamps_instead_of_wrapping() {
        let near_end = TimeTicks::from_micros(i64::MAX - 10);
        assert!((near_end + TimeDelta::from_microseconds(11)).is_max());

        let near_start = TimeTicks::from_micros(i64::MIN + 10);
        assert!((near_start - TimeDelta::from_microseconds(11)).is_min());
    }

    #[test]
    fn difference_of_ticks() {
        let a = TimeTicks::from_micros(1_000);
        let b = TimeTicks::from_micros(250);

        assert_eq!(a - b, TimeDelta::from_microseconds(750));
        assert_eq!(b - a, TimeDelta::from_microseconds(-750));
        assert!((TimeTicks::max() - TimeTicks::min()).is_max());
    }
}
