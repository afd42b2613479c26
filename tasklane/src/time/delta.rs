use super::{MICROS_PER_HOUR, MICROS_PER_MILLISECOND, MICROS_PER_MINUTE, MICROS_PER_SECOND};

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::time::Duration;

/// A signed span of time with microsecond resolution.
///
/// `TimeDelta` is what delayed tasks are posted with. Conversions from
/// coarser units saturate to [`TimeDelta::max`] / [`TimeDelta::min`]
/// rather than overflowing, so `TimeDelta::max()` can be used to mean
/// "never".
///
/// # Examples
///
/// ```rust
/// use tasklane::time::TimeDelta;
///
/// let delay = TimeDelta::from_milliseconds(250);
/// assert_eq!(delay.as_micros(), 250_000);
/// assert!(TimeDelta::from_hours(i64::MAX).is_max());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeDelta {
    /// Span in microseconds.
    micros: i64,
}

impl TimeDelta {
    /// Returns a zero-length span.
    pub const fn zero() -> Self {
        Self { micros: 0 }
    }

    /// Returns the largest representable span.
    pub const fn max() -> Self {
        Self { micros: i64::MAX }
    }

    /// Returns the smallest (most negative) representable span.
    pub const fn min() -> Self {
        Self { micros: i64::MIN }
    }

    /// Creates a span of `hours` hours, saturating on overflow.
    pub const fn from_hours(hours: i64) -> Self {
        Self::from_unit(hours, MICROS_PER_HOUR)
    }

    /// Creates a span of `minutes` minutes, saturating on overflow.
    pub const fn from_minutes(minutes: i64) -> Self {
        Self::from_unit(minutes, MICROS_PER_MINUTE)
    }

    /// Creates a span of `seconds` seconds, saturating on overflow.
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_unit(seconds, MICROS_PER_SECOND)
    }

    /// Creates a span of `ms` milliseconds, saturating on overflow.
    pub const fn from_milliseconds(ms: i64) -> Self {
        Self::from_unit(ms, MICROS_PER_MILLISECOND)
    }

    /// Creates a span of exactly `us` microseconds.
    pub const fn from_microseconds(us: i64) -> Self {
        Self { micros: us }
    }

    const fn from_unit(value: i64, micros_per_unit: i64) -> Self {
        Self {
            micros: value.saturating_mul(micros_per_unit),
        }
    }

    /// Returns the span in microseconds.
    pub const fn as_micros(self) -> i64 {
        self.micros
    }

    pub const fn is_zero(self) -> bool {
        self.micros == 0
    }

    pub const fn is_max(self) -> bool {
        self.micros == i64::MAX
    }

    pub const fn is_min(self) -> bool {
        self.micros == i64::MIN
    }

    /// Returns `true` if the span is strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.micros > 0
    }

    /// Converts to a [`std::time::Duration`].
    ///
    /// Returns `None` for negative spans, which have no std equivalent.
    pub fn to_std(self) -> Option<Duration> {
        u64::try_from(self.micros).ok().map(Duration::from_micros)
    }
}

impl From<Duration> for TimeDelta {
    /// Converts a std duration, truncating to whole microseconds and
    /// saturating to [`TimeDelta::max`].
    fn from(duration: Duration) -> Self {
        let micros = i64::try_from(duration.as_micros()).unwrap_or(i64::MAX);
        Self { micros }
    }
}

impl Add for TimeDelta {
    type Output = TimeDelta;

    fn add(self, rhs: TimeDelta) -> TimeDelta {
        TimeDelta {
            micros: self.micros.saturating_add(rhs.micros),
        }
    }
}

impl Sub for TimeDelta {
    type Output = TimeDelta;

    fn sub(self, rhs: TimeDelta) -> TimeDelta {
        TimeDelta {
            micros: self.micros.saturating_sub(rhs.micros),
        }
    }
}

impl Neg for TimeDelta {
    type Output = TimeDelta;

    fn neg(self) -> TimeDelta {
        TimeDelta {
            micros: self.micros.saturating_neg(),
        }
    }
}

impl fmt::Debug for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(TimeDelta::from_hours(1).as_micros(), 3_600_000_000);
        assert_eq!(TimeDelta::from_minutes(2).as_micros(), 120_000_000);
        assert_eq!(TimeDelta::from_seconds(-3).as_micros(), -3_000_000);
        assert_eq!(TimeDelta::from_milliseconds(7).as_micros(), 7_000);
        assert!(TimeDelta::zero().is_zero());
    }

    #[test]
    fn conversions_saturate() {
        assert!(TimeDelta::from_hours(i64::MAX).is_max());
        assert!(TimeDelta::from_minutes(i64::MIN).is_min());
        assert!(TimeDelta::from_seconds(i64::MAX / 2).is_max());
        assert!((TimeDelta::max() + TimeDelta::from_seconds(1)).is_max());
        assert!((-TimeDelta::min()).is_max());
    }

    #[test]
    fn std_conversions() {
        let delta = TimeDelta::from(Duration::from_millis(1500));
        assert_eq!(delta, TimeDelta::from_milliseconds(1500));
        assert_eq!(delta.to_std(), Some(Duration::from_millis(1500)));
        assert_eq!(TimeDelta::from_microseconds(-1).to_std(), None);
        assert!(TimeDelta::from(Duration::MAX).is_max());
    }
}
