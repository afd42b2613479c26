//! Time primitives used for scheduling.
//!
//! This module provides the two value types the task runners schedule
//! with:
//! - [`TimeDelta`], a signed microsecond duration,
//! - [`TimeTicks`], a monotonic microsecond timestamp.
//!
//! Both saturate instead of wrapping: arithmetic that would overflow
//! clamps to the `max()`/`min()` sentinels, which then order like any
//! other value.

mod delta;
mod ticks;

pub(crate) const MICROS_PER_MILLISECOND: i64 = 1_000;
pub(crate) const MICROS_PER_SECOND: i64 = MICROS_PER_MILLISECOND * 1_000;
pub(crate) const MICROS_PER_MINUTE: i64 = MICROS_PER_SECOND * 60;
pub(crate) const MICROS_PER_HOUR: i64 = MICROS_PER_MINUTE * 60;

#[doc(inline)]
pub use delta::TimeDelta;

#[doc(inline)]
pub use ticks::TimeTicks;
