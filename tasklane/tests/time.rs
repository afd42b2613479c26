use std::time::Duration;
use tasklane::{TimeDelta, TimeTicks};

#[test]
fn test_delta_unit_conversions_saturate() {
    assert_eq!(TimeDelta::from_seconds(2).as_micros(), 2_000_000);
    assert_eq!(TimeDelta::from_minutes(1), TimeDelta::from_seconds(60));
    assert_eq!(TimeDelta::from_hours(1), TimeDelta::from_minutes(60));

    assert!(TimeDelta::from_hours(i64::MAX).is_max());
    assert!(TimeDelta::from_milliseconds(i64::MIN).is_min());
}

#[test]
fn test_delta_arithmetic_saturates() {
    let one = TimeDelta::from_seconds(1);

    assert!((TimeDelta::max() + one).is_max());
    assert!((TimeDelta::min() - one).is_min());
    assert!((-TimeDelta::min()).is_max());
    assert!((one - one).is_zero());
}

#[test]
fn test_delta_std_conversions() {
    assert_eq!(
        TimeDelta::from_milliseconds(1500).to_std(),
        Some(Duration::from_millis(1500))
    );
    assert_eq!(TimeDelta::from_milliseconds(-1).to_std(), None);
    assert!(TimeDelta::from(Duration::MAX).is_max());
}

#[test]
fn test_ticks_saturate_at_sentinels() {
    let now = TimeTicks::now();

    assert!(!now.is_null());
    assert_eq!(now + TimeDelta::max(), TimeTicks::max());
    assert_eq!(now + TimeDelta::min(), TimeTicks::min());
    assert_eq!(TimeTicks::max() + TimeDelta::from_seconds(1), TimeTicks::max());
    assert_eq!(TimeTicks::max() - TimeTicks::min(), TimeDelta::max());
}

#[test]
fn test_ticks_difference() {
    let start = TimeTicks::now();
    let later = start + TimeDelta::from_milliseconds(250);

    assert_eq!(later - start, TimeDelta::from_milliseconds(250));
    assert_eq!(start - later, TimeDelta::from_milliseconds(-250));
    assert!(later > start);
    assert!(TimeTicks::null() < start);
}
