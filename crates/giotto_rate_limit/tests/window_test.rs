//! Tests for the sliding request windows.

use giotto_rate_limit::RateWindowTracker;
use std::time::{Duration, Instant};

#[test]
fn test_under_ceiling_not_exceeded() {
    let mut tracker = RateWindowTracker::new(5, 100);
    let base = Instant::now();

    for _ in 0..4 {
        tracker.record_at(base);
    }

    let state = tracker.check_limits_at(base);
    assert!(!state.minute_exceeded());
    assert!(!state.hour_exceeded());
    assert!(!state.any_exceeded());
    assert_eq!(*state.wait(), Duration::ZERO);
}

#[test]
fn test_minute_ceiling_reached() {
    let mut tracker = RateWindowTracker::new(5, 100);
    let base = Instant::now();

    for _ in 0..5 {
        tracker.record_at(base);
    }

    let state = tracker.check_limits_at(base);
    assert!(state.minute_exceeded());
    assert!(!state.hour_exceeded());
    assert!(!state.wait().is_zero());
}

#[test]
fn test_wait_computed_from_oldest_instant() {
    let mut tracker = RateWindowTracker::new(2, 100);
    let base = Instant::now();

    tracker.record_at(base);
    tracker.record_at(base + Duration::from_secs(10));

    // Oldest instant leaves the window at base + 60s; checking at base + 10s
    // leaves 50s plus the 100ms buffer.
    let state = tracker.check_limits_at(base + Duration::from_secs(10));
    assert!(state.minute_exceeded());
    assert_eq!(*state.wait(), Duration::from_millis(50_100));
}

#[test]
fn test_expired_instants_purged_on_every_check() {
    let base = Instant::now();

    // Probe survivor presence by checking against a ceiling of 1: exceeded
    // means at least one instant is still inside the minute window.
    let survivor_remains = |offset: u64| {
        let mut tracker = RateWindowTracker::new(1, 1000);
        tracker.record_at(base);
        tracker.record_at(base + Duration::from_secs(20));
        tracker.record_at(base + Duration::from_secs(40));
        *tracker
            .check_limits_at(base + Duration::from_secs(offset))
            .minute_exceeded()
    };

    assert!(survivor_remains(50));
    assert!(survivor_remains(61));
    assert!(survivor_remains(101));
    // Window fully elapsed: every instant evicted with no external reset.
    assert!(!survivor_remains(121));
}

#[test]
fn test_minute_count_decreases_as_window_slides() {
    let base = Instant::now();
    let mut tracker = RateWindowTracker::new(3, 1000);
    tracker.record_at(base);
    tracker.record_at(base + Duration::from_secs(20));
    tracker.record_at(base + Duration::from_secs(40));

    assert!(
        tracker
            .check_limits_at(base + Duration::from_secs(59))
            .minute_exceeded()
    );
    // The oldest instant left the window, so the ceiling is no longer reached.
    assert!(
        !tracker
            .check_limits_at(base + Duration::from_secs(61))
            .minute_exceeded()
    );
}

#[test]
fn test_hour_ceiling_independent_of_minute() {
    let mut tracker = RateWindowTracker::new(1000, 3);
    let base = Instant::now();

    // Spread past the minute window but inside the hour window.
    tracker.record_at(base);
    tracker.record_at(base + Duration::from_secs(120));
    tracker.record_at(base + Duration::from_secs(240));

    let state = tracker.check_limits_at(base + Duration::from_secs(360));
    assert!(!state.minute_exceeded());
    assert!(state.hour_exceeded());
    // The wait hint only applies to the minute window.
    assert_eq!(*state.wait(), Duration::ZERO);
}

#[test]
fn test_ceilings_are_configurable() {
    let mut tracker = RateWindowTracker::new(2, 10);
    assert_eq!(tracker.minute_ceiling(), 2);
    assert_eq!(tracker.hour_ceiling(), 10);

    let base = Instant::now();
    tracker.record_at(base);
    tracker.record_at(base);
    assert!(tracker.check_limits_at(base).minute_exceeded());
}

#[test]
fn test_introspection_counts() {
    let mut tracker = RateWindowTracker::new(5, 100);
    tracker.record();
    tracker.record();

    assert_eq!(tracker.requests_in_last_minute(), 2);
    assert_eq!(tracker.requests_in_last_hour(), 2);
}
