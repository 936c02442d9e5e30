//! Debounce filter tests

use pulse_relay::debounce::{DebounceFilter, DebounceOutcome};
use pulse_relay::timing::{Interval, Timestamp};

fn ts(us: u32) -> Timestamp {
    Timestamp::from_micros(us)
}

#[test]
fn test_first_edge_never_measured() {
    // A late first edge must not be measured against a zero baseline
    let mut filter = DebounceFilter::new(Interval::from_micros(10));

    assert_eq!(filter.accept(ts(5_000_000)), DebounceOutcome::Seeded);
    assert_eq!(filter.last_accepted(), Some(ts(5_000_000)));
}

#[test]
fn test_rejected_edge_keeps_baseline() {
    let mut filter = DebounceFilter::new(Interval::from_micros(1_500));
    filter.accept(ts(10_000));

    for bounce in [10_001, 10_200, 11_499] {
        assert!(matches!(filter.accept(ts(bounce)), DebounceOutcome::Rejected(_)));
        assert_eq!(filter.last_accepted(), Some(ts(10_000)));
    }

    // Measured from the original baseline, not from the bounce
    assert_eq!(
        filter.accept(ts(12_000)),
        DebounceOutcome::Accepted(Interval::from_micros(2_000))
    );
    assert_eq!(filter.rejected(), 3);
}

#[test]
fn test_dead_time_boundary_is_accepted() {
    let mut filter = DebounceFilter::new(Interval::from_micros(10));
    filter.accept(ts(100));

    assert_eq!(filter.accept(ts(109)), DebounceOutcome::Rejected(Interval::from_micros(9)));
    assert_eq!(
        filter.accept(ts(110)),
        DebounceOutcome::Accepted(Interval::from_micros(10))
    );
}

#[test]
fn test_no_short_interval_ever_emitted() {
    let dead_time = Interval::from_micros(50);
    let mut filter = DebounceFilter::new(dead_time);

    // Pseudo-random edge spacing from a small LCG
    let mut seed = 12_345u32;
    let mut now = 0u32;
    for _ in 0..10_000 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        now = now.wrapping_add((seed >> 16) % 120);

        let before = filter.last_accepted();
        match filter.accept(ts(now)) {
            DebounceOutcome::Accepted(interval) => assert!(interval >= dead_time),
            DebounceOutcome::Rejected(_) => assert_eq!(filter.last_accepted(), before),
            DebounceOutcome::Seeded => assert_eq!(before, None),
        }
    }
}

#[test]
fn test_wraparound_interval() {
    let mut filter = DebounceFilter::new(Interval::from_micros(10));
    filter.accept(ts(u32::MAX - 99));

    assert_eq!(
        filter.accept(ts(100)),
        DebounceOutcome::Accepted(Interval::from_micros(200))
    );
}

#[test]
fn test_reset_reseeds() {
    let mut filter = DebounceFilter::new(Interval::from_micros(10));
    filter.accept(ts(100));
    filter.reset();

    assert_eq!(filter.last_accepted(), None);
    assert_eq!(filter.accept(ts(5_000)), DebounceOutcome::Seeded);
}
