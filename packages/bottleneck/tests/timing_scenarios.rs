//! Attribution of real elapsed time, measured with the operating system clock.
//!
//! Sleeps are guaranteed to last at least as long as requested but may overshoot,
//! so the upper bounds here are generous.

use std::thread;
use std::time::Duration;

use bottleneck::{Accumulator, BucketId};

const B0: BucketId = BucketId::new(0);
const B1: BucketId = BucketId::new(1);

const SLICE: Duration = Duration::from_millis(100);
const TOLERANCE: Duration = Duration::from_millis(60);

fn assert_approximately(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected,
        "expected at least {expected:?}, got {actual:?}"
    );
    assert!(
        actual <= expected.saturating_add(TOLERANCE),
        "expected at most {:?}, got {actual:?}",
        expected.saturating_add(TOLERANCE)
    );
}

#[test]
fn alternating_buckets_attribute_sleep_time() {
    let mut accumulator = Accumulator::new(8);

    accumulator.advance(B0);
    thread::sleep(SLICE);
    accumulator.advance(B1);
    thread::sleep(SLICE);
    accumulator.advance(B0);
    thread::sleep(SLICE);

    let snapshot = accumulator.snapshot();

    assert_eq!(snapshot[B0].call_count(), 1);
    assert_eq!(snapshot[B1].call_count(), 1);
    assert_approximately(snapshot[B0].duration(), SLICE * 2);
    assert_approximately(snapshot[B1].duration(), SLICE);
    assert!((snapshot[B0].percentage() - 0.666).abs() < 0.1);
    assert!((snapshot[B1].percentage() - 0.333).abs() < 0.1);

    // Completing the interval that the snapshot already closed out adds (almost) nothing.
    accumulator.advance(B0);

    let after = accumulator.snapshot();

    assert_eq!(after[B0].call_count(), 2);
    assert_eq!(after[B1].call_count(), 1);
    assert_approximately(after[B0].duration(), SLICE * 2);
    assert_eq!(after[B1].duration(), snapshot[B1].duration());
    assert!((after[B0].percentage() - 0.666).abs() < 0.1);
    assert!((after[B1].percentage() - 0.333).abs() < 0.1);
}

#[test]
fn snapshot_before_advance_is_empty() {
    let accumulator = Accumulator::new(3);

    let snapshot = accumulator.snapshot();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.total_duration(), Duration::ZERO);

    for stats in snapshot.buckets() {
        assert_eq!(stats.duration(), Duration::ZERO);
        assert_eq!(stats.call_count(), 0);
        assert!(stats.percentage().is_nan());
    }
}

#[test]
fn active_bucket_keeps_growing_between_snapshots() {
    let mut accumulator = Accumulator::new(2);

    accumulator.advance(B1);
    thread::sleep(Duration::from_millis(10));
    let first = accumulator.snapshot();
    thread::sleep(Duration::from_millis(10));
    let second = accumulator.snapshot();

    assert!(second[B1].duration() > first[B1].duration());
    assert_eq!(second[B1].call_count(), 0);
    assert_eq!(second[B0].duration(), Duration::ZERO);
}

#[test]
fn percentages_sum_to_one() {
    let mut accumulator = Accumulator::new(4);

    for index in [0, 1, 2, 3, 1, 2] {
        accumulator.advance(BucketId::new(index));
        thread::sleep(Duration::from_millis(2));
    }

    let snapshot = accumulator.snapshot();
    let sum: f64 = snapshot.buckets().map(|stats| stats.percentage()).sum();

    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn total_is_sum_of_buckets() {
    let mut accumulator = Accumulator::new(3);

    for index in [2, 0, 1, 0] {
        accumulator.advance(BucketId::new(index));
        thread::sleep(Duration::from_millis(1));
    }

    let snapshot = accumulator.snapshot();
    let sum: Duration = snapshot.buckets().map(|stats| stats.duration()).sum();

    assert_eq!(snapshot.total_duration(), sum);
}
