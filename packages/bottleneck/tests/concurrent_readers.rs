//! Snapshots taken from many threads while a single writer keeps advancing.

use std::sync::Barrier;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use bottleneck::{Accumulator, BucketId, Snapshot};

const BUCKET_COUNT: usize = 4;
const READER_COUNT: usize = 4;
const TRANSITIONS: usize = 20_000;
const CLOCK_RESOLUTION: Duration = Duration::from_micros(1);

fn assert_not_decreasing(previous: &Snapshot, current: &Snapshot) {
    for (before, after) in previous.buckets().zip(current.buckets()) {
        assert!(
            after.duration_nanos() >= before.duration_nanos(),
            "duration of bucket {} decreased from {} to {}",
            before.bucket(),
            before.duration_nanos(),
            after.duration_nanos()
        );
        assert!(
            after.call_count() >= before.call_count(),
            "call count of bucket {} decreased from {} to {}",
            before.bucket(),
            before.call_count(),
            after.call_count()
        );
    }
}

#[test]
fn concurrent_snapshots_never_decrease() {
    let mut accumulator = Accumulator::new(BUCKET_COUNT);
    let observer = accumulator.observer();

    let writer_done = AtomicBool::new(false);
    let start = Barrier::new(READER_COUNT + 1);

    thread::scope(|s| {
        for _ in 0..READER_COUNT {
            let observer = observer.clone();
            let writer_done = &writer_done;
            let start = &start;

            s.spawn(move || {
                start.wait();

                let mut previous = observer.snapshot();

                while !writer_done.load(Ordering::Relaxed) {
                    let current = observer.snapshot();
                    assert_not_decreasing(&previous, &current);
                    previous = current;
                }
            });
        }

        start.wait();

        for i in 0..TRANSITIONS {
            accumulator.advance(BucketId::new(i % BUCKET_COUNT));
        }

        writer_done.store(true, Ordering::Relaxed);
    });

    // Everything is quiet now, so the counters must be exact.
    let snapshot = accumulator.snapshot();
    let calls: u64 = snapshot.buckets().map(|stats| stats.call_count()).sum();

    assert_eq!(calls, (TRANSITIONS - 1) as u64);

    for stats in snapshot.buckets() {
        let expected = (TRANSITIONS / BUCKET_COUNT) as u64;
        let is_last_active = stats.bucket().index() == (TRANSITIONS - 1) % BUCKET_COUNT;

        if is_last_active {
            assert_eq!(stats.call_count(), expected - 1);
        } else {
            assert_eq!(stats.call_count(), expected);
        }
    }
}

#[test]
fn no_time_is_lost_or_double_counted() {
    let mut accumulator = Accumulator::new(2);
    let observer = accumulator.observer();

    let writer_done = AtomicBool::new(false);

    let started = Instant::now();

    thread::scope(|s| {
        for _ in 0..READER_COUNT {
            let observer = observer.clone();
            let writer_done = &writer_done;

            s.spawn(move || {
                while !writer_done.load(Ordering::Relaxed) {
                    let _snapshot = observer.snapshot();
                }
            });
        }

        accumulator.advance(BucketId::new(0));

        for i in 0..200 {
            thread::sleep(Duration::from_micros(100));
            accumulator.advance(BucketId::new(i % 2));
        }

        writer_done.store(true, Ordering::Relaxed);
    });

    let snapshot = accumulator.snapshot();
    let wall_clock = started.elapsed();

    // All attributed time happened between the first advance and the final snapshot, and
    // none of it was attributed twice however the snapshots interleaved with the writer.
    assert!(snapshot.total_duration() <= wall_clock + CLOCK_RESOLUTION);
    // 200 sleeps of at least 100us each were attributed to some bucket.
    assert!(snapshot.total_duration() >= Duration::from_micros(100) * 200);
}
