use std::iter;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::pal::{TimeSource, TimeSourceFacade};
use crate::state_word::{MAX_TIMESTAMP, StateWord};
use crate::{BucketId, BucketStats, MAX_BUCKETS, Snapshot};

/// Bucket counters are plain accumulators with no relationship to each other or to the
/// state word that a reader could rely on, so we use `Relaxed` ordering for them. Readers
/// are explicitly allowed to see a duration update before or after its paired count update.
const COUNTER_ORDERING: Ordering = Ordering::Relaxed;

/// Cumulative data attributed to one bucket.
#[derive(Debug, Default)]
struct BucketCounters {
    duration_nanos: AtomicU64,
    call_count: AtomicU64,
}

impl BucketCounters {
    // Additions wrap on overflow. 2^64 nanoseconds is centuries of attributed time.

    fn add_duration(&self, nanos: u64) {
        self.duration_nanos.fetch_add(nanos, COUNTER_ORDERING);
    }

    fn add_call(&self) {
        self.call_count.fetch_add(1, COUNTER_ORDERING);
    }
}

/// The shared state of an accumulator: a state word naming the active bucket and when it
/// became active, plus the cumulative counters of every bucket.
///
/// The state word is the only synchronization point between the writer and readers. The
/// writer replaces it with a compare-and-swap, which hands it sole ownership of the interval
/// that just ended. Readers close out the active interval with a compare-and-swap that
/// moves the start of the interval to "now", which hands them sole ownership of the part
/// of the interval that elapsed so far. Either way each nanosecond is attributed once.
#[derive(Debug)]
pub(crate) struct Timeline {
    current: AtomicU64,

    buckets: Box<[BucketCounters]>,

    // Same length as `buckets` if present.
    bucket_names: Option<&'static [&'static str]>,

    time_source: TimeSourceFacade,
}

impl Timeline {
    pub(crate) fn new(
        bucket_count: usize,
        bucket_names: Option<&'static [&'static str]>,
        time_source: TimeSourceFacade,
    ) -> Self {
        debug_assert!(
            (1..=MAX_BUCKETS).contains(&bucket_count),
            "bucket count is validated by the builder"
        );
        debug_assert!(
            bucket_names.is_none_or(|names| names.len() == bucket_count),
            "bucket count is derived from the names when names are provided"
        );

        Self {
            current: AtomicU64::new(StateWord::UNSET.to_raw()),
            buckets: iter::repeat_with(BucketCounters::default)
                .take(bucket_count)
                .collect(),
            bucket_names,
            time_source,
        }
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Attributes the time since the previous transition to the previously active bucket
    /// and makes `bucket` the active one.
    ///
    /// Calls to this method must never overlap each other. This is upheld by the caller.
    ///
    /// # Panics
    ///
    /// Panics if `bucket` is out of range for this timeline.
    pub(crate) fn advance(&self, bucket: BucketId) {
        assert!(
            bucket.index() < self.buckets.len(),
            "bucket {bucket} is out of range for an accumulator with {} buckets",
            self.buckets.len()
        );

        let clock = self.now();

        let mut observed = StateWord::from_raw(self.current.load(Ordering::Acquire));

        loop {
            // A snapshot may have closed out the active interval at a timestamp later than
            // our clock read. The new interval starts where the closed-out part ended, so
            // that no time is attributed to both buckets.
            let now = if observed.is_unset() {
                clock
            } else {
                clock.max(observed.timestamp())
            };

            match self.current.compare_exchange(
                observed.to_raw(),
                StateWord::new(bucket, now).to_raw(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if observed.is_unset() {
                        // First transition ever, there is no interval to close.
                        return;
                    }

                    let counters = self.counters(observed.bucket());
                    counters.add_duration(now.saturating_sub(observed.timestamp()));
                    counters.add_call();
                    return;
                }
                Err(actual) => {
                    // Only snapshots race us and they only ever move the timestamp forward.
                    observed = StateWord::from_raw(actual);
                }
            }
        }
    }

    /// Closes out the active interval up to the current time and reads all counters.
    pub(crate) fn snapshot(&self) -> Snapshot {
        self.close_out(self.now());

        let buckets = self
            .buckets
            .iter()
            .enumerate()
            .map(|(index, counters)| {
                BucketStats::new(
                    BucketId::new(index),
                    self.bucket_name(index),
                    counters.duration_nanos.load(COUNTER_ORDERING),
                    counters.call_count.load(COUNTER_ORDERING),
                )
            })
            .collect();

        Snapshot::new(buckets)
    }

    /// Attributes the time elapsed in the active interval (if any) to the active bucket,
    /// restarting the interval at `now` without changing the active bucket.
    ///
    /// Does not count as a call because the interval has not ended.
    fn close_out(&self, now: u64) {
        let mut observed = StateWord::from_raw(self.current.load(Ordering::Acquire));

        loop {
            if observed.is_unset() {
                return;
            }

            if observed.timestamp() >= now {
                // The writer started this interval after we read the clock.
                return;
            }

            let replacement = StateWord::new(observed.bucket(), now);

            match self.current.compare_exchange(
                observed.to_raw(),
                replacement.to_raw(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.counters(observed.bucket())
                        .add_duration(now.saturating_sub(observed.timestamp()));
                    return;
                }
                Err(actual) => {
                    trace!(
                        expected = observed.to_raw(),
                        actual, "state word changed during close-out, retrying"
                    );

                    observed = StateWord::from_raw(actual);
                }
            }
        }
    }

    /// Timestamps start at 1 so that a state word is never mistaken for the unset word.
    fn now(&self) -> u64 {
        self.time_source
            .now_nanos()
            .saturating_add(1)
            .min(MAX_TIMESTAMP)
    }

    fn counters(&self, bucket: BucketId) -> &BucketCounters {
        self.buckets
            .get(bucket.index())
            .expect("state word only ever holds bucket IDs validated by advance()")
    }

    fn bucket_name(&self, index: usize) -> Option<&'static str> {
        self.bucket_names
            .and_then(|names| names.get(index))
            .copied()
    }
}
