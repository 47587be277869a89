use std::sync::Arc;

use crate::timeline::Timeline;
use crate::{AccumulatorBuilder, BucketId, Observer, Snapshot};

/// Attributes elapsed time to a fixed set of buckets as execution moves between them.
///
/// This is the writer side. Call [`advance()`](Self::advance) whenever execution enters a
/// bucket: the time from that call until the next one is attributed to that bucket. Because
/// `advance()` takes `&mut self` there is only ever one writer, though the accumulator may
/// be moved between threads.
///
/// Any number of readers on any threads can inspect the accumulated data via
/// [`Observer`] handles obtained from [`observer()`](Self::observer). Reading never
/// blocks the writer and the writer never blocks readers.
///
/// # Example
///
/// ```
/// use bottleneck::{Accumulator, BucketId};
///
/// const CREATE: BucketId = BucketId::new(0);
/// const SORT: BucketId = BucketId::new(1);
///
/// let mut accumulator = Accumulator::new(2);
///
/// accumulator.advance(CREATE);
/// let mut values = (0..10_000_u32).rev().collect::<Vec<_>>();
///
/// accumulator.advance(SORT);
/// values.sort_unstable();
///
/// let snapshot = accumulator.snapshot();
/// println!(
///     "creating took {:?}, sorting took {:?}",
///     snapshot[CREATE].duration(),
///     snapshot[SORT].duration()
/// );
/// ```
#[derive(Debug)]
pub struct Accumulator {
    timeline: Arc<Timeline>,
}

impl Accumulator {
    /// Creates an accumulator with `bucket_count` buckets, all starting at zero.
    ///
    /// No bucket is active until the first call to [`advance()`](Self::advance).
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero or greater than [`MAX_BUCKETS`][crate::MAX_BUCKETS].
    #[must_use]
    pub fn new(bucket_count: usize) -> Self {
        Self::builder().bucket_count(bucket_count).build()
    }

    /// Starts configuring an accumulator with non-default options, such as bucket names.
    pub fn builder() -> AccumulatorBuilder {
        AccumulatorBuilder::new()
    }

    pub(crate) fn from_timeline(timeline: Arc<Timeline>) -> Self {
        Self { timeline }
    }

    /// Marks the start of a new interval attributed to `bucket`.
    ///
    /// The interval that was active until now (if any) is completed: its elapsed time is
    /// added to the bucket it belonged to, and that bucket's call count is incremented.
    ///
    /// # Panics
    ///
    /// Panics if `bucket` is not less than [`bucket_count()`](Self::bucket_count).
    pub fn advance(&mut self, bucket: BucketId) {
        self.timeline.advance(bucket);
    }

    /// Captures the cumulative statistics of all buckets.
    ///
    /// The time elapsed so far in the active interval is attributed to the active bucket
    /// without completing the interval.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.timeline.snapshot()
    }

    /// Creates a reader handle that can take snapshots from any thread.
    #[must_use]
    pub fn observer(&self) -> Observer {
        Observer::new(Arc::clone(&self.timeline))
    }

    /// The number of buckets time is attributed to.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.timeline.bucket_count()
    }
}
