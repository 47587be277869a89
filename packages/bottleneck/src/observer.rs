use std::sync::Arc;

use crate::Snapshot;
use crate::timeline::Timeline;

/// A read-only handle to an [`Accumulator`][crate::Accumulator].
///
/// Observers can be cloned freely and used from any number of threads concurrently with
/// each other and with the writer. They keep the accumulated data alive even after the
/// accumulator itself is dropped, at which point the bucket that was last active keeps
/// accumulating time until the last observer is gone.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use bottleneck::{Accumulator, BucketId};
///
/// let mut accumulator = Accumulator::new(2);
/// let observer = accumulator.observer();
///
/// let monitor = thread::spawn(move || observer.snapshot());
///
/// accumulator.advance(BucketId::new(0));
/// accumulator.advance(BucketId::new(1));
///
/// let snapshot = monitor.join().unwrap();
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Observer {
    timeline: Arc<Timeline>,
}

impl Observer {
    pub(crate) fn new(timeline: Arc<Timeline>) -> Self {
        Self { timeline }
    }

    /// Captures the cumulative statistics of all buckets.
    ///
    /// See [`Accumulator::snapshot()`][crate::Accumulator::snapshot].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.timeline.snapshot()
    }

    /// The number of buckets time is attributed to.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.timeline.bucket_count()
    }
}
