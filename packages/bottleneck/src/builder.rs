use std::sync::Arc;

use tracing::debug;

use crate::pal::TimeSourceFacade;
use crate::timeline::Timeline;
use crate::{Accumulator, Error, MAX_BUCKETS, Result};

/// Creates instances of [`Accumulator`].
///
/// Optional parameters:
/// * `bucket_count` (default [`MAX_BUCKETS`])
/// * `bucket_names` (default none, buckets are identified by index in reports)
///
/// Use `Accumulator::builder()` to create a new instance of this builder.
///
/// # Example
///
/// ```
/// use bottleneck::{Accumulator, BucketId};
///
/// const FILL: BucketId = BucketId::new(0);
/// const SORT: BucketId = BucketId::new(1);
///
/// let mut accumulator = Accumulator::builder()
///     .bucket_names(&["fill", "sort"])
///     .build();
///
/// accumulator.advance(FILL);
/// accumulator.advance(SORT);
///
/// println!("{}", accumulator.snapshot());
/// ```
#[derive(Debug)]
#[must_use]
pub struct AccumulatorBuilder {
    bucket_count: usize,
    bucket_names: Option<&'static [&'static str]>,
}

impl AccumulatorBuilder {
    pub(crate) fn new() -> Self {
        Self {
            bucket_count: MAX_BUCKETS,
            bucket_names: None,
        }
    }

    /// Sets the number of buckets, between 1 and [`MAX_BUCKETS`].
    ///
    /// Clears any bucket names set earlier.
    pub fn bucket_count(self, bucket_count: usize) -> Self {
        Self {
            bucket_count,
            bucket_names: None,
        }
    }

    /// Names the buckets, in index order. The number of names becomes the bucket count.
    ///
    /// Names are only used when rendering a [`Snapshot`][crate::Snapshot] for humans.
    pub fn bucket_names(self, bucket_names: &'static [&'static str]) -> Self {
        Self {
            bucket_count: bucket_names.len(),
            bucket_names: Some(bucket_names),
        }
    }

    /// Builds the accumulator.
    ///
    /// # Panics
    ///
    /// Panics if the bucket count is zero or greater than [`MAX_BUCKETS`].
    #[must_use]
    pub fn build(self) -> Accumulator {
        match self.try_build() {
            Ok(accumulator) => accumulator,
            Err(e) => panic!("{e}"),
        }
    }

    /// Builds the accumulator, returning an error if the configuration is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBucketCount`] if the bucket count is zero or greater
    /// than [`MAX_BUCKETS`].
    pub fn try_build(self) -> Result<Accumulator> {
        self.try_build_with(TimeSourceFacade::real())
    }

    pub(crate) fn try_build_with(self, time_source: TimeSourceFacade) -> Result<Accumulator> {
        if !(1..=MAX_BUCKETS).contains(&self.bucket_count) {
            return Err(Error::InvalidBucketCount {
                requested: self.bucket_count,
            });
        }

        debug!(
            bucket_count = self.bucket_count,
            named = self.bucket_names.is_some(),
            "created bottleneck accumulator"
        );

        Ok(Accumulator::from_timeline(Arc::new(Timeline::new(
            self.bucket_count,
            self.bucket_names,
            time_source,
        ))))
    }
}
