use std::fmt::{self, Display};
use std::ops::Index;
use std::time::Duration;

use crate::BucketId;

/// Cumulative statistics of every bucket of an accumulator, captured at one point in time.
///
/// Buckets are listed in index order. For human-readable output, use the `Display` trait
/// implementation, which renders one line per bucket.
///
/// The data is eventually consistent: the duration of a just-completed interval may be
/// visible before the matching increment of the call count, or vice versa.
///
/// # Example
///
/// ```
/// use bottleneck::{Accumulator, BucketId};
///
/// let mut accumulator = Accumulator::new(2);
/// accumulator.advance(BucketId::new(0));
/// accumulator.advance(BucketId::new(1));
///
/// let snapshot = accumulator.snapshot();
///
/// for stats in snapshot.buckets() {
///     println!(
///         "bucket {}: {:?} over {} calls",
///         stats.bucket(),
///         stats.duration(),
///         stats.call_count()
///     );
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Snapshot {
    buckets: Box<[BucketStats]>,
    total_duration_nanos: u64,
}

impl Snapshot {
    /// Derives the percentages of the buckets from their durations.
    pub(crate) fn new(mut buckets: Box<[BucketStats]>) -> Self {
        let total_duration_nanos = buckets
            .iter()
            .fold(0_u64, |total, stats| total.wrapping_add(stats.duration_nanos));

        for stats in &mut *buckets {
            stats.percentage = fraction(stats.duration_nanos, total_duration_nanos);
        }

        Self {
            buckets,
            total_duration_nanos,
        }
    }

    /// The number of buckets, equal to the bucket count of the accumulator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the snapshot has no buckets. An accumulator always has at least one bucket,
    /// so this is only `true` for a default-constructed snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterates over the statistics of all buckets in index order.
    pub fn buckets(&self) -> impl Iterator<Item = &BucketStats> {
        self.buckets.iter()
    }

    /// The statistics of one bucket, or `None` if the bucket is out of range.
    #[must_use]
    pub fn get(&self, bucket: BucketId) -> Option<&BucketStats> {
        self.buckets.get(bucket.index())
    }

    /// The sum of the durations of all buckets.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        Duration::from_nanos(self.total_duration_nanos)
    }

    /// Prints the snapshot to stdout, one line per bucket.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Box::default())
    }
}

impl Index<BucketId> for Snapshot {
    type Output = BucketStats;

    fn index(&self, bucket: BucketId) -> &Self::Output {
        self.get(bucket)
            .expect("bucket is out of range for this snapshot")
    }
}

impl Index<usize> for Snapshot {
    type Output = BucketStats;

    fn index(&self, index: usize) -> &Self::Output {
        self.buckets
            .get(index)
            .expect("bucket index is out of range for this snapshot")
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stats in &self.buckets {
            writeln!(f, "{stats}")?;
        }

        Ok(())
    }
}

/// Cumulative statistics of a single bucket.
///
/// Part of a [`Snapshot`].
#[derive(Clone, Debug)]
pub struct BucketStats {
    bucket: BucketId,
    name: Option<&'static str>,

    duration_nanos: u64,
    call_count: u64,

    // NaN if no time has been attributed to any bucket yet.
    percentage: f64,
}

impl BucketStats {
    pub(crate) fn new(
        bucket: BucketId,
        name: Option<&'static str>,
        duration_nanos: u64,
        call_count: u64,
    ) -> Self {
        Self {
            bucket,
            name,
            duration_nanos,
            call_count,
            percentage: f64::NAN,
        }
    }

    /// The bucket these statistics belong to.
    #[must_use]
    pub fn bucket(&self) -> BucketId {
        self.bucket
    }

    /// The name of the bucket, if the accumulator was configured with bucket names.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Total time attributed to the bucket, including the elapsed part of the interval
    /// that was active when the snapshot was taken.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.duration_nanos)
    }

    /// Total time attributed to the bucket, in nanoseconds.
    #[must_use]
    pub fn duration_nanos(&self) -> u64 {
        self.duration_nanos
    }

    /// Number of completed intervals attributed to the bucket.
    ///
    /// An interval completes when the writer advances away from the bucket (or back into
    /// it). The interval that is active when the snapshot is taken is not counted.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// The share of the total attributed time that belongs to this bucket,
    /// as a fraction in `[0, 1]`.
    ///
    /// This is NaN if no time has been attributed to any bucket yet.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

impl Display for BucketStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{name}: ")?,
            None => write!(f, "bucket {}: ", self.bucket)?,
        }

        if self.percentage.is_nan() {
            write!(f, "-")?;
        } else {
            write!(f, "{:.1}%", self.percentage * 100.0)?;
        }

        write!(f, " {:?} ({} calls)", self.duration(), self.call_count)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "percentages are informational, f64 precision is more than enough"
)]
fn fraction(part: u64, total: u64) -> f64 {
    // 0 / 0 is NaN, which is exactly what we want when nothing has been attributed yet.
    part as f64 / total as f64
}
