use std::fmt::Debug;

/// Provides timestamps for attributing elapsed time to buckets.
///
/// Implementations must be monotonic: a later call never returns a smaller value than an
/// earlier call. Time attribution subtracts consecutive timestamps and does not attempt to
/// detect or correct a clock that moves backwards.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait TimeSource: Debug + Send + Sync + 'static {
    /// Nanoseconds elapsed since an arbitrary epoch fixed for the lifetime of the source.
    fn now_nanos(&self) -> u64;
}
