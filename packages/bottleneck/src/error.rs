use thiserror::Error;

/// Errors that can occur when configuring an accumulator or identifying a bucket.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested number of buckets is zero or exceeds [`MAX_BUCKETS`][crate::MAX_BUCKETS].
    #[error("invalid bucket count {requested}: must be between 1 and {max}", max = crate::MAX_BUCKETS)]
    InvalidBucketCount {
        /// The bucket count that was requested.
        requested: usize,
    },

    /// The bucket index does not fit into the state word.
    #[error("bucket index {index} is out of range: must be less than {max}", max = crate::MAX_BUCKETS)]
    BucketOutOfRange {
        /// The index that was rejected.
        index: usize,
    },
}

/// A specialized `Result` type for bottleneck operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
