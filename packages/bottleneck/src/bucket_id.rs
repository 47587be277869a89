use std::fmt::{self, Display};

use crate::{Error, Result};

/// The maximum number of buckets a single accumulator can attribute time to.
///
/// The active bucket is stored in the top bits of a 64-bit state word, next to a timestamp.
/// Three bits are reserved for the bucket, leaving 61 bits of nanosecond timestamp.
pub const MAX_BUCKETS: usize = 8;

/// Identifies one bucket of an [`Accumulator`][crate::Accumulator].
///
/// The index must be less than [`MAX_BUCKETS`]. Whether it is also less than the bucket
/// count of a specific accumulator is only checked when the identifier is used.
///
/// # Example
///
/// ```
/// use bottleneck::BucketId;
///
/// const FILL: BucketId = BucketId::new(0);
/// const SORT: BucketId = BucketId::new(1);
///
/// assert_eq!(SORT.index(), 1);
/// assert!(BucketId::try_from(8).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BucketId(u8);

impl BucketId {
    /// Creates a bucket identifier from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`MAX_BUCKETS`].
    #[must_use]
    pub const fn new(index: usize) -> Self {
        assert!(index < MAX_BUCKETS, "bucket index must be less than MAX_BUCKETS");

        #[expect(
            clippy::cast_possible_truncation,
            reason = "guarded by the assertion above, MAX_BUCKETS fits in u8"
        )]
        let index = index as u8;

        Self(index)
    }

    /// The zero-based index of the bucket.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Recovers a bucket identifier from the bucket bits of a state word.
    ///
    /// The caller is responsible for masking off everything except the bucket bits.
    #[must_use]
    pub(crate) const fn from_bits(bits: u64) -> Self {
        debug_assert!(bits < MAX_BUCKETS as u64);

        #[expect(
            clippy::cast_possible_truncation,
            reason = "bucket bits are at most three bits wide"
        )]
        let bits = bits as u8;

        Self(bits)
    }

    #[must_use]
    pub(crate) const fn to_bits(self) -> u64 {
        self.0 as u64
    }
}

impl TryFrom<usize> for BucketId {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        if index < MAX_BUCKETS {
            Ok(Self::new(index))
        } else {
            Err(Error::BucketOutOfRange { index })
        }
    }
}

impl From<BucketId> for usize {
    fn from(value: BucketId) -> Self {
        value.index()
    }
}

impl Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
