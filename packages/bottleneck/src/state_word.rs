//! Packing of the active bucket and its activation timestamp into a single `u64`.
//!
//! Layout, most significant bit first:
//!
//! ```text
//! | bucket (3 bits) | timestamp in nanoseconds (61 bits) |
//! ```
//!
//! The all-zero word is reserved to mean that no interval has been started yet. Timestamps
//! are always at least 1, so a valid word is never zero even for bucket 0.

use crate::BucketId;

const BUCKET_BITS: u32 = 3;
const TIMESTAMP_BITS: u32 = u64::BITS - BUCKET_BITS;
const TIMESTAMP_MASK: u64 = (1 << TIMESTAMP_BITS) - 1;

/// The largest timestamp that can be stored. Later timestamps saturate to this value.
///
/// 2^61 nanoseconds is roughly 73 years, measured from when the accumulator was created.
pub(crate) const MAX_TIMESTAMP: u64 = TIMESTAMP_MASK;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StateWord(u64);

impl StateWord {
    pub(crate) const UNSET: Self = Self(0);

    /// # Panics
    ///
    /// Panics in debug builds if `timestamp` is zero, which would make the word
    /// indistinguishable from `UNSET` for bucket 0.
    #[must_use]
    pub(crate) fn new(bucket: BucketId, timestamp: u64) -> Self {
        debug_assert!(timestamp != 0, "timestamp zero is reserved for the unset state");

        let timestamp = timestamp.min(MAX_TIMESTAMP);

        Self((bucket.to_bits() << TIMESTAMP_BITS) | timestamp)
    }

    #[must_use]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub(crate) const fn to_raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub(crate) const fn is_unset(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub(crate) const fn bucket(self) -> BucketId {
        BucketId::from_bits(self.0 >> TIMESTAMP_BITS)
    }

    #[must_use]
    pub(crate) const fn timestamp(self) -> u64 {
        self.0 & TIMESTAMP_MASK
    }
}
