use std::time::Instant;

use crate::pal::TimeSource;

/// Measures time from the moment of creation using the operating system monotonic clock.
#[derive(Debug)]
pub(crate) struct MonotonicTimeSource {
    epoch: Instant,
}

impl MonotonicTimeSource {
    pub(crate) fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now_nanos(&self) -> u64 {
        // u64 nanoseconds last for centuries. Saturating keeps us monotonic regardless.
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}
