#[cfg(test)]
use crate::pal::MockTimeSource;
use crate::pal::{MonotonicTimeSource, TimeSource};

/// Static dispatch over the available time sources.
#[derive(Debug)]
pub(crate) enum TimeSourceFacade {
    Monotonic(MonotonicTimeSource),

    #[cfg(test)]
    Mock(MockTimeSource),
}

impl TimeSourceFacade {
    pub(crate) fn real() -> Self {
        MonotonicTimeSource::new().into()
    }
}

impl From<MonotonicTimeSource> for TimeSourceFacade {
    fn from(source: MonotonicTimeSource) -> Self {
        Self::Monotonic(source)
    }
}

#[cfg(test)]
impl From<MockTimeSource> for TimeSourceFacade {
    fn from(source: MockTimeSource) -> Self {
        Self::Mock(source)
    }
}

impl TimeSource for TimeSourceFacade {
    fn now_nanos(&self) -> u64 {
        match self {
            Self::Monotonic(source) => source.now_nanos(),
            #[cfg(test)]
            Self::Mock(source) => source.now_nanos(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn mock_is_passed_through() {
        let mut mock = MockTimeSource::new();
        mock.expect_now_nanos().times(2).return_const(777_u64);

        let facade = TimeSourceFacade::from(mock);

        assert_eq!(facade.now_nanos(), 777);
        assert_eq!(facade.now_nanos(), 777);
    }
}
