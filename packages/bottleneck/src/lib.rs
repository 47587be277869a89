#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Find out where the time goes, with lock-free bookkeeping.
//!
//! An [`Accumulator`] attributes elapsed wall-clock time to a small fixed set of buckets,
//! such as the phases of a loop or the stages of a pipeline. The code being measured
//! announces which bucket it is entering by calling [`Accumulator::advance()`]; all the
//! time until the next `advance()` belongs to that bucket.
//!
//! At any point, any thread can take a [`Snapshot`] of the cumulative duration, call count
//! and share of total time of every bucket, either via the accumulator itself or via an
//! [`Observer`] handle.
//!
//! # Which takes longer, creating the data or sorting it?
//!
//! ```
//! use bottleneck::{Accumulator, BucketId};
//!
//! const CREATE: BucketId = BucketId::new(0);
//! const SORT: BucketId = BucketId::new(1);
//!
//! let mut accumulator = Accumulator::builder()
//!     .bucket_names(&["create", "sort"])
//!     .build();
//!
//! accumulator.advance(CREATE);
//! let mut values = (0..100_000_u64)
//!     .map(|x| x.wrapping_mul(2_654_435_761) % 1_000_003)
//!     .collect::<Vec<_>>();
//!
//! accumulator.advance(SORT);
//! values.sort_unstable();
//!
//! // Prints lines like "sort: 71.5% 4.2ms (0 calls)"
//! println!("{}", accumulator.snapshot());
//! ```
//!
//! # Monitoring from another thread
//!
//! The accumulator is the single writer. Readers obtain an [`Observer`], which can be cloned
//! and sent to any number of threads:
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//!
//! use bottleneck::{Accumulator, BucketId};
//!
//! const IDLE: BucketId = BucketId::new(0);
//! const JOB: BucketId = BucketId::new(1);
//!
//! let mut accumulator = Accumulator::new(2);
//! let observer = accumulator.observer();
//!
//! let worker = thread::spawn(move || {
//!     for _ in 0..3 {
//!         accumulator.advance(JOB);
//!         thread::sleep(Duration::from_millis(2));
//!         accumulator.advance(IDLE);
//!     }
//! });
//!
//! let snapshot = observer.snapshot();
//! println!("job: {:.1}%", snapshot[JOB].percentage() * 100.0);
//!
//! worker.join().unwrap();
//! ```
//!
//! # Consistency
//!
//! The active bucket and the moment it became active are kept in a single atomic word.
//! A snapshot closes out the active interval with a compare-and-swap that restarts it at
//! the current time, retrying if the writer got there first. The writer replaces the word
//! with a compare-and-swap too, never starting the new interval earlier than the point a
//! snapshot already closed out. Every nanosecond is therefore attributed exactly once.
//!
//! The duration and call count of a bucket are updated separately, so a snapshot may see
//! the duration of a just-completed interval without its call (or the other way around).
//! Each value on its own never decreases.
//!
//! Time is read from a monotonic clock that starts when the accumulator is created.

mod accumulator;
mod bucket_id;
mod builder;
mod error;
mod observer;
mod pal;
mod snapshot;
mod state_word;
mod timeline;

pub use accumulator::*;
pub use bucket_id::*;
pub use builder::*;
pub use error::Error;
pub(crate) use error::Result;
pub use observer::*;
pub use snapshot::*;
