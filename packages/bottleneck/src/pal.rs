//! Platform abstraction layer for reading the current time.
//!
//! Production code reads a monotonic clock. Tests substitute a mock time source so that
//! the attribution protocol can be verified against exact, scripted timestamps.

mod abstractions;
mod facade;
mod monotonic;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
pub(crate) use monotonic::*;
