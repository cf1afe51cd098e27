//! Shared test utilities for integration tests.
//! Included by the test binaries, not compiled as one.
#![allow(dead_code)]

pub mod fixtures;
pub mod mock;
