//! Test support shared by the scorepad unit and integration tests.
//!
//! Holds the one-time tracing setup and the proptest configuration so every
//! test binary behaves the same way.

pub mod logging;
pub mod proptest_prelude;

pub use proptest_prelude::proptest_config;
