//! Shared proptest configuration.
//!
//! Env knobs:
//! - `PROPTEST_CASES`: cases per property (default 32, clamped to at least 1).
//! - `PROPTEST_MAX_SHRINK_MS`: cap on shrinking time in milliseconds.
//!
//! Generate valid inputs by construction rather than filtering with
//! `prop_assume!`; the session properties drive whole games and rejects are
//! expensive.

use proptest::prelude::ProptestConfig;

const DEFAULT_CASES: u32 = 32;

pub fn proptest_config() -> ProptestConfig {
    let base = ProptestConfig::default();

    let cases = env_u32("PROPTEST_CASES").unwrap_or(DEFAULT_CASES).max(1);
    let max_shrink_time = env_u32("PROPTEST_MAX_SHRINK_MS").unwrap_or(base.max_shrink_time);

    ProptestConfig {
        // No regression files: the crates under test are pure and cheap to re-run.
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|s| s.parse::<u32>().ok())
}
