//! One-time tracing setup for test binaries.
//!
//! `TEST_LOG` picks the level for scorepad tests, falling back to `RUST_LOG`
//! and then to warnings only:
//!
//! ```bash
//! TEST_LOG=scorepad=debug cargo test -p scorepad
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

const LEVEL_VARS: [&str; 2] = ["TEST_LOG", "RUST_LOG"];
const QUIET: &str = "warn";

static SUBSCRIBER: OnceCell<bool> = OnceCell::new();

/// First non-blank directive from `lookup` over [`LEVEL_VARS`], else [`QUIET`].
fn directive_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    LEVEL_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| QUIET.to_string())
}

/// Install the scorepad test subscriber. Later calls are no-ops.
///
/// Returns whether this process's subscriber is ours; `false` means another
/// global subscriber was already in place.
pub fn init() -> bool {
    *SUBSCRIBER.get_or_init(|| {
        let directive = directive_from(|var| std::env::var(var).ok());
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_test_writer()
            .with_target(false)
            .without_time()
            .compact()
            .try_init()
            .is_ok()
    })
}
