#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod session;
pub mod store;

// Re-exports for public API
pub use domain::{BetOutcome, BetResult, Direction, Game, Placing, Player, PlayerId, Round};
pub use error::AppError;
pub use errors::ErrorCode;
pub use session::{App, Phase, Session, State};
pub use store::{FileStore, MemoryStore, SnapshotStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    scorepad_test_support::logging::init();
}
