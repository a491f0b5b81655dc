#![allow(unused_imports)]


// Re-export only the drivers most tests need
pub use game_phases::{play_round, start_with_players};
