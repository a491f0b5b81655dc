//! Serializable snapshot shapes.
//!
//! Field names are camelCase on the wire. Unknown fields are ignored; missing
//! optional fields take their defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_game: Option<GameSnapshot>,
    /// Phase tag; absent means idle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finished_games: Vec<GameSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: String,
    pub players: Vec<PlayerSnapshot>,
    pub rounds: Vec<RoundSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round: Option<RoundSnapshot>,
    pub next_direction: DirectionSnapshot,
    pub next_player_index: usize,
    pub next_number_of_cards: u32,
    #[serde(default)]
    pub is_over: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    #[serde(default)]
    pub bets: BTreeMap<String, u32>,
    #[serde(default)]
    pub results: BTreeMap<String, BetResultSnapshot>,
    #[serde(default)]
    pub is_over: bool,
    #[serde(default = "default_number_of_cards")]
    pub number_of_cards: u32,
    #[serde(default)]
    pub first_player: usize,
}

fn default_number_of_cards() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionSnapshot {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetResultSnapshot {
    Success,
    Failure,
}
