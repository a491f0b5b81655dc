use std::collections::BTreeMap;

use crate::domain::game::Game;
use crate::domain::player::PlayerId;
use crate::domain::round::{BetResult, Round};
use crate::domain::rules::points_for;
use crate::errors::domain::{DomainError, ValidationKind};

/// A player's cumulative score and rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placing {
    pub player_id: PlayerId,
    /// `None` once the player has left the roster.
    pub name: Option<String>,
    pub points: u32,
    /// 1-based; equal totals share a rank.
    pub rank: usize,
}

/// Points for every player with a result in a closed round.
///
/// Failure scores 0; success scores `bet * 2 + 10`.
pub fn round_points(round: &Round) -> Result<BTreeMap<PlayerId, u32>, DomainError> {
    if !round.is_over() {
        return Err(DomainError::validation(
            ValidationKind::RoundNotOver,
            "points are only known once the round is over",
        ));
    }
    round
        .results()
        .iter()
        .map(|(id, result)| {
            let points = match result {
                BetResult::Failure => 0,
                BetResult::Success => {
                    let bet = round.bet_for(id).ok_or_else(|| {
                        DomainError::validation(
                            ValidationKind::MissingBet,
                            format!("player '{id}' succeeded without a bet"),
                        )
                    })?;
                    points_for(bet, true).ok_or_else(|| {
                        DomainError::validation(
                            ValidationKind::ScoreOverflow,
                            format!("points for player '{id}' betting {bet} overflow"),
                        )
                    })?
                }
            };
            Ok((id.clone(), points))
        })
        .collect()
}

/// Totals over every closed round, sorted by points descending.
///
/// The sort is stable over encounter order: roster order first, then players
/// who have since left, by id.
pub fn placings(game: &Game) -> Result<Vec<Placing>, DomainError> {
    let mut totals: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for round in game.rounds().iter().filter(|r| r.is_over()) {
        for (id, points) in round_points(round)? {
            let total = totals.entry(id).or_insert(0);
            *total = total.checked_add(points).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::ScoreOverflow,
                    "cumulative points overflow",
                )
            })?;
        }
    }

    let mut ordered: Vec<(PlayerId, u32)> = Vec::with_capacity(totals.len());
    for player in game.players() {
        if let Some(points) = totals.remove(&player.id) {
            ordered.push((player.id.clone(), points));
        }
    }
    ordered.extend(totals);
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    let mut placings = Vec::with_capacity(ordered.len());
    let mut rank = 0;
    let mut previous = None;
    for (idx, (player_id, points)) in ordered.into_iter().enumerate() {
        if previous != Some(points) {
            rank = idx + 1;
            previous = Some(points);
        }
        placings.push(Placing {
            name: game.player(&player_id).map(|p| p.name.clone()),
            player_id,
            points,
            rank,
        });
    }
    Ok(placings)
}
