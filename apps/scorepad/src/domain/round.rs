use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::player::{Player, PlayerId};
use crate::domain::rules::forbidden_last_bet;
use crate::domain::scoring;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Whether a player's bet matched the tricks actually taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetResult {
    Success,
    Failure,
}

/// What happened to a bet submitted during round setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetOutcome {
    Recorded,
    /// Not applied; the round is unchanged.
    Rejected,
}

/// One hand.
///
/// Created only by `Game::start_round`. Bets and results are keyed by player
/// id and only ever hold ids that were on the roster when recorded. Once
/// closed the round no longer accepts bets or results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    number_of_cards: u32,
    first_player: usize,
    bets: BTreeMap<PlayerId, u32>,
    results: BTreeMap<PlayerId, BetResult>,
    is_over: bool,
}

impl Round {
    pub(crate) fn new(number_of_cards: u32, first_player: usize) -> Self {
        Self {
            number_of_cards,
            first_player,
            bets: BTreeMap::new(),
            results: BTreeMap::new(),
            is_over: false,
        }
    }

    /// Rebuild a round exactly as persisted.
    pub(crate) fn from_parts(
        number_of_cards: u32,
        first_player: usize,
        bets: BTreeMap<PlayerId, u32>,
        results: BTreeMap<PlayerId, BetResult>,
        is_over: bool,
    ) -> Self {
        Self {
            number_of_cards,
            first_player,
            bets,
            results,
            is_over,
        }
    }

    pub fn number_of_cards(&self) -> u32 {
        self.number_of_cards
    }

    /// Roster index of the player who acts first this round.
    pub fn first_player(&self) -> usize {
        self.first_player
    }

    pub fn bets(&self) -> &BTreeMap<PlayerId, u32> {
        &self.bets
    }

    pub fn bet_for(&self, player: &PlayerId) -> Option<u32> {
        self.bets.get(player).copied()
    }

    pub fn results(&self) -> &BTreeMap<PlayerId, BetResult> {
        &self.results
    }

    pub fn result_for(&self, player: &PlayerId) -> Option<BetResult> {
        self.results.get(player).copied()
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Roster in turn order for this round, starting at `first_player` and wrapping.
    pub fn players_order<'p>(&self, players: &'p [Player]) -> Vec<&'p Player> {
        if players.is_empty() {
            return Vec::new();
        }
        let start = self.first_player % players.len();
        players[start..].iter().chain(&players[..start]).collect()
    }

    /// The player who bets last this round.
    pub fn last_player<'p>(&self, players: &'p [Player]) -> Option<&'p Player> {
        self.players_order(players).last().copied()
    }

    /// Value the last player may not bet, given the bets recorded so far.
    pub fn forbidden_last_bet(&self, players: &[Player]) -> Option<u32> {
        let last = self.last_player(players)?;
        // A total past u32::MAX already overshoots any hand.
        let others_total = self
            .bets
            .iter()
            .filter(|(id, _)| **id != last.id)
            .try_fold(0u32, |acc, (_, bet)| acc.checked_add(*bet))?;
        forbidden_last_bet(self.number_of_cards, others_total)
    }

    /// Record `player`'s bet.
    ///
    /// The last player's bet is rejected when it would make the bets add up to
    /// the hand size. When anyone else changes their bet, the last player's bet
    /// is dropped so it gets re-entered against the new total.
    pub fn place_bet(
        &mut self,
        players: &[Player],
        player: &PlayerId,
        bet: u32,
    ) -> Result<BetOutcome, DomainError> {
        require_member(players, player)?;
        if self.is_over {
            warn!(player = %player, "Bet ignored: round is closed");
            return Ok(BetOutcome::Rejected);
        }

        let last = self.last_player(players).map(|p| p.id.clone());
        if last.as_ref() == Some(player) {
            if self.forbidden_last_bet(players) == Some(bet) {
                warn!(
                    player = %player,
                    bet,
                    number_of_cards = self.number_of_cards,
                    "Last bet rejected: total would equal hand size"
                );
                return Ok(BetOutcome::Rejected);
            }
            self.bets.insert(player.clone(), bet);
            debug!(player = %player, bet, "Last bet recorded");
            return Ok(BetOutcome::Recorded);
        }

        let previous = self.bets.insert(player.clone(), bet);
        debug!(player = %player, bet, "Bet recorded");
        if previous != Some(bet) {
            if let Some(last) = last {
                if self.bets.remove(&last).is_some() {
                    debug!(player = %last, "Last bet cleared after earlier bet changed");
                }
            }
        }
        Ok(BetOutcome::Recorded)
    }

    /// Every roster player has a bet.
    pub fn has_all_bets(&self, players: &[Player]) -> bool {
        players.iter().all(|p| self.bets.contains_key(&p.id))
    }

    /// Record whether `player` made their bet. Ignored once the round is closed.
    pub fn record_result(
        &mut self,
        players: &[Player],
        player: &PlayerId,
        result: BetResult,
    ) -> Result<(), DomainError> {
        require_member(players, player)?;
        if self.is_over {
            warn!(player = %player, "Result ignored: round is closed");
            return Ok(());
        }
        self.results.insert(player.clone(), result);
        debug!(player = %player, ?result, "Result recorded");
        Ok(())
    }

    /// Every roster player has a result and at least one of them failed.
    pub fn can_be_closed(&self, players: &[Player]) -> bool {
        let all_recorded = players.iter().all(|p| self.results.contains_key(&p.id));
        let any_failure = self.results.values().any(|r| *r == BetResult::Failure);
        all_recorded && any_failure
    }

    /// Mark the round over. Returns `false` if it already was.
    pub(crate) fn close(&mut self) -> bool {
        if self.is_over {
            return false;
        }
        self.is_over = true;
        true
    }

    /// Points per player for this closed round.
    pub fn points(&self) -> Result<BTreeMap<PlayerId, u32>, DomainError> {
        scoring::round_points(self)
    }
}

fn require_member(players: &[Player], player: &PlayerId) -> Result<(), DomainError> {
    if players.iter().any(|p| &p.id == player) {
        Ok(())
    } else {
        Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("no player '{player}' in this game"),
        ))
    }
}
