use tracing::{debug, info};
use ulid::Ulid;

use crate::domain::player::{normalize_name, Player, PlayerId};
use crate::domain::round::{BetOutcome, BetResult, Round};
use crate::domain::rules::OPENING_HAND_SIZE;
use crate::domain::scoring::{self, Placing};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Whether hand sizes are currently growing or shrinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One playthrough.
///
/// Hand sizes climb by one per round while `Forward`; after the single flip
/// to `Backward` they shrink by one per round. `next_number_of_cards` never
/// drops below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: String,
    players: Vec<Player>,
    rounds: Vec<Round>,
    current_round: Option<Round>,
    next_direction: Direction,
    next_player_index: usize,
    next_number_of_cards: u32,
    is_over: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            id: Ulid::new().to_string(),
            players: Vec::new(),
            rounds: Vec::new(),
            current_round: None,
            next_direction: Direction::Forward,
            next_player_index: 0,
            next_number_of_cards: OPENING_HAND_SIZE,
            is_over: false,
        }
    }

    /// Rebuild a game exactly as persisted.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: String,
        players: Vec<Player>,
        rounds: Vec<Round>,
        current_round: Option<Round>,
        next_direction: Direction,
        next_player_index: usize,
        next_number_of_cards: u32,
        is_over: bool,
    ) -> Self {
        Self {
            id,
            players,
            rounds,
            current_round,
            next_direction,
            next_player_index,
            next_number_of_cards: next_number_of_cards.max(1),
            is_over,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Closed rounds, oldest first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn next_player_index(&self) -> usize {
        self.next_player_index
    }

    pub fn next_number_of_cards(&self) -> u32 {
        self.next_number_of_cards
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Look a player up by id, or failing that by exact normalized name.
    pub fn find_player(&self, key: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.id.as_str() == key)
            .or_else(|| {
                let name = normalize_name(key);
                self.players.iter().find(|p| p.name == name)
            })
    }

    /// Append a player with a fresh id.
    pub fn add_player(&mut self, name: &str) -> PlayerId {
        let player = Player::new(name);
        let id = player.id.clone();
        debug!(game_id = %self.id, player = %id, name = %player.name, "Player added");
        self.players.push(player);
        id
    }

    /// Remove a player; `None` if the id is not on the roster.
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| &p.id == id)?;
        let removed = self.players.remove(idx);
        if self.next_player_index >= self.players.len() {
            self.next_player_index = 0;
        }
        debug!(game_id = %self.id, player = %id, "Player removed");
        Some(removed)
    }

    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), DomainError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("no player '{id}' to rename"))
            })?;
        player.name = normalize_name(name);
        debug!(game_id = %self.id, player = %id, name = %player.name, "Player renamed");
        Ok(())
    }

    /// Open the next round and return it.
    ///
    /// An unclosed current round is closed first. The new round uses
    /// `next_number_of_cards` and `next_player_index`; both then advance.
    pub fn start_round(&mut self) -> &Round {
        self.end_round();

        let round = Round::new(self.next_number_of_cards, self.next_player_index);
        self.next_player_index = match self.players.len() {
            0 => 0,
            n => (self.next_player_index + 1) % n,
        };
        self.next_number_of_cards = match self.next_direction {
            Direction::Forward => self.next_number_of_cards + 1,
            Direction::Backward => self.next_number_of_cards.saturating_sub(1).max(1),
        };

        info!(
            game_id = %self.id,
            round_no = self.rounds.len() + 1,
            number_of_cards = round.number_of_cards(),
            first_player = round.first_player(),
            "Round started"
        );
        self.current_round.insert(round)
    }

    /// Close the current round and archive it. No-op without an open round.
    pub fn end_round(&mut self) {
        let Some(round) = self.current_round.as_mut() else {
            return;
        };
        if round.close() {
            self.rounds.push(round.clone());
            info!(
                game_id = %self.id,
                round_no = self.rounds.len(),
                number_of_cards = round.number_of_cards(),
                "Round closed"
            );
        }
    }

    pub(crate) fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.current_round.as_mut()
    }

    pub fn require_round(&self) -> Result<&Round, DomainError> {
        self.current_round.as_ref().ok_or_else(no_round)
    }

    /// Bet on the current round; see `Round::place_bet`.
    pub fn place_bet(&mut self, player: &PlayerId, bet: u32) -> Result<BetOutcome, DomainError> {
        let round = self.current_round.as_mut().ok_or_else(no_round)?;
        round.place_bet(&self.players, player, bet)
    }

    /// Record a result on the current round; see `Round::record_result`.
    pub fn record_result(&mut self, player: &PlayerId, result: BetResult) -> Result<(), DomainError> {
        let round = self.current_round.as_mut().ok_or_else(no_round)?;
        round.record_result(&self.players, player, result)
    }

    /// Hand size of the closed round before the current one (0 if none).
    fn previous_hand_size(&self) -> u32 {
        let current_archived = self.current_round.as_ref().is_some_and(Round::is_over);
        self.rounds
            .iter()
            .rev()
            .nth(usize::from(current_archived))
            .map_or(0, Round::number_of_cards)
    }

    /// The current round is larger than the one before it.
    fn is_ascending(&self) -> bool {
        self.current_round
            .as_ref()
            .is_some_and(|r| r.number_of_cards() > self.previous_hand_size())
    }

    /// Hand sizes are still climbing, so the return may begin.
    pub fn can_start_return(&self) -> bool {
        self.is_ascending()
    }

    /// Flip to `Backward`. The next round repeats the current hand size and
    /// each later one is one card smaller. Returns `false` (and changes
    /// nothing) if the flip already happened or hand sizes are not climbing.
    ///
    /// Flipping only the direction would leave `next_number_of_cards` at
    /// `peak + 1` and deal one larger hand after the turn. This re-aims the
    /// counter instead, so a game peaking at `k` plays `.., k - 1, k, k, k - 1, ..`.
    pub fn start_return(&mut self) -> bool {
        if self.next_direction == Direction::Backward || !self.can_start_return() {
            return false;
        }
        let Some(peak) = self.current_round.as_ref().map(Round::number_of_cards) else {
            return false;
        };
        self.next_direction = Direction::Backward;
        self.next_number_of_cards = peak;
        info!(game_id = %self.id, peak, "Return started");
        true
    }

    /// A descending one-card round has been played.
    pub fn is_game_over(&self) -> bool {
        self.next_direction == Direction::Backward
            && self
                .current_round
                .as_ref()
                .is_some_and(|r| r.number_of_cards() == 1)
            && !self.is_ascending()
    }

    pub(crate) fn finish(&mut self) {
        self.is_over = true;
    }

    /// Cumulative totals over closed rounds, best first.
    pub fn placings(&self) -> Result<Vec<Placing>, DomainError> {
        scoring::placings(self)
    }
}

fn no_round() -> DomainError {
    DomainError::not_found(NotFoundKind::Round, "no round in progress")
}
