//! Fixed rules of the game, kept free of any entity state.

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Hand size of the opening round.
pub const OPENING_HAND_SIZE: u32 = 1;

/// Flat bonus for a successful bet.
pub const SUCCESS_BONUS: u32 = 10;

/// Points per bid trick on a successful bet.
pub const POINTS_PER_TRICK: u32 = 2;

/// Points earned for one result: `bet * 2 + 10` on success, nothing on failure.
/// `None` if the score does not fit in a `u32`.
pub fn points_for(bet: u32, success: bool) -> Option<u32> {
    if success {
        bet.checked_mul(POINTS_PER_TRICK)?.checked_add(SUCCESS_BONUS)
    } else {
        Some(0)
    }
}

/// The one bet the last player in turn order may not make.
///
/// `others_total` is the sum of every other player's bet. The forbidden value
/// makes the bets add up to exactly the hand size; `None` when the others
/// already overshoot it.
pub fn forbidden_last_bet(number_of_cards: u32, others_total: u32) -> Option<u32> {
    number_of_cards.checked_sub(others_total)
}
