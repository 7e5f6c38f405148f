//! Score formula.

/// Score before penalties.
pub const BASE_SCORE: u32 = 1000;

/// Penalty per move.
pub const MOVE_PENALTY: u32 = 5;

/// `max(1000 - (elapsed + moves * 5), 0)`.
///
/// ```
/// use memory_match::game::score::calculate_score;
///
/// assert_eq!(calculate_score(20, 10), 930);
/// assert_eq!(calculate_score(5000, 0), 0);
/// ```
#[must_use]
pub fn calculate_score(elapsed_seconds: u32, moves: u32) -> u32 {
    let penalty = elapsed_seconds.saturating_add(moves.saturating_mul(MOVE_PENALTY));
    BASE_SCORE.saturating_sub(penalty)
}
