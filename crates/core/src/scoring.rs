//! Scoring module - points per lock and level progression
//!
//! A lock scores a fixed table value for the rows it clears at once plus a flat
//! bonus for the piece itself. There are no combos, back-to-backs or drop points.

use crate::types::{level_for_lines, LINE_SCORES, PIECE_LOCK_BONUS};

/// Points for clearing `lines` rows with a single lock
///
/// Anything outside 0..=4 cannot come out of one lock and scores nothing.
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Score delta for one lock event.
///
/// `had_piece` is false when the lock ran with no active piece (the first tick
/// of a game), in which case the flat bonus is withheld.
pub fn calculate_score(lines: usize, had_piece: bool) -> u32 {
    let bonus = if had_piece { PIECE_LOCK_BONUS } else { 0 };
    calculate_line_score(lines) + bonus
}

/// Level management
/// Level increases every 20 lines cleared, capped at 10
pub fn calculate_level(total_lines: u32) -> u32 {
    level_for_lines(total_lines)
}
