//! Static evaluation of KRK positions.
//!
//! Scores are always from White's point of view. The search scales them by
//! remaining depth, so a mate found sooner outranks a later one.

use crate::Position;

/// Score of a checkmate.
pub const MATE_SCORE: i32 = 1000;

/// Score of a check that is not mate.
pub const CHECK_SCORE: i32 = 50;

/// Score of a stalemate or a captured rook.
pub const DRAW_SCORE: i32 = 0;

/// Score of any other position.
///
/// Kept above zero so that an ordinary position still beats a draw.
pub const QUIET_SCORE: i32 = 1;

/// Evaluates `position` from White's perspective.
pub fn evaluate(position: &Position) -> i32 {
    if position.is_checkmate() {
        MATE_SCORE
    } else if position.is_check() {
        CHECK_SCORE
    } else if position.is_stalemate() {
        DRAW_SCORE
    } else {
        QUIET_SCORE
    }
}
