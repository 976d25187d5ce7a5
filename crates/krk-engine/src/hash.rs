//! Position identity keys.
//!
//! With only three pieces on the board a position can be packed exactly into
//! an integer, so unlike a Zobrist key there are no collisions to guard
//! against: equal keys mean equal positions.

use krk_core::{Color, Square};

use crate::Position;

/// Exact identity of a KRK position.
///
/// Packs the side to move, the three piece squares and the rook-captured flag
/// as `side + 2 * (bk + 64 * (wk + 64 * (wr + 64 * captured)))`, with `side`
/// being 1 for White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(u32);

impl PositionKey {
    /// Returns the key of the current state of `position`.
    #[inline]
    pub fn of(position: &Position) -> Self {
        let s = &position.state;
        Self::from_parts(
            s.side_to_move,
            s.white_king,
            s.white_rook,
            s.black_king,
            s.rook_captured,
        )
    }

    /// Packs the given fields into a key.
    pub fn from_parts(
        side_to_move: Color,
        white_king: Square,
        white_rook: Square,
        black_king: Square,
        rook_captured: bool,
    ) -> Self {
        let side = u32::from(side_to_move == Color::White);
        let captured = u32::from(rook_captured);
        let squares = u32::from(black_king.index())
            + 64 * (u32::from(white_king.index())
                + 64 * (u32::from(white_rook.index()) + 64 * captured));
        PositionKey(side + 2 * squares)
    }

    /// Returns the packed value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}
