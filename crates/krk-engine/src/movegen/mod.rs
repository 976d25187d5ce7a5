//! Move generation.
//!
//! - [`attacks`]: pseudo-legal king and rook movement
//! - [`MoveList`]: fixed-capacity list of generated moves
//! - [`perft`]: leaf counting for validating the legal move generator
//!
//! Legal move filtering itself lives on [`Position`](crate::Position), which
//! owns the piece squares and the memo of already generated lists.

pub mod attacks;
pub mod perft;

pub use attacks::{king_attacks, king_moves, rook_attacks, rook_line_attacks, rook_moves};
pub use perft::{perft, perft_divide};

use krk_core::{Move, Square};

/// A list of moves with a fixed maximum capacity.
///
/// A KRK position has at most 22 legal moves (14 rook moves plus 8 king
/// moves), so a small array avoids heap allocation and makes the list `Copy`,
/// which lets the legal-move memo hand out lists by value.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Capacity of the list.
    pub const MAX_MOVES: usize = 32;

    const EMPTY_SLOT: Move = Move::new(Square::A1, Square::A1);

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::EMPTY_SLOT; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Returns the moves in 4-character notation.
    pub fn to_uci(&self) -> Vec<String> {
        self.as_slice().iter().map(|m| m.to_uci()).collect()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MoveList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for MoveList {}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
