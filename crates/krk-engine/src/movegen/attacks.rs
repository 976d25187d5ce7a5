//! Pseudo-legal movement of the king and the rook.
//!
//! These are pure functions of explicit square snapshots; they never look at
//! a [`Position`](crate::Position). The order in which squares are produced
//! is fixed, since search tie-breaks follow generation order.

use krk_core::Square;

use crate::SquareSet;

/// King steps as `(drow, dcol)`, in generation order.
const KING_STEPS: [(i8, i8); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Rook slide directions as `(drow, dcol)`, in generation order.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns the squares a king on `king` may step to, skipping `forbidden`.
///
/// White passes its own rook's square as `forbidden` so the king never lands
/// on it. Black passes `None`: stepping onto the rook is how it captures, and
/// whether that is allowed is decided by the caller.
pub fn king_moves(king: Square, forbidden: Option<Square>) -> impl Iterator<Item = Square> {
    KING_STEPS
        .into_iter()
        .filter_map(move |(dr, dc)| king.offset(dr, dc))
        .filter(move |&sq| Some(sq) != forbidden)
}

/// Returns every square guarded by a king on `king`.
pub fn king_attacks(king: Square) -> SquareSet {
    king_moves(king, None).collect()
}

/// Returns the squares a rook on `rook` may slide to.
///
/// Each direction stops at the board edge or just before `blocker` (the
/// white king). The black king does not stop the slide, so the squares
/// behind it stay covered.
pub fn rook_moves(rook: Square, blocker: Square) -> impl Iterator<Item = Square> {
    ROOK_DIRECTIONS.into_iter().flat_map(move |(dr, dc)| {
        std::iter::successors(rook.offset(dr, dc), move |sq| sq.offset(dr, dc))
            .take_while(move |&sq| sq != blocker)
    })
}

/// Returns the set of squares covered by a rook on `rook`, blocked by `blocker`.
pub fn rook_attacks(rook: Square, blocker: Square) -> SquareSet {
    rook_moves(rook, blocker).collect()
}

/// Returns true if a rook on `rook` attacks `target` along a rank or file,
/// with `blocker` able to stand strictly between them.
pub fn rook_line_attacks(rook: Square, target: Square, blocker: Square) -> bool {
    if rook.row() == target.row() {
        !(blocker.row() == target.row()
            && strictly_between(blocker.col(), rook.col(), target.col()))
    } else if rook.col() == target.col() {
        !(blocker.col() == target.col()
            && strictly_between(blocker.row(), rook.row(), target.row()))
    } else {
        false
    }
}

#[inline]
fn strictly_between(x: u8, a: u8, b: u8) -> bool {
    a.min(b) < x && x < a.max(b)
}
