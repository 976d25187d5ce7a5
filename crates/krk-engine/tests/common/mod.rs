//! Helpers shared by the integration tests.

#![allow(dead_code)]

use krk_core::{Color, Move, Square};
use krk_engine::Position;
use proptest::prelude::*;

/// Any valid starting position: distinct squares, kings apart, and Black
/// not in check when White is to move.
pub fn any_position() -> impl Strategy<Value = Position> {
    (0u8..64, 0u8..64, 0u8..64, any::<bool>()).prop_filter_map(
        "invalid placement",
        |(wk, wr, bk, white)| {
            let side = if white { Color::White } else { Color::Black };
            Position::new(
                Square::from_index(wk)?,
                Square::from_index(wr)?,
                Square::from_index(bk)?,
                side,
            )
            .ok()
        },
    )
}

/// A valid position followed by up to `max_plies` random legal moves.
pub fn played_position(max_plies: usize) -> impl Strategy<Value = Position> {
    (any_position(), proptest::collection::vec(any::<u8>(), 0..=max_plies)).prop_map(
        |(mut position, picks)| {
            for pick in picks {
                let moves = position.legal_moves();
                if moves.is_empty() {
                    break;
                }
                let m = moves[pick as usize % moves.len()];
                position.push_move(m);
            }
            position
        },
    )
}

pub fn mv(uci: &str) -> Move {
    Move::from_uci(uci).unwrap()
}
