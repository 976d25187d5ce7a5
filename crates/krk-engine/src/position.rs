//! KRK position representation.
//!
//! A [`Position`] owns the three piece squares, the side to move and the
//! rook-captured flag, together with an undo history and a memo of legal
//! move lists keyed by [`PositionKey`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use krk_core::{Color, FenError, FenParser, Move, MoveParseError, Piece, Square};
use thiserror::Error;

use crate::movegen::{king_attacks, king_moves, rook_attacks, rook_line_attacks, rook_moves};
use crate::{MoveList, PositionKey, SquareSet};

/// Errors raised when building or mutating a position from external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("two pieces share the square {0}")]
    OverlappingPieces(Square),

    #[error("kings on {0} and {1} are adjacent")]
    KingsAdjacent(Square, Square),

    #[error("black king is in check with White to move")]
    OpponentInCheck,

    #[error(transparent)]
    InvalidMove(#[from] MoveParseError),

    #[error("illegal move: {0}")]
    IllegalMove(Move),
}

/// Coarse status of a position, derived from the check and mate predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The side to move has legal moves and the game goes on.
    Ongoing,
    /// Black is in check and has no legal move.
    Checkmate,
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// Black captured the rook; king versus king is a draw.
    RookCaptured,
}

/// The mutable fields of a position, snapshotted on every push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoardState {
    pub(crate) white_king: Square,
    pub(crate) white_rook: Square,
    pub(crate) black_king: Square,
    pub(crate) rook_captured: bool,
    pub(crate) side_to_move: Color,
}

/// A king and rook versus king position with undo history.
///
/// Once the rook has been captured its square is kept only for hashing and
/// is not reported by [`Position::white_rook`].
#[derive(Clone)]
pub struct Position {
    pub(crate) state: BoardState,
    move_stack: Vec<Move>,
    state_stack: Vec<BoardState>,
    legal_cache: RefCell<HashMap<PositionKey, MoveList>>,
}

impl Position {
    /// Creates a position from the three piece squares.
    ///
    /// Rejects overlapping pieces, adjacent kings, and positions where Black
    /// is in check although White is to move.
    pub fn new(
        white_king: Square,
        white_rook: Square,
        black_king: Square,
        side_to_move: Color,
    ) -> Result<Self, PositionError> {
        if white_king == white_rook || white_king == black_king {
            return Err(PositionError::OverlappingPieces(white_king));
        }
        if white_rook == black_king {
            return Err(PositionError::OverlappingPieces(white_rook));
        }
        if white_king.is_adjacent(black_king) {
            return Err(PositionError::KingsAdjacent(white_king, black_king));
        }
        if side_to_move == Color::White && rook_line_attacks(white_rook, black_king, white_king) {
            return Err(PositionError::OpponentInCheck);
        }

        Ok(Position {
            state: BoardState {
                white_king,
                white_rook,
                black_king,
                rook_captured: false,
                side_to_move,
            },
            move_stack: Vec::new(),
            state_stack: Vec::new(),
            legal_cache: RefCell::new(HashMap::new()),
        })
    }

    /// Creates a position from a FEN string holding exactly `K`, `R` and `k`.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let placement = FenParser::parse(fen)?.krk_squares()?;
        Position::new(
            placement.white_king,
            placement.white_rook,
            placement.black_king,
            placement.side_to_move,
        )
    }

    /// Returns a copy of the current state with empty history and memo.
    pub fn copy(&self) -> Self {
        Position {
            state: self.state,
            move_stack: Vec::new(),
            state_stack: Vec::new(),
            legal_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the white king's square.
    #[inline]
    pub fn white_king(&self) -> Square {
        self.state.white_king
    }

    /// Returns the black king's square.
    #[inline]
    pub fn black_king(&self) -> Square {
        self.state.black_king
    }

    /// Returns the rook's square, or `None` once it has been captured.
    #[inline]
    pub fn white_rook(&self) -> Option<Square> {
        (!self.state.rook_captured).then_some(self.state.white_rook)
    }

    /// Returns true once Black has captured the rook.
    #[inline]
    pub fn rook_captured(&self) -> bool {
        self.state.rook_captured
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    /// Returns the moves applied so far, oldest first.
    pub fn move_stack(&self) -> &[Move] {
        &self.move_stack
    }

    /// Returns the identity of the current state.
    #[inline]
    pub fn key(&self) -> PositionKey {
        PositionKey::of(self)
    }

    /// Returns the piece standing on `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        if sq == self.state.white_king {
            Some((Piece::King, Color::White))
        } else if sq == self.state.black_king {
            Some((Piece::King, Color::Black))
        } else if self.white_rook() == Some(sq) {
            Some((Piece::Rook, Color::White))
        } else {
            None
        }
    }

    /// Returns true if Black is to move and the rook attacks the black king.
    ///
    /// White can never be in check: a lone king does not attack at range.
    pub fn is_check(&self) -> bool {
        let s = &self.state;
        if s.side_to_move == Color::White || s.rook_captured {
            return false;
        }
        rook_line_attacks(s.white_rook, s.black_king, s.white_king)
    }

    /// Returns the legal moves for the side to move, in generation order.
    ///
    /// Results are memoised by [`PositionKey`]; a key fixes every field that
    /// influences legality, so entries never go stale.
    pub fn legal_moves(&self) -> MoveList {
        let key = self.key();
        if let Some(moves) = self.legal_cache.borrow().get(&key) {
            return *moves;
        }

        let moves = self.generate_legal_moves();
        self.legal_cache.borrow_mut().insert(key, moves);
        moves
    }

    fn generate_legal_moves(&self) -> MoveList {
        let s = self.state;
        let mut moves = MoveList::new();

        match s.side_to_move {
            Color::White => {
                let black_reach: SquareSet = king_moves(s.black_king, None).collect();
                if !s.rook_captured {
                    // Moving the rook can never expose the white king.
                    for to in rook_moves(s.white_rook, s.white_king) {
                        moves.push(Move::new(s.white_rook, to));
                    }
                }
                let own_rook = (!s.rook_captured).then_some(s.white_rook);
                for to in king_moves(s.white_king, own_rook) {
                    if !black_reach.contains(to) {
                        moves.push(Move::new(s.white_king, to));
                    }
                }
            }
            Color::Black => {
                let king_guard = king_attacks(s.white_king);
                let rook_guard = if s.rook_captured {
                    SquareSet::EMPTY
                } else {
                    rook_attacks(s.white_rook, s.white_king)
                };
                for to in king_moves(s.black_king, None) {
                    if king_guard.contains(to) {
                        continue;
                    }
                    // The rook's own square is never in its reach, so an
                    // unguarded rook can always be taken.
                    if rook_guard.contains(to) && to != s.white_rook {
                        continue;
                    }
                    moves.push(Move::new(s.black_king, to));
                }
            }
        }

        moves
    }

    /// Returns true if Black is in check with no legal move.
    pub fn is_checkmate(&self) -> bool {
        self.state.side_to_move == Color::Black && self.is_check() && self.legal_moves().is_empty()
    }

    /// Returns true if the rook is gone or the side to move is stuck without check.
    pub fn is_stalemate(&self) -> bool {
        self.state.rook_captured || (!self.is_check() && self.legal_moves().is_empty())
    }

    /// Returns the status of the position.
    pub fn game_state(&self) -> GameState {
        if self.is_checkmate() {
            GameState::Checkmate
        } else if self.state.rook_captured {
            GameState::RookCaptured
        } else if self.is_stalemate() {
            GameState::Stalemate
        } else {
            GameState::Ongoing
        }
    }

    /// Returns the heuristic score of the position from White's side.
    pub fn evaluate(&self) -> i32 {
        crate::eval::evaluate(self)
    }

    /// Applies `m` if it is legal, returning false (and changing nothing) otherwise.
    pub fn push_move(&mut self, m: Move) -> bool {
        if !self.legal_moves().contains(m) {
            return false;
        }

        self.move_stack.push(m);
        self.state_stack.push(self.state);
        self.apply(m);
        true
    }

    /// Parses and applies a move in 4-character notation.
    pub fn push_uci(&mut self, uci: &str) -> Result<(), PositionError> {
        let m: Move = uci.parse()?;
        if self.push_move(m) {
            Ok(())
        } else {
            Err(PositionError::IllegalMove(m))
        }
    }

    fn apply(&mut self, m: Move) {
        let s = &mut self.state;

        if !s.rook_captured && m.to() == s.white_rook {
            s.rook_captured = true;
        }

        // Squares are pairwise distinct, so exactly one piece matches.
        if m.from() == s.white_king {
            s.white_king = m.to();
        } else if m.from() == s.black_king {
            s.black_king = m.to();
        } else if m.from() == s.white_rook {
            s.white_rook = m.to();
        }

        s.side_to_move = s.side_to_move.opposite();
    }

    /// Undoes the last move, returning it, or `None` with no history.
    pub fn pop(&mut self) -> Option<Move> {
        let m = self.move_stack.pop()?;
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
        Some(m)
    }

    /// Returns the number of memoised legal move lists.
    pub fn move_cache_len(&self) -> usize {
        self.legal_cache.borrow().len()
    }

    /// Drops all memoised legal move lists.
    pub fn clear_move_cache(&self) {
        self.legal_cache.borrow_mut().clear();
    }

    /// Converts the position to a FEN string.
    ///
    /// A captured rook is omitted. Move clocks are not tracked and are
    /// written as `0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in (0..8u8).rev() {
            let mut empty_count = 0;
            for col in 0..8u8 {
                let piece = Square::new(row, col).and_then(|sq| self.piece_at(sq));
                if let Some((piece, color)) = piece {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.state.side_to_move.to_fen_char());
        fen.push_str(" - - 0 1");
        fen
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.move_stack == other.move_stack
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("white_king", &self.state.white_king)
            .field("white_rook", &self.white_rook())
            .field("black_king", &self.state.black_king)
            .field("side_to_move", &self.state.side_to_move)
            .field("moves", &self.move_stack)
            .finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8u8).rev() {
            for col in 0..8u8 {
                if col > 0 {
                    write!(f, " ")?;
                }
                let piece = Square::new(row, col).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some((piece, color)) => write!(f, "{}", piece.to_fen_char(color))?,
                    None => write!(f, ".")?,
                }
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap()
    }

    fn sorted(moves: MoveList) -> Vec<String> {
        let mut uci = moves.to_uci();
        uci.sort();
        uci
    }

    #[test]
    fn from_fen_places_pieces() {
        let pos = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 w - - 4 3").unwrap();
        assert_eq!(pos.white_king(), sq("e3"));
        assert_eq!(pos.white_rook(), Some(sq("h5")));
        assert_eq!(pos.black_king(), sq("e1"));
        assert_eq!(pos.side_to_move(), Color::White);
        assert!(!pos.rook_captured());
        assert_eq!(pos.piece_at(sq("h5")), Some((Piece::Rook, Color::White)));
        assert_eq!(pos.piece_at(sq("a1")), None);
    }

    #[test]
    fn rejects_invalid_placements() {
        assert_eq!(
            Position::new(sq("a1"), sq("a1"), sq("h8"), Color::White).unwrap_err(),
            PositionError::OverlappingPieces(sq("a1"))
        );
        assert_eq!(
            Position::new(sq("a1"), sq("h8"), sq("h8"), Color::Black).unwrap_err(),
            PositionError::OverlappingPieces(sq("h8"))
        );
        assert_eq!(
            Position::new(sq("e4"), sq("a1"), sq("e5"), Color::Black).unwrap_err(),
            PositionError::KingsAdjacent(sq("e4"), sq("e5"))
        );
        assert_eq!(
            Position::new(sq("e4"), sq("a1"), sq("a8"), Color::White).unwrap_err(),
            PositionError::OpponentInCheck
        );
        assert!(Position::new(sq("e4"), sq("a1"), sq("a8"), Color::Black).is_ok());
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/4K3/8/4k3 w - - 0 1"),
            Err(PositionError::Fen(FenError::MissingPiece('R')))
        ));
    }

    #[test]
    fn check_along_rank_and_file() {
        let pos = Position::from_fen("8/8/8/8/8/4K3/8/R3k3 b - - 0 1").unwrap();
        assert!(pos.is_check());

        let pos = Position::from_fen("4R3/8/8/8/8/6K1/8/4k3 b - - 0 1").unwrap();
        assert!(pos.is_check());
    }

    #[test]
    fn white_king_between_blocks_check() {
        // Rook a1, white king c1: d1..h1 are shielded.
        let pos = Position::from_fen("8/8/8/8/8/8/8/R1K2k2 b - - 0 1").unwrap();
        assert!(!pos.is_check());
        assert!(pos.legal_moves().contains(mv("f1g1")));
        assert!(pos.legal_moves().contains(mv("f1e1")));
    }

    #[test]
    fn white_to_move_is_never_check() {
        let pos = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 w - - 0 1").unwrap();
        assert!(!pos.is_check());
        assert!(!pos.is_checkmate());
    }

    #[test]
    fn white_moves_rook_first_then_safe_king_steps() {
        let pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        assert_eq!(
            pos.legal_moves().to_uci(),
            [
                "b3b4", "b3b5", "b3b6", "b3b7", "b3b8", "b3b2", "b3b1", "b3c3", "b3d3", "b3e3",
                "b3f3", "b3g3", "b3h3", "a3b2", "a3a2"
            ]
        );
    }

    #[test]
    fn black_king_avoids_guarded_squares() {
        let pos = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 b - - 0 1").unwrap();
        assert_eq!(sorted(pos.legal_moves()), ["e1d1", "e1f1"]);
    }

    #[test]
    fn black_king_cannot_retreat_along_check_line() {
        // Rook a1 checks along the first rank; f1 stays covered behind the king.
        let pos = Position::from_fen("8/8/8/8/8/8/2K5/R3k3 b - - 0 1").unwrap();
        assert!(pos.is_check());
        assert_eq!(sorted(pos.legal_moves()), ["e1e2", "e1f2"]);
    }

    #[test]
    fn black_king_may_take_undefended_rook() {
        let pos = Position::from_fen("8/8/8/8/8/8/4R3/4k2K b - - 0 1").unwrap();
        assert!(pos.is_check());
        assert!(pos.legal_moves().contains(mv("e1e2")));
    }

    #[test]
    fn black_king_may_not_take_defended_rook() {
        let pos = Position::from_fen("8/8/8/8/8/5K2/4R3/4k3 b - - 0 1").unwrap();
        assert!(pos.is_check());
        assert!(!pos.legal_moves().contains(mv("e1e2")));
        assert_eq!(sorted(pos.legal_moves()), ["e1d1", "e1f1"]);
    }

    #[test]
    fn checkmate_and_stalemate() {
        let mut pos = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 w - - 0 1").unwrap();
        assert!(pos.push_move(mv("h5h1")));
        assert!(pos.is_check());
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
        assert_eq!(pos.game_state(), GameState::Checkmate);

        // Black king a8, white king a6, rook on the b-file: no move and no check.
        let pos = Position::from_fen("k7/8/K7/8/8/8/8/1R6 b - - 0 1").unwrap();
        assert!(!pos.is_check());
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
        assert_eq!(pos.game_state(), GameState::Stalemate);
    }

    #[test]
    fn evaluate_scores() {
        let mut pos = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 w - - 0 1").unwrap();
        assert_eq!(pos.evaluate(), 1);
        assert!(pos.push_move(mv("h5h1")));
        assert_eq!(pos.evaluate(), 1000);

        // Rook checks on the fifth rank; the king can take it.
        let mut pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        assert!(pos.push_move(mv("b3b5")));
        assert!(pos.is_check());
        assert_eq!(pos.evaluate(), 50);

        let pos = Position::from_fen("k7/8/K7/8/8/8/8/1R6 b - - 0 1").unwrap();
        assert_eq!(pos.evaluate(), 0);
    }

    #[test]
    fn push_rejects_illegal_moves_without_mutation() {
        let mut pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        let before = pos.clone();
        assert!(!pos.push_move(mv("a3a4")));
        assert!(!pos.push_move(mv("b3a3")));
        assert!(!pos.push_move(mv("a5a6")));
        assert_eq!(pos, before);

        assert_eq!(
            pos.push_uci("a3b4"),
            Err(PositionError::IllegalMove(mv("a3b4")))
        );
        assert!(matches!(
            pos.push_uci("a3"),
            Err(PositionError::InvalidMove(_))
        ));
        assert!(pos.push_uci("a3b2").is_ok());
        assert_eq!(pos.side_to_move(), Color::Black);
    }

    #[test]
    fn pop_restores_previous_state() {
        let mut pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        let start = pos.clone();
        assert_eq!(pos.pop(), None);

        pos.push_move(mv("b3b4"));
        pos.push_move(mv("a5a6"));
        assert_eq!(pos.move_stack(), [mv("b3b4"), mv("a5a6")]);
        assert_eq!(pos.pop(), Some(mv("a5a6")));
        assert_eq!(pos.pop(), Some(mv("b3b4")));
        assert_eq!(pos, start);
        assert_eq!(pos.pop(), None);
    }

    #[test]
    fn rook_capture_is_permanent_draw() {
        // Black's only legal move takes the undefended rook.
        let mut pos = Position::from_fen("k7/1R6/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(pos.legal_moves().to_uci(), ["a8b7"]);
        assert!(pos.push_move(mv("a8b7")));
        assert!(pos.rook_captured());
        assert_eq!(pos.white_rook(), None);
        assert!(pos.is_stalemate());
        assert_eq!(pos.game_state(), GameState::RookCaptured);

        // Only king moves remain for White, and the draw sticks.
        let white = pos.legal_moves();
        assert!(white.as_slice().iter().all(|m| m.from() == sq("e1")));
        assert!(pos.push_move(white[0]));
        assert!(pos.is_stalemate());
        let black = pos.legal_moves();
        assert!(pos.push_move(black[0]));
        assert!(pos.is_stalemate());
        assert!(!pos.is_check());

        pos.pop();
        pos.pop();
        pos.pop();
        assert!(!pos.rook_captured());
    }

    #[test]
    fn memo_is_keyed_by_state() {
        let mut pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        let first = pos.legal_moves();
        assert_eq!(pos.move_cache_len(), 1);
        assert_eq!(pos.legal_moves(), first);
        assert_eq!(pos.move_cache_len(), 1);

        pos.push_move(mv("b3b4"));
        pos.legal_moves();
        assert_eq!(pos.move_cache_len(), 2);
        pos.pop();
        assert_eq!(pos.legal_moves(), first);

        pos.clear_move_cache();
        assert_eq!(pos.move_cache_len(), 0);
    }

    #[test]
    fn copy_drops_history() {
        let mut pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        pos.push_move(mv("b3b4"));
        let copy = pos.copy();
        assert!(copy.move_stack().is_empty());
        assert_eq!(copy.key(), pos.key());
        assert_eq!(copy.move_cache_len(), 0);
    }

    #[test]
    fn fen_export() {
        let fen = "8/8/8/7R/8/4K3/8/4k3 w - - 0 1";
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);

        let mut pos = Position::from_fen("k7/1R6/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        pos.push_move(mv("a8b7"));
        assert_eq!(pos.to_fen(), "8/1k6/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn display_board() {
        let pos = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        let expected = "\
. . . . . . . .
. . . . . . . .
. . . . . . . .
k . . . . . . .
. . . . . . . .
K R . . . . . .
. . . . . . . .
. . . . . . . .";
        assert_eq!(pos.to_string(), expected);
    }
}
