//! Core types for the king and rook versus king (KRK) endgame.
//!
//! This crate provides the value types shared by the engine and its front ends:
//! - [`Color`] for the two sides
//! - [`Square`] for board coordinates as (row, col) pairs
//! - [`Piece`] for the two piece kinds that exist in KRK
//! - [`Move`] for the 4-character from/to move encoding
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser, KrkPlacement};
pub use mov::{Move, MoveParseError};
pub use piece::Piece;
pub use square::{Square, SquareParseError};
