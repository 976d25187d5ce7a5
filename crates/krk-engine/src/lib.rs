//! Move generation and forced-mate search for the KRK endgame.
//!
//! This crate provides:
//! - [`Position`] - piece squares, side to move and undo history, with
//!   check, checkmate and stalemate detection
//! - [`movegen`] - pseudo-legal king and rook movement, [`MoveList`], perft
//! - [`PositionKey`] - exact integer identity of a position
//! - [`search`] - negamax with alpha-beta pruning and a transposition table
//! - [`MateHunt`] - plays best moves until mate, stalemate or a ply cap
//!
//! # Architecture
//!
//! There are never more than three pieces, so a position is stored as three
//! squares rather than bitboards. [`SquareSet`] packs the squares a piece
//! guards into a mask for fast membership tests during legal move filtering.
//!
//! # Example
//!
//! ```
//! use krk_engine::{find_best_move, Position};
//!
//! let mut position = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 w - - 4 3").unwrap();
//! let result = find_best_move(&mut position, 2);
//! let mv = result.best_move.unwrap();
//! assert_eq!(mv.to_uci(), "h5h1");
//!
//! position.push_move(mv);
//! assert!(position.is_checkmate());
//! ```

pub mod eval;
mod hash;
pub mod hunt;
pub mod movegen;
mod position;
pub mod search;
mod square_set;

pub use hash::PositionKey;
pub use hunt::{HuntConfig, HuntOutcome, HuntReport, MateHunt, PlyRecord};
pub use movegen::{perft, perft_divide, MoveList};
pub use position::{GameState, Position, PositionError};
pub use search::{find_best_move, Score, SearchResult, SearchStats, Searcher};
pub use square_set::SquareSet;
