//! Best-move search.
//!
//! A fixed-depth negamax with alpha-beta pruning, backed by a
//! [`TranspositionTable`]. The search is single threaded and walks one
//! [`Position`] in place through push/pop.

mod negamax;
pub mod tt;

pub use negamax::negamax;
pub use tt::{Bound, TranspositionTable, TtEntry};

use std::time::Instant;

use krk_core::Move;

use crate::Position;

/// Search score. Positive values favour the side the node is scored for.
pub type Score = i32;

/// Window bound larger than any reachable score.
pub const INFINITY: Score = 1_000_000_000;

/// Score and move returned by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    /// `None` at terminal positions, or when every move failed low.
    pub best_move: Option<Move>,
}

/// Counters collected while searching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,
    pub beta_cutoffs: u64,
}

/// Runs searches against a transposition table it owns.
///
/// The table persists between calls until [`Searcher::clear`] is called.
#[derive(Debug, Default)]
pub struct Searcher {
    table: TranspositionTable,
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `position` to `depth` plies for the side to move.
    ///
    /// The score is relative to the side to move. `best_move` is `None` when
    /// the position is already checkmate or stalemate. The position is
    /// restored before returning.
    pub fn find_best_move(&mut self, position: &mut Position, depth: u32) -> SearchResult {
        let start = Instant::now();
        let before = self.stats;
        let color = position.side_to_move().sign();

        let result = negamax(
            position,
            depth,
            -INFINITY,
            INFINITY,
            color,
            &mut self.table,
            &mut self.stats,
        );

        tracing::debug!(
            "depth {} score {} move {} nodes {} tt {} in {:?}",
            depth,
            result.score,
            result.best_move.map_or_else(|| "none".to_string(), |m| m.to_uci()),
            self.stats.nodes - before.nodes,
            self.table.len(),
            start.elapsed()
        );

        result
    }

    /// Returns the counters accumulated since creation or the last reset.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Drops every transposition table entry.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}

/// Searches `position` for the side to move using a fresh table.
pub fn find_best_move(position: &mut Position, depth: u32) -> SearchResult {
    Searcher::new().find_best_move(position, depth)
}
