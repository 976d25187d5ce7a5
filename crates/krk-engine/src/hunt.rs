//! Mate hunting: play the engine's best move until the game ends.
//!
//! [`MateHunt`] searches from the side to move at a fixed depth, pushes the
//! move found, and repeats until checkmate, stalemate or a ply cap.

use krk_core::Move;
use serde::{Deserialize, Serialize};

use crate::search::{Score, SearchStats, Searcher};
use crate::{GameState, Position};

/// Settings for a mate hunt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HuntConfig {
    /// Search depth in plies for every move. Defaults to 11.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Maximum number of plies to play. Defaults to 25.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
    /// Empty the transposition table before each move. Defaults to true.
    #[serde(default = "default_clear_table")]
    pub clear_table_each_move: bool,
}

fn default_depth() -> u32 {
    11
}

fn default_max_plies() -> u32 {
    25
}

fn default_clear_table() -> bool {
    true
}

impl Default for HuntConfig {
    fn default() -> Self {
        HuntConfig {
            depth: default_depth(),
            max_plies: default_max_plies(),
            clear_table_each_move: default_clear_table(),
        }
    }
}

/// Why a hunt stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntOutcome {
    Checkmate,
    Stalemate,
    /// Black took the rook.
    RookCaptured,
    /// The ply cap was reached with the game still going.
    PlyLimit,
    /// The search returned no move for a position that is not over.
    NoMove,
}

impl std::fmt::Display for HuntOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            HuntOutcome::Checkmate => "checkmate",
            HuntOutcome::Stalemate => "stalemate",
            HuntOutcome::RookCaptured => "rook captured",
            HuntOutcome::PlyLimit => "ply limit reached",
            HuntOutcome::NoMove => "no move found",
        };
        f.write_str(text)
    }
}

/// One move played by a hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlyRecord {
    /// 1-based ply number.
    pub ply: u32,
    pub mv: Move,
    /// Score of the search that chose the move, relative to the mover.
    pub score: Score,
    /// Nodes searched for this move.
    pub nodes: u64,
}

/// Result of a finished hunt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntReport {
    pub outcome: HuntOutcome,
    pub moves: Vec<Move>,
    pub plies: u32,
    pub stats: SearchStats,
}

/// Drives repeated searches over one position.
#[derive(Debug, Default)]
pub struct MateHunt {
    config: HuntConfig,
    searcher: Searcher,
}

impl MateHunt {
    pub fn new(config: HuntConfig) -> Self {
        MateHunt {
            config,
            searcher: Searcher::new(),
        }
    }

    /// Plays the hunt on `position`, leaving it at the final state.
    pub fn run(&mut self, position: &mut Position) -> HuntReport {
        self.run_with(position, |_, _| {})
    }

    /// Like [`MateHunt::run`], calling `on_ply` after every move is pushed.
    pub fn run_with<F>(&mut self, position: &mut Position, mut on_ply: F) -> HuntReport
    where
        F: FnMut(&PlyRecord, &Position),
    {
        self.searcher.clear();
        self.searcher.reset_stats();

        let mut moves = Vec::new();
        let mut plies = 0u32;

        let outcome = loop {
            match position.game_state() {
                GameState::Checkmate => break HuntOutcome::Checkmate,
                GameState::Stalemate => break HuntOutcome::Stalemate,
                GameState::RookCaptured => break HuntOutcome::RookCaptured,
                GameState::Ongoing => {}
            }
            if plies >= self.config.max_plies {
                break HuntOutcome::PlyLimit;
            }

            if self.config.clear_table_each_move {
                self.searcher.clear();
            }
            let nodes_before = self.searcher.stats().nodes;
            let result = self.searcher.find_best_move(position, self.config.depth);
            let Some(mv) = result.best_move else {
                tracing::warn!("no move found for {}", position.to_fen());
                break HuntOutcome::NoMove;
            };
            if !position.push_move(mv) {
                tracing::warn!("search returned illegal move {}", mv);
                break HuntOutcome::NoMove;
            }

            plies += 1;
            moves.push(mv);
            let record = PlyRecord {
                ply: plies,
                mv,
                score: result.score,
                nodes: self.searcher.stats().nodes - nodes_before,
            };
            tracing::debug!(
                "ply {} {} score {} nodes {}",
                record.ply,
                mv,
                record.score,
                record.nodes
            );
            on_ply(&record, position);
        };

        let stats = self.searcher.stats();
        tracing::info!(
            "hunt finished: {} after {} plies ({} nodes)",
            outcome,
            plies,
            stats.nodes
        );

        HuntReport {
            outcome,
            moves,
            plies,
            stats,
        }
    }
}
