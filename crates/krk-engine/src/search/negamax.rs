//! Negamax with alpha-beta pruning over a transposition table.

use krk_core::Move;

use super::tt::{Bound, TranspositionTable, TtEntry};
use super::{Score, SearchResult, SearchStats};
use crate::Position;

/// Searches `position` to `depth` plies.
///
/// `color` is +1 when the node is scored for White and -1 for Black; the
/// static evaluation is always White-relative. Terminal and leaf scores are
/// multiplied by `depth + 1`, which favours the shortest mate.
///
/// The returned score is clamped into the window: a node whose moves all
/// fail low returns `alpha` and no move.
pub fn negamax(
    position: &mut Position,
    depth: u32,
    mut alpha: Score,
    mut beta: Score,
    color: Score,
    table: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;

    let key = position.key();
    let alpha_orig = alpha;

    if let Some(entry) = table.probe(key) {
        if entry.depth >= depth {
            stats.tt_hits += 1;
            let hit = SearchResult {
                score: entry.value,
                best_move: entry.best_move,
            };
            match entry.bound {
                Bound::Exact => return hit,
                Bound::Lower => alpha = alpha.max(entry.value),
                Bound::Upper => beta = beta.min(entry.value),
            }
            if alpha >= beta {
                stats.tt_cutoffs += 1;
                return hit;
            }
        }
    }

    if depth == 0 || position.is_checkmate() || position.is_stalemate() {
        return SearchResult {
            score: color * (depth as Score + 1) * position.evaluate(),
            best_move: None,
        };
    }

    let mut best_move: Option<Move> = None;
    for &m in &position.legal_moves() {
        let pushed = position.push_move(m);
        debug_assert!(pushed, "generated move {} rejected", m);
        let score = -negamax(position, depth - 1, -beta, -alpha, -color, table, stats).score;
        position.pop();

        if score > alpha {
            alpha = score;
            best_move = Some(m);
        }
        if alpha >= beta {
            stats.beta_cutoffs += 1;
            break;
        }
    }

    let bound = if alpha <= alpha_orig {
        Bound::Upper
    } else if alpha >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    table.store(
        key,
        TtEntry {
            value: alpha,
            best_move,
            depth,
            bound,
        },
    );

    SearchResult {
        score: alpha,
        best_move,
    }
}
