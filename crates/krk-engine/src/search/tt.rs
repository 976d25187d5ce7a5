//! Transposition table.

use std::collections::HashMap;

use krk_core::Move;

use super::Score;
use crate::PositionKey;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact negamax value.
    Exact,
    /// The search failed high: the true value is at least the score.
    Lower,
    /// The search failed low: the true value is at most the score.
    Upper,
}

/// A stored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub value: Score,
    pub best_move: Option<Move>,
    pub depth: u32,
    pub bound: Bound,
}

/// Search results keyed by position.
///
/// Keys are exact, so a probe never returns an entry for a different
/// position. A store only overwrites an entry searched to the same or a
/// smaller depth.
#[derive(Debug, Default, Clone)]
pub struct TranspositionTable {
    entries: HashMap<PositionKey, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry stored for `key`, if any.
    #[inline]
    pub fn probe(&self, key: PositionKey) -> Option<&TtEntry> {
        self.entries.get(&key)
    }

    /// Stores `entry` unless a deeper result is already present.
    pub fn store(&mut self, key: PositionKey, entry: TtEntry) {
        match self.entries.get(&key) {
            Some(existing) if existing.depth > entry.depth => {}
            _ => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
