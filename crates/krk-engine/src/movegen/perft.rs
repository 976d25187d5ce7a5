//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Terminal positions are not cut short: after a rook capture the two kings
//! keep moving, exactly as the legal move generator allows.

use crate::Position;

/// Counts the number of leaf nodes at the given depth.
///
/// The position is walked with push/pop and is unchanged on return.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        let pushed = position.push_move(m);
        debug_assert!(pushed, "generated move {} rejected", m);
        nodes += perft(position, depth - 1);
        position.pop();
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let moves = position.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        let pushed = position.push_move(m);
        debug_assert!(pushed, "generated move {} rejected", m);
        let nodes = if depth > 1 {
            perft(position, depth - 1)
        } else {
            1
        };
        position.pop();
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    // Leaf counts for a few reference positions.
    #[test]
    fn perft_rook_cut_off_position() {
        let mut position = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        assert_eq!(perft(&mut position, 1), 15);
        assert_eq!(perft(&mut position, 2), 30);
        assert_eq!(perft(&mut position, 3), 504);
        assert_eq!(perft(&mut position, 4), 2276);
    }

    #[test]
    fn perft_mate_in_one_position() {
        let mut position = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 w - - 4 3").unwrap();
        assert_eq!(perft(&mut position, 1), 19);
        assert_eq!(perft(&mut position, 2), 45);
        assert_eq!(perft(&mut position, 3), 895);
        assert_eq!(perft(&mut position, 4), 3419);
    }

    #[test]
    fn perft_black_to_move() {
        let mut position = Position::from_fen("8/8/8/7R/8/4K3/8/4k3 b - - 4 3").unwrap();
        assert_eq!(perft(&mut position, 1), 2);
        assert_eq!(perft(&mut position, 2), 40);
        assert_eq!(perft(&mut position, 3), 122);
    }

    #[test]
    fn perft_leaves_position_untouched() {
        let mut position = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        let before = position.clone();
        perft(&mut position, 3);
        assert_eq!(position, before);
    }

    fn walk_accepting_every_move(position: &mut Position, depth: u32) {
        if depth == 0 {
            return;
        }
        for &m in &position.legal_moves() {
            assert!(position.push_move(m), "{} rejected in {}", m, position.to_fen());
            walk_accepting_every_move(position, depth - 1);
            position.pop();
        }
    }

    #[test]
    fn generated_moves_are_always_accepted() {
        for fen in [
            "8/8/8/k7/8/KR6/8/8 w - - 0 1",
            "8/8/8/8/8/8/4R3/4k2K b - - 0 1",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            walk_accepting_every_move(&mut position, 3);
            assert!(position.move_stack().is_empty());
        }
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let mut position = Position::from_fen("8/8/8/k7/8/KR6/8/8 w - - 0 1").unwrap();
        let divide = perft_divide(&mut position, 3);
        assert_eq!(divide.len(), 15);
        let total: u64 = divide.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&mut position, 3));
        assert!(divide.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
