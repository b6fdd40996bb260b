//! Candidate ordering and narrowing between deepening passes.

use reversi_core::Square;

/// Reorders root candidates before a search pass.
///
/// Ordering only affects speed, never the chosen move: searching the
/// previous pass's best move first makes null windows fail fast, and
/// corners are the usual guess when nothing better is known.
#[derive(Clone, Copy, Debug)]
pub struct MoveSorter {
    best_first: bool,
    corners_first: bool,
}

impl MoveSorter {
    /// Leave candidates in board scan order.
    pub fn plain() -> Self {
        MoveSorter {
            best_first: false,
            corners_first: false,
        }
    }

    /// Previous best move first.
    pub fn best_first() -> Self {
        MoveSorter {
            best_first: true,
            corners_first: false,
        }
    }

    /// Corners to the front, previous best move ahead of them.
    pub fn best_and_corners() -> Self {
        MoveSorter {
            best_first: true,
            corners_first: true,
        }
    }

    pub fn sort(&self, size: usize, moves: &mut Vec<Square>, best: Option<Square>) {
        if self.corners_first {
            let last = size - 1;
            for &(x, y) in &[(0, 0), (0, last), (last, 0), (last, last)] {
                move_to_front(moves, Square::new(x, y));
            }
        }
        if self.best_first {
            if let Some(best) = best {
                move_to_front(moves, best);
            }
        }
    }
}

fn move_to_front(moves: &mut Vec<Square>, square: Square) {
    if let Some(position) = moves.iter().position(|&m| m == square) {
        moves.remove(position);
        moves.insert(0, square);
    }
}

/// Narrows root candidates between passes by dropping the worst scorers.
#[derive(Clone, Copy, Debug)]
pub struct MoveSelector {
    drop_from_depth: Option<u32>,
    keep_at_least: usize,
}

impl MoveSelector {
    /// Never drop a candidate.
    pub fn keep_all() -> Self {
        MoveSelector {
            drop_from_depth: None,
            keep_at_least: 0,
        }
    }

    /// From `depth` plies on, drop the candidates that shared the worst
    /// score in the previous pass, as long as at least `keep_at_least`
    /// others remain.
    pub fn drop_worst(depth: u32, keep_at_least: usize) -> Self {
        MoveSelector {
            drop_from_depth: Some(depth),
            keep_at_least,
        }
    }

    /// `scores` are the per-candidate results of the previous pass.
    pub fn select(&self, depth: u32, moves: &mut Vec<Square>, scores: &[(Square, i32)]) {
        let from_depth = match self.drop_from_depth {
            Some(from_depth) => from_depth,
            None => return,
        };
        if depth < from_depth || scores.is_empty() {
            return;
        }

        let worst = match scores.iter().map(|(_, score)| *score).min() {
            Some(worst) => worst,
            None => return,
        };
        let worst_moves: Vec<Square> = scores
            .iter()
            .filter(|(_, score)| *score == worst)
            .map(|(square, _)| *square)
            .collect();

        if moves.len().saturating_sub(worst_moves.len()) >= self.keep_at_least {
            moves.retain(|square| !worst_moves.contains(square));
        }
    }
}
