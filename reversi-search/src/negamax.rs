//! Negamax: minimax folded into one maximizing recursion.

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::context::SearchContext;
use crate::evaluator::Evaluator;
use crate::strategy::Strategy;
use crate::SCORE_MIN;

/// Fixed-depth negamax. Leaf evaluations are multiplied by the mover's
/// sign so every frame maximizes; equivalent to [`crate::MinMax`] move for
/// move, just without the per-color branching.
pub struct NegaMax<B: Bits> {
    depth: u32,
    evaluator: Evaluator<B>,
}

impl<B: Bits> NegaMax<B> {
    pub fn new(depth: u32, evaluator: Evaluator<B>) -> Self {
        NegaMax { depth, evaluator }
    }

    /// Best move for `color` with its mover-perspective score.
    pub fn best_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<(Square, i32)> {
        let legal = board.get_legal_moves(color);
        let mut ctx = SearchContext::unlimited();
        let mut best: Option<(Square, i32)> = None;

        for (square, flips) in legal.iter() {
            let score = {
                let mut placed = board.place_unchecked(color, *square, flips.clone());
                -self.score(!color, &mut *placed, self.depth.saturating_sub(1), &mut ctx)
            };
            if best.map_or(true, |(_, so_far)| score > so_far) {
                best = Some((*square, score));
            }
        }
        best
    }

    /// Mover-perspective score of the position with `color` to move.
    pub fn score(
        &self,
        color: Color,
        board: &mut BitBoard<B>,
        depth: u32,
        ctx: &mut SearchContext,
    ) -> i32 {
        ctx.visit();

        let black_moves = board.legal_move_bits(Color::Black).popcount();
        let white_moves = board.legal_move_bits(Color::White).popcount();
        let game_over = black_moves == 0 && white_moves == 0;
        if game_over || depth == 0 {
            return color.sign() * self.evaluator.evaluate(board, black_moves, white_moves);
        }

        let my_moves = match color {
            Color::Black => black_moves,
            Color::White => white_moves,
        };
        if my_moves == 0 {
            // Pass: the turn flips but the remaining depth does not.
            return -self.score(!color, board, depth, ctx);
        }

        let legal = board.get_legal_moves(color);
        let mut best = SCORE_MIN;
        for (square, flips) in legal.iter() {
            let score = {
                let mut placed = board.place_unchecked(color, *square, flips.clone());
                -self.score(!color, &mut *placed, depth - 1, ctx)
            };
            best = best.max(score);
        }
        best
    }
}

impl<B: Bits> Strategy<B> for NegaMax<B> {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        self.best_move(color, board).map(|(square, _)| square)
    }
}
