//! Alpha-beta pruning in negamax form.

use std::time::Duration;

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::context::SearchContext;
use crate::evaluator::Evaluator;
use crate::search::SearchAlgorithm;
use crate::strategy::Strategy;

/// Depth-limited nega-alpha search.
///
/// A branch is cut as soon as its score can no longer affect the ancestor
/// window (`alpha >= beta`). When the optional budget expires, frames
/// return their current `alpha` and unwind; the root keeps the best
/// candidate examined so far.
pub struct AlphaBeta<B: Bits> {
    depth: u32,
    evaluator: Evaluator<B>,
    budget: Option<Duration>,
}

impl<B: Bits> AlphaBeta<B> {
    pub fn new(depth: u32, evaluator: Evaluator<B>) -> Self {
        AlphaBeta {
            depth,
            evaluator,
            budget: None,
        }
    }

    pub fn with_budget(depth: u32, evaluator: Evaluator<B>, budget: Duration) -> Self {
        AlphaBeta {
            depth,
            evaluator,
            budget: Some(budget),
        }
    }
}

impl<B: Bits> SearchAlgorithm<B> for AlphaBeta<B> {
    fn depth(&self) -> u32 {
        self.depth
    }

    fn budget(&self) -> Option<Duration> {
        self.budget
    }

    fn node_score(
        &self,
        color: Color,
        board: &mut BitBoard<B>,
        mut alpha: i32,
        beta: i32,
        depth: u32,
        ctx: &mut SearchContext,
    ) -> i32 {
        ctx.visit();
        if ctx.expired() {
            return alpha;
        }

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
            return -self.node_score(!color, board, -beta, -alpha, depth, ctx);
        }

        let legal = board.get_legal_moves(color);
        for (square, flips) in legal.iter() {
            let score = {
                let mut placed = board.place_unchecked(color, *square, flips.clone());
                -self.node_score(!color, &mut *placed, -beta, -alpha, depth - 1, ctx)
            };
            if ctx.expired() {
                return alpha;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        alpha
    }
}

impl<B: Bits> Strategy<B> for AlphaBeta<B> {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        self.search_move(color, board)
    }
}
