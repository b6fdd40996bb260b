//! NegaScout (principal variation search).

use std::time::Duration;

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::context::SearchContext;
use crate::evaluator::Evaluator;
use crate::search::SearchAlgorithm;
use crate::strategy::Strategy;

/// Alpha-beta with null-window probes.
///
/// The first child of a node is searched with the full window; later
/// children get a null window `(alpha, alpha + 1)` and are re-searched
/// with the full window only when the probe lands inside it. With decent
/// move ordering most probes fail low and the re-search is rare, so the
/// result matches [`AlphaBeta`] on fewer nodes.
pub struct NegaScout<B: Bits> {
    depth: u32,
    evaluator: Evaluator<B>,
    budget: Option<Duration>,
}

impl<B: Bits> NegaScout<B> {
    pub fn new(depth: u32, evaluator: Evaluator<B>) -> Self {
        NegaScout {
            depth,
            evaluator,
            budget: None,
        }
    }

    pub fn with_budget(depth: u32, evaluator: Evaluator<B>, budget: Duration) -> Self {
        NegaScout {
            depth,
            evaluator,
            budget: Some(budget),
        }
    }
}

impl<B: Bits> SearchAlgorithm<B> for NegaScout<B> {
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
        let mut null_window = beta;
        for (i, (square, flips)) in legal.iter().enumerate() {
            if alpha >= beta {
                break;
            }

            let probe = {
                let mut placed = board.place_unchecked(color, *square, flips.clone());
                -self.node_score(!color, &mut *placed, -null_window, -alpha, depth - 1, ctx)
            };
            if ctx.expired() {
                return alpha;
            }

            if alpha < probe {
                if probe <= null_window && i > 0 {
                    // The probe landed inside the window; re-search with
                    // the full window to get the exact score.
                    let mut placed = board.place_unchecked(color, *square, flips.clone());
                    alpha = -self.node_score(!color, &mut *placed, -beta, -probe, depth - 1, ctx);
                    drop(placed);
                    if ctx.expired() {
                        return alpha;
                    }
                } else {
                    alpha = probe;
                }
            }
            null_window = alpha + 1;
        }
        alpha
    }
}

impl<B: Bits> Strategy<B> for NegaScout<B> {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        self.search_move(color, board)
    }
}
