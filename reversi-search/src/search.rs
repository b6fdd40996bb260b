//! The shared interface of the window-pruning searches.

use std::time::Duration;

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::context::SearchContext;
use crate::{SCORE_MAX, SCORE_MIN};

/// What a root-level search produced: the best destination (if any
/// candidate was examined) and the score recorded for every candidate
/// that was searched before the deadline hit.
#[derive(Clone, Debug)]
pub struct RootOutcome {
    pub best: Option<Square>,
    pub scores: Vec<(Square, i32)>,
}

/// A negamax-form search with a pruning window.
///
/// Implementations provide [`SearchAlgorithm::node_score`]; the root-level
/// driver, candidate bookkeeping and deadline handling are shared. Scores
/// are from the mover's perspective throughout.
pub trait SearchAlgorithm<B: Bits> {
    /// Search depth in plies. A pass consumes the turn, not a ply.
    fn depth(&self) -> u32;

    /// Wall-clock budget for one search, if any.
    fn budget(&self) -> Option<Duration>;

    /// Mover-perspective score of the position with `color` to move,
    /// searching `depth` plies inside the window `(alpha, beta)`.
    fn node_score(
        &self,
        color: Color,
        board: &mut BitBoard<B>,
        alpha: i32,
        beta: i32,
        depth: u32,
        ctx: &mut SearchContext,
    ) -> i32;

    /// A fresh context honoring this search's budget.
    fn context(&self) -> SearchContext {
        match self.budget() {
            Some(budget) => SearchContext::with_budget(budget),
            None => SearchContext::unlimited(),
        }
    }

    /// Score `moves` for `color` at the root and track the best one.
    ///
    /// Candidates that are not legal in the current position are skipped.
    /// When the deadline expires mid-scan the best candidate so far is
    /// kept; if none improved the window yet, the move under examination
    /// is returned so a timed-out search still yields a legal move.
    fn root(
        &self,
        color: Color,
        board: &mut BitBoard<B>,
        moves: &[Square],
        depth: u32,
        ctx: &mut SearchContext,
    ) -> RootOutcome {
        let mut best = None;
        let mut alpha = SCORE_MIN;
        let beta = SCORE_MAX;
        let mut scores = Vec::with_capacity(moves.len());
        let legal = board.get_legal_moves(color);
        let child_depth = depth.saturating_sub(1);

        for &square in moves {
            let flips = match legal.flips(square) {
                Some(flips) => flips.clone(),
                None => continue,
            };
            let score = {
                let mut placed = board.place_unchecked(color, square, flips);
                -self.node_score(!color, &mut *placed, -beta, -alpha, child_depth, ctx)
            };
            scores.push((square, score));

            if ctx.expired() {
                if best.is_none() {
                    best = Some(square);
                }
                break;
            }
            if score > alpha {
                alpha = score;
                best = Some(square);
            }
        }

        RootOutcome { best, scores }
    }

    /// Run a complete search for `color`'s next move.
    fn search_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        let moves: Vec<Square> = board.get_legal_moves(color).squares().collect();
        if moves.is_empty() {
            return None;
        }
        let mut ctx = self.context();
        self.root(color, board, &moves, self.depth(), &mut ctx).best
    }
}
