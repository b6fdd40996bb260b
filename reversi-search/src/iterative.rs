//! Iterative deepening under a wall-clock budget.

use std::time::Duration;

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::context::SearchContext;
use crate::search::SearchAlgorithm;
use crate::sorter::{MoveSelector, MoveSorter};
use crate::strategy::Strategy;

/// What a deepening run produced.
#[derive(Clone, Debug)]
pub struct IterativeOutcome {
    pub best: Option<Square>,
    /// Deepest pass that was started.
    pub reached_depth: u32,
    /// Whether the budget expired before the last pass finished.
    pub truncated: bool,
    pub nodes: u64,
}

/// Re-runs a windowed search at increasing depth until the budget expires
/// or an optional depth limit is reached.
///
/// Between passes the selector may drop hopeless candidates and the
/// sorter reorders the rest, feeding the previous pass's best move back
/// to the front. The deadline spans the whole run, so the final (partial)
/// pass starts from the best ordering the completed passes produced and
/// its result is safe to keep.
pub struct IterativeDeepening<S> {
    start_depth: u32,
    depth_limit: Option<u32>,
    budget: Duration,
    selector: MoveSelector,
    sorter: MoveSorter,
    search: S,
}

impl<S> IterativeDeepening<S> {
    pub fn new(start_depth: u32, budget: Duration, search: S) -> Self {
        IterativeDeepening {
            start_depth,
            depth_limit: None,
            budget,
            selector: MoveSelector::keep_all(),
            sorter: MoveSorter::best_first(),
            search,
        }
    }

    /// Stop after the pass at `limit` plies even with budget left.
    pub fn with_depth_limit(mut self, limit: u32) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    pub fn with_selector(mut self, selector: MoveSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_sorter(mut self, sorter: MoveSorter) -> Self {
        self.sorter = sorter;
        self
    }

    /// Deepen until the budget or depth limit is hit.
    pub fn run<B: Bits>(&self, color: Color, board: &mut BitBoard<B>) -> IterativeOutcome
    where
        S: SearchAlgorithm<B>,
    {
        let mut ctx = SearchContext::with_budget(self.budget);
        let mut moves: Vec<Square> = board.get_legal_moves(color).squares().collect();
        if moves.is_empty() {
            return IterativeOutcome {
                best: None,
                reached_depth: 0,
                truncated: false,
                nodes: 0,
            };
        }

        let mut best = None;
        let mut scores: Vec<(Square, i32)> = Vec::new();
        let mut depth = self.start_depth;

        loop {
            self.selector.select(depth, &mut moves, &scores);
            self.sorter.sort(board.size(), &mut moves, best);

            let outcome = self.search.root(color, board, &moves, depth, &mut ctx);
            if outcome.best.is_some() {
                best = outcome.best;
            }
            if !outcome.scores.is_empty() {
                scores = outcome.scores;
            }
            log::debug!(
                "depth {}: best {:?}, {} candidates, {} nodes",
                depth,
                best.map(|square| square.to_string()),
                moves.len(),
                ctx.nodes()
            );

            if ctx.expired() {
                break;
            }
            if self.depth_limit.map_or(false, |limit| depth >= limit) {
                break;
            }
            depth += 1;
        }

        IterativeOutcome {
            best,
            reached_depth: depth,
            truncated: ctx.was_truncated(),
            nodes: ctx.nodes(),
        }
    }
}

impl<B: Bits, S: SearchAlgorithm<B>> Strategy<B> for IterativeDeepening<S> {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        self.run(color, board).best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabeta::AlphaBeta;
    use crate::evaluator::Evaluator;
    use crate::negascout::NegaScout;
    use reversi_core::Word;

    #[test]
    fn deepens_to_the_depth_limit_with_budget_left() {
        let mut board = BitBoard::<Word>::new(8).unwrap();
        let search = AlphaBeta::new(2, Evaluator::table_mobility(8));
        let deepening = IterativeDeepening::new(2, Duration::from_secs(60), search)
            .with_depth_limit(4)
            .with_sorter(MoveSorter::best_and_corners());

        let outcome = deepening.run(Color::Black, &mut board);
        assert_eq!(outcome.reached_depth, 4);
        assert!(!outcome.truncated);
        assert!(board
            .get_legal_moves(Color::Black)
            .contains(outcome.best.unwrap()));
    }

    #[test]
    fn expired_budget_yields_a_legal_move_and_restored_board() {
        let mut board = BitBoard::<Word>::new(8).unwrap();
        let before = (*board.black_bits(), *board.white_bits());

        let search = NegaScout::new(2, Evaluator::standard(8));
        let deepening = IterativeDeepening::new(2, Duration::from_secs(0), search);
        let outcome = deepening.run(Color::Black, &mut board);

        assert!(outcome.truncated);
        assert!(board
            .get_legal_moves(Color::Black)
            .contains(outcome.best.unwrap()));
        assert_eq!((*board.black_bits(), *board.white_bits()), before);
    }

    #[test]
    fn no_legal_moves_means_none() {
        let size = 4;
        let black = Word::single(size * size, Square::new(0, 0).index(size));
        let mut board =
            BitBoard::<Word>::with_position(size, black, Word::zero(size * size)).unwrap();

        let search = AlphaBeta::new(2, Evaluator::table(4));
        let deepening = IterativeDeepening::new(2, Duration::from_secs(1), search);
        assert_eq!(deepening.next_move(Color::Black, &mut board), None);
    }
}
