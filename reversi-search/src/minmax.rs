//! Plain full-width minimax: black maximizes, white minimizes.

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::context::SearchContext;
use crate::evaluator::Evaluator;
use crate::strategy::Strategy;
use crate::{SCORE_MAX, SCORE_MIN};

/// Fixed-depth minimax over raw black-positive evaluations. No pruning
/// and no deadline; the reference the faster searches are checked against.
pub struct MinMax<B: Bits> {
    depth: u32,
    evaluator: Evaluator<B>,
}

impl<B: Bits> MinMax<B> {
    pub fn new(depth: u32, evaluator: Evaluator<B>) -> Self {
        MinMax { depth, evaluator }
    }

    /// Best move for `color` with the black-positive score it achieves.
    pub fn best_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<(Square, i32)> {
        let legal = board.get_legal_moves(color);
        let mut ctx = SearchContext::unlimited();
        let mut best: Option<(Square, i32)> = None;

        for (square, flips) in legal.iter() {
            let score = {
                let mut placed = board.place_unchecked(color, *square, flips.clone());
                self.score(!color, &mut *placed, self.depth.saturating_sub(1), &mut ctx)
            };
            let better = match best {
                None => true,
                Some((_, so_far)) => match color {
                    Color::Black => score > so_far,
                    Color::White => score < so_far,
                },
            };
            if better {
                best = Some((*square, score));
            }
        }
        best
    }

    /// Black-positive score of the position with `color` to move.
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
            return self.evaluator.evaluate(board, black_moves, white_moves);
        }

        let my_moves = match color {
            Color::Black => black_moves,
            Color::White => white_moves,
        };
        if my_moves == 0 {
            // Pass: the turn flips but the remaining depth does not.
            return self.score(!color, board, depth, ctx);
        }

        let legal = board.get_legal_moves(color);
        let mut best = match color {
            Color::Black => SCORE_MIN,
            Color::White => SCORE_MAX,
        };
        for (square, flips) in legal.iter() {
            let score = {
                let mut placed = board.place_unchecked(color, *square, flips.clone());
                self.score(!color, &mut *placed, depth - 1, ctx)
            };
            best = match color {
                Color::Black => best.max(score),
                Color::White => best.min(score),
            };
        }
        best
    }
}

impl<B: Bits> Strategy<B> for MinMax<B> {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        self.best_move(color, board).map(|(square, _)| square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_core::Word;

    #[test]
    fn board_is_restored_after_search() {
        let mut board = BitBoard::<Word>::new(8).unwrap();
        let before = (*board.black_bits(), *board.white_bits());

        let minmax = MinMax::new(3, Evaluator::table(8));
        assert!(minmax.next_move(Color::Black, &mut board).is_some());

        assert_eq!((*board.black_bits(), *board.white_bits()), before);
        assert_eq!(board.moves_played(), 0);
    }

    #[test]
    fn depth_one_maximizes_the_evaluation() {
        let mut board = BitBoard::<Word>::new(4).unwrap();
        let minmax = MinMax::new(1, Evaluator::disc_count());

        // Every opening move flips exactly one disc, so any legal square
        // is optimal; the score after it must be +3 for black.
        let (square, score) = minmax.best_move(Color::Black, &mut board).unwrap();
        assert!(board.get_legal_moves(Color::Black).contains(square));
        assert_eq!(score, 3);
    }

    #[test]
    fn white_minimizes() {
        let mut board = BitBoard::<Word>::new(4).unwrap();
        board.put(Color::Black, Square::new(1, 0)).unwrap();

        let minmax = MinMax::new(1, Evaluator::disc_count());
        let (_, score) = minmax.best_move(Color::White, &mut board).unwrap();
        assert!(score < 3);
    }

    #[test]
    fn no_move_means_none() {
        let size = 4;
        let black = Word::single(size * size, Square::new(0, 0).index(size));
        let mut board =
            BitBoard::<Word>::with_position(size, black, Word::zero(size * size)).unwrap();

        let minmax = MinMax::new(2, Evaluator::disc_count());
        assert_eq!(minmax.next_move(Color::Black, &mut board), None);
    }
}
