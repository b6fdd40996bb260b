//! Exact endgame solving.

use reversi_core::{BitBoard, Bits, Color, Square};

use crate::alphabeta::AlphaBeta;
use crate::evaluator::Evaluator;
use crate::strategy::Strategy;

/// Switches from a midgame strategy to a full read of the remaining game.
///
/// Once at most `remain` empty cells are left, every line fits inside the
/// search horizon, so an alpha-beta over the exact disc-difference metric
/// plays perfectly from there. The solver runs without a deadline.
pub struct EndGame<S> {
    remain: u32,
    midgame: S,
}

impl<S> EndGame<S> {
    pub fn new(remain: u32, midgame: S) -> Self {
        EndGame { remain, midgame }
    }

    /// Solve the position exactly, regardless of how many empties remain.
    pub fn solve<B: Bits>(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        let solver = AlphaBeta::new(self.remain, Evaluator::disc_count());
        solver.next_move(color, board)
    }
}

impl<B: Bits, S: Strategy<B>> Strategy<B> for EndGame<S> {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        if board.empty_count() <= self.remain {
            log::debug!("full read with {} empties", board.empty_count());
            return self.solve(color, board);
        }
        self.midgame.next_move(color, board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minmax::MinMax;
    use crate::strategy::Random;
    use reversi_core::Word;

    fn nearly_full_board() -> BitBoard<Word> {
        // 4x4 with three empty cells left, black to move.
        let mut board = BitBoard::<Word>::new(4).unwrap();
        let mut color = Color::Black;
        let mut passes = 0;
        while board.empty_count() > 3 && passes < 2 {
            match board.get_legal_moves(color).squares().next() {
                Some(square) => {
                    board.put(color, square).unwrap();
                    passes = 0;
                }
                None => passes += 1,
            }
            color = !color;
        }
        board
    }

    #[test]
    fn solver_matches_exhaustive_minmax() {
        let mut board = BitBoard::<Word>::new(4).unwrap();
        // Play four plies to leave eight empties.
        for _ in 0..2 {
            for &color in &[Color::Black, Color::White] {
                let square = board.get_legal_moves(color).squares().next().unwrap();
                board.put(color, square).unwrap();
            }
        }

        let endgame = EndGame::new(board.empty_count(), Random);
        let solved = endgame.solve(Color::Black, &mut board).unwrap();

        // Full-width search over the whole remaining game agrees on the
        // achievable disc difference.
        let minmax = MinMax::new(board.empty_count(), Evaluator::disc_count());
        let (_, exact) = minmax.best_move(Color::Black, &mut board).unwrap();

        board.put(Color::Black, solved).unwrap();
        let remaining = board.empty_count();
        let minmax_reply = MinMax::new(remaining, Evaluator::disc_count());
        let mut ctx = crate::SearchContext::unlimited();
        let after = minmax_reply.score(Color::White, &mut board, remaining, &mut ctx);
        assert_eq!(after, exact);
    }

    #[test]
    fn defers_to_midgame_with_many_empties() {
        let mut board = BitBoard::<Word>::new(8).unwrap();
        let midgame = MinMax::new(2, Evaluator::table(8));
        let expected = midgame.next_move(Color::Black, &mut board);

        let endgame = EndGame::new(10, MinMax::new(2, Evaluator::table(8)));
        assert_eq!(endgame.next_move(Color::Black, &mut board), expected);
    }

    #[test]
    fn takes_over_when_few_empties_remain() {
        let mut board = nearly_full_board();
        let endgame = EndGame::new(12, Random);

        for &color in &[Color::Black, Color::White] {
            let legal = board.get_legal_moves(color);
            match endgame.next_move(color, &mut board) {
                Some(square) => assert!(legal.contains(square)),
                None => assert!(legal.is_empty()),
            }
        }
    }
}
