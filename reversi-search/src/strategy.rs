//! The move-picking interface and the baseline random player.

use rand::seq::SliceRandom;
use reversi_core::{BitBoard, Bits, Color, Square};

/// Anything that can pick a move for `color`.
///
/// The board is borrowed mutably so implementations can explore by applying
/// and undoing moves, but every implementation must return the board in the
/// exact state it received it.
pub trait Strategy<B: Bits> {
    /// The chosen destination, or `None` when `color` has no legal move.
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square>;
}

/// Picks a legal move uniformly at random.
pub struct Random;

impl<B: Bits> Strategy<B> for Random {
    fn next_move(&self, color: Color, board: &mut BitBoard<B>) -> Option<Square> {
        let moves: Vec<Square> = board.get_legal_moves(color).squares().collect();
        moves.choose(&mut rand::thread_rng()).copied()
    }
}
