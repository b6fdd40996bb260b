//! "Perft" performance test: count the game-tree leaves at a given depth.
//! Useful for validating and tuning move generation.
//! See: http://www.aartbik.com/MISC/reversi.html

use crate::bits::Bits;
use crate::board::BitBoard;
use crate::color::Color;

/// Count leaves of the game tree `depth` plies below the starting position.
pub fn run_perft<B: Bits>(size: usize, depth: u64) -> u64 {
    let mut board = match BitBoard::<B>::new(size) {
        Ok(board) => board,
        Err(_) => return 0,
    };
    leaves_below(&mut board, Color::Black, depth, false)
}

fn leaves_below<B: Bits>(
    board: &mut BitBoard<B>,
    color: Color,
    depth: u64,
    passed: bool,
) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.get_legal_moves(color);
    if moves.is_empty() {
        // Both players passed: game is over
        if passed {
            return 1;
        }

        return leaves_below(board, !color, depth - 1, true);
    }

    let mut total = 0;
    for (square, flips) in moves.iter() {
        let mut placed = board.place_unchecked(color, *square, flips.clone());
        total += leaves_below(&mut placed, !color, depth - 1, false);
    }
    total
}
