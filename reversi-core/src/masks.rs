//! Precomputed direction masks for move generation.

use crate::bits::Bits;
use crate::square::Square;

/// The eleven bit masks derived once per board size.
///
/// `h`, `v` and `d` clip opponent discs that sit on the wraparound edge for
/// the horizontal, vertical and diagonal flood-fill axes. The remaining
/// eight are the valid landing cells for a single step in each compass
/// direction, used when walking out flip-sets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirMasks<B: Bits> {
    pub h: B,
    pub v: B,
    pub d: B,
    pub up: B,
    pub up_right: B,
    pub right: B,
    pub down_right: B,
    pub down: B,
    pub down_left: B,
    pub left: B,
    pub up_left: B,
}

fn build<B: Bits, F: Fn(usize, usize) -> bool>(size: usize, keep: F) -> B {
    let width = size * size;
    let mut bits = B::zero(width);
    for y in 0..size {
        for x in 0..size {
            if keep(x, y) {
                bits = bits.or(&B::single(width, Square::new(x, y).index(size)));
            }
        }
    }
    bits
}

impl<B: Bits> DirMasks<B> {
    pub fn new(size: usize) -> Self {
        let last = size - 1;
        DirMasks {
            h: build(size, |x, _| x != 0 && x != last),
            v: build(size, |_, y| y != 0 && y != last),
            d: build(size, |x, y| x != 0 && x != last && y != 0 && y != last),
            up: build(size, |_, y| y != last),
            up_right: build(size, |x, y| x != 0 && y != last),
            right: build(size, |x, _| x != 0),
            down_right: build(size, |x, y| x != 0 && y != 0),
            down: build(size, |_, y| y != 0),
            down_left: build(size, |x, y| x != last && y != 0),
            left: build(size, |x, _| x != last),
            up_left: build(size, |x, y| x != last && y != last),
        }
    }

    /// Move every disc of `from` one step in `direction`, dropping discs
    /// that would leave the board.
    pub fn step(&self, size: usize, from: &B, direction: Direction) -> B {
        let width = size * size;
        match direction {
            Direction::Up => from.shl(size, width).and(&self.up),
            Direction::UpRight => from.shl(size - 1, width).and(&self.up_right),
            Direction::Right => from.shr(1).and(&self.right),
            Direction::DownRight => from.shr(size + 1).and(&self.down_right),
            Direction::Down => from.shr(size).and(&self.down),
            Direction::DownLeft => from.shr(size - 1).and(&self.down_left),
            Direction::Left => from.shl(1, width).and(&self.left),
            Direction::UpLeft => from.shl(size + 1, width).and(&self.up_left),
        }
    }
}

/// The eight compass directions a flip line can run in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::DownRight,
    Direction::Down,
    Direction::DownLeft,
    Direction::Left,
    Direction::UpLeft,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Word;

    #[test]
    fn horizontal_mask_excludes_edge_columns() {
        let masks: DirMasks<Word> = DirMasks::new(4);
        for y in 0..4 {
            assert!(!masks.h.get(Square::new(0, y).index(4)));
            assert!(masks.h.get(Square::new(1, y).index(4)));
            assert!(masks.h.get(Square::new(2, y).index(4)));
            assert!(!masks.h.get(Square::new(3, y).index(4)));
        }
    }

    #[test]
    fn eight_by_eight_matches_known_values() {
        let masks: DirMasks<Word> = DirMasks::new(8);
        assert_eq!(u64::from(masks.h), 0x7E7E7E7E7E7E7E7E);
        assert_eq!(u64::from(masks.v), 0x00FFFFFFFFFFFF00);
        assert_eq!(u64::from(masks.d), 0x007E7E7E7E7E7E00);
        assert_eq!(u64::from(masks.up), 0xFFFFFFFFFFFFFF00);
        assert_eq!(u64::from(masks.down), 0x00FFFFFFFFFFFFFF);
        assert_eq!(u64::from(masks.right), 0x7F7F7F7F7F7F7F7F);
        assert_eq!(u64::from(masks.left), 0xFEFEFEFEFEFEFEFE);
    }

    #[test]
    fn step_moves_one_cell() {
        let size = 4;
        let masks: DirMasks<Word> = DirMasks::new(size);
        let from = Word::single(16, Square::new(1, 1).index(size));

        let up = masks.step(size, &from, Direction::Up);
        assert!(up.get(Square::new(1, 0).index(size)));
        assert_eq!(up.popcount(), 1);

        let dr = masks.step(size, &from, Direction::DownRight);
        assert!(dr.get(Square::new(2, 2).index(size)));
        assert_eq!(dr.popcount(), 1);
    }

    #[test]
    fn step_off_the_board_vanishes() {
        let size = 4;
        let masks: DirMasks<Word> = DirMasks::new(size);
        let corner = Word::single(16, Square::new(0, 0).index(size));

        assert!(masks.step(size, &corner, Direction::Up).is_zero());
        assert!(masks.step(size, &corner, Direction::Left).is_zero());
        assert!(masks.step(size, &corner, Direction::UpLeft).is_zero());
        assert!(!masks.step(size, &corner, Direction::Down).is_zero());
    }
}
