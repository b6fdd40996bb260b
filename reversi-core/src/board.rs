//! Board dynamics: legal-move generation, move application and undo.

use crate::bits::Bits;
use crate::color::Color;
use crate::masks::{DirMasks, DIRECTIONS};
use crate::square::Square;
use crate::utils;
use crate::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Errors produced by board construction and mutation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// Board size is odd or outside 4..=26.
    InvalidSize(usize),
    /// Board size is valid but the chosen bitset cannot hold N^2 bits.
    UnsupportedWidth(usize),
    /// `put` was asked for a destination that is not a legal move.
    IllegalMove { color: Color, square: Square },
    /// `undo` was called with no move on the record.
    NoMoveToUndo,
    /// A custom starting position put both colors on one cell.
    OverlappingDiscs,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidSize(size) => write!(f, "{} is an invalid board size", size),
            BoardError::UnsupportedWidth(size) => write!(
                f,
                "board size {} does not fit this bitset implementation",
                size
            ),
            BoardError::IllegalMove { color, square } => {
                write!(f, "{} cannot move to {}", color, square)
            }
            BoardError::NoMoveToUndo => f.write_str("no move to undo"),
            BoardError::OverlappingDiscs => {
                f.write_str("starting position places both colors on one cell")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// The legal destinations for one color, each paired with its flip-set.
///
/// Squares are listed in row-major scan order, but callers must treat the
/// collection as a set: no ordering is guaranteed across versions.
#[derive(Clone, Debug)]
pub struct LegalMoves<B: Bits> {
    moves: Vec<(Square, B)>,
}

impl<B: Bits> LegalMoves<B> {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Square, B)> {
        self.moves.iter()
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves.iter().map(|(sq, _)| *sq)
    }

    pub fn contains(&self, square: Square) -> bool {
        self.flips(square).is_some()
    }

    /// The discs that would flip if `square` were played, if it is legal.
    pub fn flips(&self, square: Square) -> Option<&B> {
        self.moves
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, flips)| flips)
    }
}

struct Record<B> {
    color: Color,
    square: Square,
    flipped: B,
    flipped_count: u32,
}

struct MoveCache<B: Bits> {
    color: Color,
    moves: LegalMoves<B>,
}

/// A Reversi board over a packed bitset.
///
/// This is the only type that may mutate occupancy: every change goes
/// through `put`/`apply_unchecked` and is reversed by `undo`, so the undo
/// stack always replays to the exact current position.
pub struct BitBoard<B: Bits> {
    size: usize,
    width: usize,
    black: B,
    white: B,
    black_score: u32,
    white_score: u32,
    masks: DirMasks<B>,
    history: Vec<Record<B>>,
    cache: RefCell<Option<MoveCache<B>>>,
}

fn validate_size(size: usize) -> Result<(), BoardError> {
    if size < MIN_BOARD_SIZE || size > MAX_BOARD_SIZE || size % 2 != 0 {
        return Err(BoardError::InvalidSize(size));
    }
    Ok(())
}

impl<B: Bits> BitBoard<B> {
    /// Construct a board of edge length `size` with the four central discs.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        validate_size(size)?;
        let width = size * size;
        if !B::supports(width) {
            return Err(BoardError::UnsupportedWidth(size));
        }

        let center = size / 2;
        let mut black = B::zero(width);
        let mut white = B::zero(width);
        for &(x, y) in &[(center, center - 1), (center - 1, center)] {
            black = black.or(&B::single(width, Square::new(x, y).index(size)));
        }
        for &(x, y) in &[(center - 1, center - 1), (center, center)] {
            white = white.or(&B::single(width, Square::new(x, y).index(size)));
        }

        Self::with_position(size, black, white)
    }

    /// Construct a board from explicit occupancy bitsets, for board-variant
    /// collaborators and tests. The two sets must be disjoint.
    pub fn with_position(size: usize, black: B, white: B) -> Result<Self, BoardError> {
        validate_size(size)?;
        let width = size * size;
        if !B::supports(width) {
            return Err(BoardError::UnsupportedWidth(size));
        }
        if black.intersects(&white) {
            return Err(BoardError::OverlappingDiscs);
        }

        let black_score = black.popcount();
        let white_score = white.popcount();
        Ok(BitBoard {
            size,
            width,
            black,
            white,
            black_score,
            white_score,
            masks: DirMasks::new(size),
            history: Vec::new(),
            cache: RefCell::new(None),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn black_bits(&self) -> &B {
        &self.black
    }

    pub fn white_bits(&self) -> &B {
        &self.white
    }

    fn bits_of(&self, color: Color) -> &B {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    pub fn score(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_score,
            Color::White => self.white_score,
        }
    }

    /// Black score minus white score.
    pub fn disc_difference(&self) -> i32 {
        self.black_score as i32 - self.white_score as i32
    }

    pub fn empty_count(&self) -> u32 {
        self.width as u32 - self.black_score - self.white_score
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    pub fn disc_at(&self, square: Square) -> Option<Color> {
        let index = square.index(self.size);
        if self.black.get(index) {
            Some(Color::Black)
        } else if self.white.get(index) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Every cell as +1 (black), -1 (white) or 0 (empty), row by row.
    pub fn get_board_info(&self) -> Vec<Vec<i8>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| match self.disc_at(Square::new(x, y)) {
                        Some(Color::Black) => 1,
                        Some(Color::White) => -1,
                        None => 0,
                    })
                    .collect()
            })
            .collect()
    }

    /// The squares set in `bits`, in row-major order.
    pub fn squares_in(&self, bits: &B) -> Vec<Square> {
        (0..self.width)
            .rev()
            .filter(|&index| bits.get(index))
            .map(|index| Square::from_index(self.size, index))
            .collect()
    }

    /// Mask of all legal destinations for `color`, via the direction-masked
    /// bit-parallel flood fill.
    pub fn legal_move_bits(&self, color: Color) -> B {
        let player = self.bits_of(color);
        let opponent = self.bits_of(!color);

        let horizontal = opponent.and(&self.masks.h);
        let vertical = opponent.and(&self.masks.v);
        let diagonal = opponent.and(&self.masks.d);
        let blank = player.or(opponent).not(self.width);

        let size = self.size;
        let mut moves = self.smear_left(&horizontal, player, &blank, 1);
        moves = moves.or(&self.smear_right(&horizontal, player, &blank, 1));
        moves = moves.or(&self.smear_left(&vertical, player, &blank, size));
        moves = moves.or(&self.smear_right(&vertical, player, &blank, size));
        moves = moves.or(&self.smear_left(&diagonal, player, &blank, size + 1));
        moves = moves.or(&self.smear_left(&diagonal, player, &blank, size - 1));
        moves = moves.or(&self.smear_right(&diagonal, player, &blank, size - 1));
        moves = moves.or(&self.smear_right(&diagonal, player, &blank, size + 1));
        moves
    }

    fn smear_left(&self, mask: &B, player: &B, blank: &B, shift: usize) -> B {
        let mut tmp = mask.and(&player.shl(shift, self.width));
        for _ in 0..self.size.saturating_sub(3) {
            tmp = tmp.or(&mask.and(&tmp.shl(shift, self.width)));
        }
        blank.and(&tmp.shl(shift, self.width))
    }

    fn smear_right(&self, mask: &B, player: &B, blank: &B, shift: usize) -> B {
        let mut tmp = mask.and(&player.shr(shift));
        for _ in 0..self.size.saturating_sub(3) {
            tmp = tmp.or(&mask.and(&tmp.shr(shift)));
        }
        blank.and(&tmp.shr(shift))
    }

    /// The discs `color` would flip by playing `square`. Zero when the move
    /// is not legal. A direction only contributes when its run of opponent
    /// discs ends on a disc of `color`.
    pub fn flippable_discs(&self, color: Color, square: Square) -> B {
        let player = self.bits_of(color);
        let opponent = self.bits_of(!color);

        let occupied = player.or(opponent);
        let mut flips = B::zero(self.width);
        if !square.in_range(self.size) || occupied.get(square.index(self.size)) {
            return flips;
        }

        let put = B::single(self.width, square.index(self.size));
        for &direction in DIRECTIONS.iter() {
            let mut run = B::zero(self.width);
            let mut check = self.masks.step(self.size, &put, direction);
            while check.intersects(opponent) {
                run = run.or(&check);
                check = self.masks.step(self.size, &check, direction);
            }
            if check.intersects(player) {
                flips = flips.or(&run);
            }
        }

        flips
    }

    /// Every legal destination for `color` with its flip-set. Memoized until
    /// the board mutates or the other color is queried.
    pub fn get_legal_moves(&self, color: Color) -> LegalMoves<B> {
        if let Some(cache) = self.cache.borrow().as_ref() {
            if cache.color == color {
                return cache.moves.clone();
            }
        }

        let bits = self.legal_move_bits(color);
        let moves = LegalMoves {
            moves: (0..self.width)
                .rev()
                .filter(|&index| bits.get(index))
                .map(|index| {
                    let square = Square::from_index(self.size, index);
                    (square, self.flippable_discs(color, square))
                })
                .collect(),
        };

        *self.cache.borrow_mut() = Some(MoveCache {
            color,
            moves: moves.clone(),
        });
        moves
    }

    /// Play `square` for `color`, returning the flip-set.
    ///
    /// Fails with [`BoardError::IllegalMove`] when the destination is not in
    /// `get_legal_moves(color)`; an illegal request never mutates the board.
    pub fn put(&mut self, color: Color, square: Square) -> Result<B, BoardError> {
        let flips = match self.get_legal_moves(color).flips(square) {
            Some(flips) => flips.clone(),
            None => return Err(BoardError::IllegalMove { color, square }),
        };
        self.apply_unchecked(color, square, flips.clone());
        Ok(flips)
    }

    /// Play a move whose flip-set is already known, without legality checks.
    ///
    /// `flips` must be the set returned by `get_legal_moves` for this exact
    /// position; anything else leaves the board inconsistent. Search hot
    /// loops use this to avoid re-validating moves they just enumerated.
    pub fn apply_unchecked(&mut self, color: Color, square: Square, flips: B) {
        let put = B::single(self.width, square.index(self.size));
        let flipped_count = flips.popcount();

        match color {
            Color::Black => {
                self.black = self.black.xor(&put.or(&flips));
                self.white = self.white.xor(&flips);
                self.black_score += 1 + flipped_count;
                self.white_score -= flipped_count;
            }
            Color::White => {
                self.white = self.white.xor(&put.or(&flips));
                self.black = self.black.xor(&flips);
                self.white_score += 1 + flipped_count;
                self.black_score -= flipped_count;
            }
        }

        self.history.push(Record {
            color,
            square,
            flipped: flips,
            flipped_count,
        });
        *self.cache.borrow_mut() = None;
    }

    /// Checked [`BitBoard::put`] returning a guard that undoes on drop.
    pub fn place(&mut self, color: Color, square: Square) -> Result<PlacedMove<'_, B>, BoardError> {
        let flipped = self.put(color, square)?;
        Ok(PlacedMove {
            board: self,
            flipped,
        })
    }

    /// Unchecked [`BitBoard::apply_unchecked`] returning an undo-on-drop guard.
    pub fn place_unchecked(&mut self, color: Color, square: Square, flips: B) -> PlacedMove<'_, B> {
        self.apply_unchecked(color, square, flips.clone());
        PlacedMove {
            board: self,
            flipped: flips,
        }
    }

    /// Exactly invert the most recent `put`, restoring occupancy and both
    /// score counters. Fails when no move has been recorded.
    pub fn undo(&mut self) -> Result<(), BoardError> {
        let record = self.history.pop().ok_or(BoardError::NoMoveToUndo)?;
        let put = B::single(self.width, record.square.index(self.size));

        match record.color {
            Color::Black => {
                self.black = self.black.xor(&put.or(&record.flipped));
                self.white = self.white.xor(&record.flipped);
                self.black_score -= 1 + record.flipped_count;
                self.white_score += record.flipped_count;
            }
            Color::White => {
                self.white = self.white.xor(&put.or(&record.flipped));
                self.black = self.black.xor(&record.flipped);
                self.white_score -= 1 + record.flipped_count;
                self.black_score += record.flipped_count;
            }
        }

        *self.cache.borrow_mut() = None;
        Ok(())
    }
}

impl<B: Bits> fmt::Display for BitBoard<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = (0..self.size).flat_map(|y| {
            (0..self.size).map(move |x| match self.disc_at(Square::new(x, y)) {
                Some(Color::Black) => '#',
                Some(Color::White) => 'O',
                None => '.',
            })
        });
        utils::format_grid(self.size, cells, f)
    }
}

/// A move applied to an exclusively-borrowed board, undone when dropped.
///
/// Guarantees the board returns to its pre-move state on every exit path,
/// including early returns on search timeout.
pub struct PlacedMove<'a, B: Bits> {
    board: &'a mut BitBoard<B>,
    flipped: B,
}

impl<'a, B: Bits> PlacedMove<'a, B> {
    /// The discs this move flipped.
    pub fn flipped(&self) -> &B {
        &self.flipped
    }
}

impl<'a, B: Bits> Deref for PlacedMove<'a, B> {
    type Target = BitBoard<B>;

    fn deref(&self) -> &BitBoard<B> {
        self.board
    }
}

impl<'a, B: Bits> DerefMut for PlacedMove<'a, B> {
    fn deref_mut(&mut self) -> &mut BitBoard<B> {
        self.board
    }
}

impl<'a, B: Bits> Drop for PlacedMove<'a, B> {
    fn drop(&mut self) {
        // The record pushed when this guard was created is still on the
        // stack, so the undo cannot fail.
        let _ = self.board.undo();
    }
}
