//! Code for addressing cells on the board.

use crate::MAX_BOARD_SIZE;
use std::fmt::{self, Display, Formatter, Write};

/// A cell on an N x N board, with (0, 0) the upper-left corner.
///
/// The packed-bitset index of a square is `N*N - 1 - (y*N + x)`, counting
/// from the least-significant bit. This mapping is part of the external
/// record/replay contract and must not change.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    pub fn new(x: usize, y: usize) -> Self {
        Square {
            x: x as u8,
            y: y as u8,
        }
    }

    /// Bit index of this square on a board of edge length `size`.
    #[inline]
    pub fn index(self, size: usize) -> usize {
        size * size - 1 - (self.y as usize * size + self.x as usize)
    }

    /// Inverse of [`Square::index`].
    #[inline]
    pub fn from_index(size: usize, index: usize) -> Self {
        let offset = size * size - 1 - index;
        Square {
            x: (offset % size) as u8,
            y: (offset / size) as u8,
        }
    }

    pub fn in_range(self, size: usize) -> bool {
        (self.x as usize) < size && (self.y as usize) < size
    }
}

/// Convert this square into string notation: column letter plus 1-indexed
/// row number ("a1" is the upper-left corner).
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let col = (b'a' + self.x) as char;
        f.write_char(col)?;
        write!(f, "{}", self.y + 1)
    }
}

#[derive(Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square notation")
    }
}

impl std::error::Error for ParseSquareError {}

/// Parse string notation ("a1", case-insensitive, rows up to 26).
/// Range-checking against a specific board size is the board's job.
impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col = chars.next().ok_or(ParseSquareError)?.to_ascii_lowercase();
        if !col.is_ascii_lowercase() {
            return Err(ParseSquareError);
        }
        let x = (col as u8) - b'a';

        let rest = chars.as_str();
        let row: usize = rest.parse().map_err(|_| ParseSquareError)?;
        if row == 0 || row > MAX_BOARD_SIZE {
            return Err(ParseSquareError);
        }

        Ok(Square {
            x,
            y: (row - 1) as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn index_round_trip() {
        assert_eq!(Square::new(0, 0).index(8), 63);
        assert_eq!(Square::new(7, 7).index(8), 0);
        assert_eq!(Square::from_index(8, 63), Square::new(0, 0));
        assert_eq!(Square::from_index(8, 0), Square::new(7, 7));

        for idx in 0..16 {
            assert_eq!(Square::from_index(4, idx).index(4), idx);
        }
    }

    #[test]
    fn bit_layout() {
        // (x, y) maps to N^2 - 1 - (y*N + x).
        assert_eq!(Square::new(3, 2).index(8), 64 - 1 - (2 * 8 + 3));
        assert_eq!(Square::new(1, 0).index(4), 16 - 1 - 1);
    }

    #[test]
    fn from_str_success() {
        assert_eq!(Square::from_str("a1"), Ok(Square::new(0, 0)));
        assert_eq!(Square::from_str("H8"), Ok(Square::new(7, 7)));
        assert_eq!(Square::from_str("z26"), Ok(Square::new(25, 25)));
        assert_eq!(Square::from_str("c10"), Ok(Square::new(2, 9)));
    }

    #[test]
    fn from_str_fail() {
        assert_eq!(Square::from_str(""), Err(ParseSquareError));
        assert_eq!(Square::from_str("a0"), Err(ParseSquareError));
        assert_eq!(Square::from_str("a27"), Err(ParseSquareError));
        assert_eq!(Square::from_str("1a"), Err(ParseSquareError));
        assert_eq!(Square::from_str("aa1"), Err(ParseSquareError));
    }

    #[test]
    fn to_string() {
        assert_eq!(Square::new(0, 0).to_string(), "a1");
        assert_eq!(Square::new(7, 7).to_string(), "h8");
        assert_eq!(Square::from_str("e2").unwrap().to_string(), "e2");
    }
}
