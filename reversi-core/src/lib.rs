//! `reversi-core` is a Reversi/Othello board library built on packed bitsets.
//!
//! The crate is organized in two levels:
//!
//!  - [`bits`] contains the raw bitset machinery: a [`Bits`] capability
//!    interface with a single-word fast path ([`Word`], for boards whose
//!    N x N grid fits in 64 bits) and a word-vector implementation
//!    ([`Wide`]) for boards up to 26 x 26.
//!  - [`BitBoard`] implements the game dynamics on top of either bitset:
//!    legal-move enumeration with cached flip-sets, checked and unchecked
//!    move application, and an undo stack that restores occupancy and score
//!    counters bit-for-bit.
//!
//! Search code mutates one exclusively-borrowed board via
//! [`BitBoard::place_unchecked`] and relies on the returned [`PlacedMove`]
//! guard to roll the move back on every exit path.

pub mod bits;
pub mod test_utils;

mod board;
mod color;
mod masks;
mod square;
mod utils;

pub use bits::{Bits, Wide, Word};
pub use board::*;
pub use color::Color;
pub use masks::DirMasks;
pub use square::{ParseSquareError, Square};

/// Smallest supported board edge length.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest supported board edge length.
pub const MAX_BOARD_SIZE: usize = 26;
