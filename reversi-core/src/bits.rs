//! Packed bitsets of one bit per board cell.
//!
//! Board cells map to bit indices counting from the LSB: cell (x, y) on an
//! N x N board is bit `N*N - 1 - (y*N + x)`, so the MSB of the set is the
//! upper-left cell and indices decrease in row-major order.
//!
//! Two implementations sit behind the [`Bits`] interface: [`Word`] wraps a
//! single `u64` for the common small sizes (4, 6 and 8), and [`Wide`] holds
//! a little-endian vector of words for everything up to 26 x 26 (676 bits).

use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt;

const WORD_BITS: usize = 64;

/// Capability interface for a fixed-width packed bitset.
///
/// Widths are passed explicitly where an operation could otherwise smear
/// bits past the board: `shl` and `not` clamp their result so that no bit at
/// or above `width` is ever set. Keeping that invariant makes `popcount`
/// exact and lets callers compare sets structurally.
pub trait Bits: Clone + PartialEq + Eq + fmt::Debug {
    /// Whether this implementation can hold `width` bits.
    fn supports(width: usize) -> bool;

    /// The all-zero set.
    fn zero(width: usize) -> Self;

    /// A one-hot set with only `index` set.
    fn single(width: usize, index: usize) -> Self;

    fn get(&self, index: usize) -> bool;

    fn popcount(&self) -> u32;

    fn is_zero(&self) -> bool;

    /// Left shift, discarding bits shifted at or beyond `width`.
    fn shl(&self, n: usize, width: usize) -> Self;

    /// Right shift towards the LSB.
    fn shr(&self, n: usize) -> Self;

    fn and(&self, rhs: &Self) -> Self;

    fn or(&self, rhs: &Self) -> Self;

    fn xor(&self, rhs: &Self) -> Self;

    /// Complement within `width` bits.
    fn not(&self, width: usize) -> Self;

    fn intersects(&self, rhs: &Self) -> bool {
        !self.and(rhs).is_zero()
    }

    /// Whether every bit of `rhs` is also set in `self`.
    fn contains_all(&self, rhs: &Self) -> bool {
        self.and(rhs) == *rhs
    }
}

/// Single-word bitset for boards whose grid fits in a `u64`.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Word(u64);

fn word_mask(width: usize) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl Bits for Word {
    fn supports(width: usize) -> bool {
        width <= WORD_BITS
    }

    fn zero(_width: usize) -> Self {
        Word(0)
    }

    fn single(_width: usize, index: usize) -> Self {
        Word(1u64 << index)
    }

    fn get(&self, index: usize) -> bool {
        self.0 & (1u64 << index) != 0
    }

    fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn shl(&self, n: usize, width: usize) -> Self {
        if n >= WORD_BITS {
            return Word(0);
        }
        Word((self.0 << n) & word_mask(width))
    }

    fn shr(&self, n: usize) -> Self {
        if n >= WORD_BITS {
            return Word(0);
        }
        Word(self.0 >> n)
    }

    fn and(&self, rhs: &Self) -> Self {
        *self & *rhs
    }

    fn or(&self, rhs: &Self) -> Self {
        *self | *rhs
    }

    fn xor(&self, rhs: &Self) -> Self {
        *self ^ *rhs
    }

    fn not(&self, width: usize) -> Self {
        Word(!self.0 & word_mask(width))
    }
}

/// Word-vector bitset for boards too large for a single `u64`.
/// Words are stored little-endian: word 0 holds bits 0..64.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Wide(Box<[u64]>);

fn words_for(width: usize) -> usize {
    (width + WORD_BITS - 1) / WORD_BITS
}

impl Wide {
    fn clamp(&mut self, width: usize) {
        let top = width % WORD_BITS;
        if top != 0 {
            if let Some(last) = self.0.last_mut() {
                *last &= (1u64 << top) - 1;
            }
        }
    }
}

impl Bits for Wide {
    fn supports(_width: usize) -> bool {
        true
    }

    fn zero(width: usize) -> Self {
        Wide(vec![0u64; words_for(width)].into_boxed_slice())
    }

    fn single(width: usize, index: usize) -> Self {
        let mut bits = Self::zero(width);
        bits.0[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
        bits
    }

    fn get(&self, index: usize) -> bool {
        self.0[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    fn popcount(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    fn shl(&self, n: usize, width: usize) -> Self {
        let len = self.0.len();
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        let mut out = vec![0u64; len];

        for i in (word_shift..len).rev() {
            let mut word = self.0[i - word_shift] << bit_shift;
            if bit_shift > 0 && i > word_shift {
                word |= self.0[i - word_shift - 1] >> (WORD_BITS - bit_shift);
            }
            out[i] = word;
        }

        let mut bits = Wide(out.into_boxed_slice());
        bits.clamp(width);
        bits
    }

    fn shr(&self, n: usize) -> Self {
        let len = self.0.len();
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        let mut out = vec![0u64; len];

        for i in 0..len.saturating_sub(word_shift) {
            let mut word = self.0[i + word_shift] >> bit_shift;
            if bit_shift > 0 && i + word_shift + 1 < len {
                word |= self.0[i + word_shift + 1] << (WORD_BITS - bit_shift);
            }
            out[i] = word;
        }

        Wide(out.into_boxed_slice())
    }

    fn and(&self, rhs: &Self) -> Self {
        Wide(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(a, b)| a & b)
                .collect(),
        )
    }

    fn or(&self, rhs: &Self) -> Self {
        Wide(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(a, b)| a | b)
                .collect(),
        )
    }

    fn xor(&self, rhs: &Self) -> Self {
        Wide(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(a, b)| a ^ b)
                .collect(),
        )
    }

    fn not(&self, width: usize) -> Self {
        let mut bits = Wide(self.0.iter().map(|&w| !w).collect());
        bits.clamp(width);
        bits
    }
}
