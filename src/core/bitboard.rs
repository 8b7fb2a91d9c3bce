//! Bitboard representation and operations
//!
//! A bitboard is a 32-bit integer where each bit represents one of the 32
//! playable (dark) squares of the checkers board. Squares are numbered so
//! that, for the side moving up the board, the two forward diagonals are
//! always +1 and +7 modulo 32 (ranks shown bottom-to-top):
//!
//! ```txt
//!   11  05  31  25
//! 10  04  30  24
//!   03  29  23  17
//! 02  28  22  16
//!   27  21  15  09
//! 26  20  14  08
//!   19  13  07  01
//! 18  12  06  00
//! ```
//!
//! Diagonal steps wrap across board edges, so every shift is a rotation that
//! must be masked against a per-direction edge bitmask (see the move
//! generator).

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A 32-bit bitboard over the playable squares
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u32);

/// Rotate a square index 180° around the board center.
///
/// This is the square-level counterpart of [`Bitboard::rotate_half`].
#[inline]
pub const fn rotate_square(sq: u8) -> u8 {
    11u8.wrapping_sub(sq) & 31
}

/// Square index at a given rank (0 = bottom) and file slot (0..4, left to
/// right within the rank). Used for display and tests; the hot paths work on
/// raw square values.
pub const fn square_at(rank: u8, slot: u8) -> u8 {
    (18 + 8 * (rank / 2) as u32 + (rank % 2) as u32 + 26 * slot as u32) as u8 & 31
}

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0u32);

    /// Promotion rank for the side moving up: squares 5, 11, 25, 31
    pub const TOP_RANK: Bitboard = Bitboard(0x8200_0820);
    /// Promotion rank for the side moving down: squares 0, 6, 12, 18
    pub const BOTTOM_RANK: Bitboard = Bitboard(0x0004_1041);

    /// Create a new bitboard from a raw u32 value
    #[inline]
    pub const fn new(value: u32) -> Self {
        Bitboard(value)
    }

    /// Create a bitboard with a single bit set at the given square (0-31)
    #[inline]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u32 << sq)
    }

    /// Check if the bitboard is empty
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if the bitboard is not empty
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Count the number of set bits (population count)
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Get the index of the least significant bit
    #[inline]
    pub const fn lsb(self) -> u8 {
        self.0.trailing_zeros() as u8
    }

    /// Pop the least significant bit and return its index
    #[inline]
    pub fn pop_lsb(&mut self) -> u8 {
        let sq = self.lsb();
        self.0 &= self.0 - 1;
        sq
    }

    /// Check if a specific square is set
    #[inline]
    pub const fn contains(self, sq: u8) -> bool {
        (self.0 & (1u32 << sq)) != 0
    }

    /// Set a specific square
    #[inline]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u32 << sq;
    }

    /// Clear a specific square
    #[inline]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u32 << sq);
    }

    /// Rotate left; diagonal steps are rotations in this layout
    #[inline]
    pub const fn rotl(self, n: u32) -> Self {
        Bitboard(self.0.rotate_left(n))
    }

    /// Rotate right
    #[inline]
    pub const fn rotr(self, n: u32) -> Self {
        Bitboard(self.0.rotate_right(n))
    }

    /// Rotate the whole board 180°.
    ///
    /// Bit `v` maps to bit `(11 - v) & 31`. The move generator canonicalizes
    /// the side moving down through this transform, generates with the single
    /// up-board code path, and maps the results back; it is the only
    /// side-dependent piece of geometry in the crate.
    #[inline]
    pub const fn rotate_half(self) -> Self {
        Bitboard(self.0.reverse_bits().rotate_left(12))
    }

    /// Iterate over all set bits
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over set bits in a bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.pop_lsb())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  ")?;
            if rank % 2 == 1 {
                write!(f, "  ")?;
            }
            for slot in 0..4 {
                let sq = square_at(rank, slot);
                if self.contains(sq) {
                    write!(f, "X   ")?;
                } else {
                    write!(f, ".   ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
