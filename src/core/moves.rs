//! Move representation
//!
//! Moves are encoded in a compact 16-bit format:
//! - bits 0-4: source square (0-31)
//! - bits 5-6: diagonal direction
//! - bit 7: jump flag (two-step capture instead of a single-step slide)
//! - bit 8: continues-capture flag (the landing square has a further capture,
//!   so applying this move keeps the same side on the clock)
//!
//! A move is a single hop. Multi-captures are chains of hops: every hop whose
//! continues-capture bit is set must be followed by another jump from its
//! landing square before the turn passes to the opponent.

use std::fmt;

/// One of the four diagonal directions, from the point of view of the board
/// (forward = towards the top rank).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Direction {
    ForwardLeft = 0,
    ForwardRight = 1,
    BackwardLeft = 2,
    BackwardRight = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackwardLeft,
        Direction::BackwardRight,
    ];

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Direction::ForwardLeft,
            1 => Direction::ForwardRight,
            2 => Direction::BackwardLeft,
            _ => Direction::BackwardRight,
        }
    }

    /// The direction this one becomes under a 180° board rotation
    #[inline]
    pub const fn opposite(self) -> Self {
        Direction::from_bits(3 - self as u8)
    }

    /// Square offset of a single diagonal step, modulo 32
    #[inline]
    pub const fn slide_offset(self) -> u8 {
        match self {
            Direction::ForwardLeft => 7,
            Direction::ForwardRight => 1,
            Direction::BackwardLeft => 31,  // -1
            Direction::BackwardRight => 25, // -7
        }
    }

    /// Square offset of a two-step jump, modulo 32
    #[inline]
    pub const fn jump_offset(self) -> u8 {
        match self {
            Direction::ForwardLeft => 14,
            Direction::ForwardRight => 2,
            Direction::BackwardLeft => 30,  // -2
            Direction::BackwardRight => 18, // -14
        }
    }

    #[inline]
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::ForwardLeft | Direction::ForwardRight)
    }
}

/// A single checkers hop encoded in 16 bits
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Move(u16);

impl Move {
    /// Sentinel for "no move" (an all-ones pattern no legal move can produce)
    pub const NULL: Move = Move(u16::MAX);

    const SRC_MASK: u16 = 0x001F;
    const DIR_MASK: u16 = 0x0060;
    const DIR_SHIFT: u16 = 5;
    const JUMP_FLAG: u16 = 0x0080;
    const CONTINUES_FLAG: u16 = 0x0100;

    /// Create a move. `continues` marks a jump whose landing square has a
    /// further capture; it is only ever set by the move generator.
    #[inline]
    pub fn new(src: u8, direction: Direction, jump: bool, continues: bool) -> Self {
        debug_assert!(src < 32);
        debug_assert!(jump || !continues, "only a jump can continue a capture");
        let mut bits = (src as u16) | ((direction as u16) << Self::DIR_SHIFT);
        if jump {
            bits |= Self::JUMP_FLAG;
        }
        if continues {
            bits |= Self::CONTINUES_FLAG;
        }
        Move(bits)
    }

    /// Get the source square
    #[inline]
    pub const fn src(self) -> u8 {
        (self.0 & Self::SRC_MASK) as u8
    }

    /// Get the direction
    #[inline]
    pub const fn direction(self) -> Direction {
        Direction::from_bits(((self.0 & Self::DIR_MASK) >> Self::DIR_SHIFT) as u8)
    }

    /// Check if this is a jump
    #[inline]
    pub const fn is_jump(self) -> bool {
        (self.0 & Self::JUMP_FLAG) != 0
    }

    /// Check if the resulting position still has a pending mandatory capture
    /// for the moving piece
    #[inline]
    pub const fn continues_capture(self) -> bool {
        (self.0 & Self::CONTINUES_FLAG) != 0
    }

    /// The destination square
    #[inline]
    pub const fn dest(self) -> u8 {
        let offset = if self.is_jump() {
            self.direction().jump_offset()
        } else {
            self.direction().slide_offset()
        };
        self.src().wrapping_add(offset) & 31
    }

    /// The square jumped over, if this is a jump
    #[inline]
    pub const fn captured_square(self) -> Option<u8> {
        if self.is_jump() {
            Some(self.src().wrapping_add(self.direction().slide_offset()) & 31)
        } else {
            None
        }
    }

    /// Get the raw 16-bit value
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if this is the null move
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == u16::MAX
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "(none)");
        }
        let sep = if self.is_jump() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.src(), sep, self.dest())
    }
}

/// Maximum number of hops a single position can offer. Each of the four
/// directions pairs movers with distinct empty landing squares, so the count
/// is at most 4 * min(pieces, empty squares) = 64. That covers any disjoint
/// occupancy [`super::board::Position::try_new`] accepts, not just the 12
/// pieces a side starts with.
pub const MAX_MOVES: usize = 64;

/// A list of moves (stack-allocated, the search hot path never heap
/// allocates per node)
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Create a new empty move list
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    /// Add a move to the list
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    /// Get the number of moves
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a move by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<Move> {
        if index < self.len {
            Some(self.moves[index])
        } else {
            None
        }
    }

    /// Check whether the list contains a move
    pub fn contains(&self, mv: Move) -> bool {
        self.iter().any(|m| *m == mv)
    }

    /// Iterate over moves
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves[..self.len].iter()
    }

    /// View the moves as a slice
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Swap two entries (used by the lazy move picker)
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.moves.swap(a, b);
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}
