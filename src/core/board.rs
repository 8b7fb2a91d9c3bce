//! Board state and position
//!
//! A [`Position`] is four pairwise-disjoint occupancy bitboards (men and
//! kings for each side) plus the side to move. It is a plain `Copy` value;
//! applying a move returns the successor position and never mutates in
//! place.

use std::fmt;

use thiserror::Error;

use super::bitboard::{square_at, Bitboard};
use super::moves::Move;
use super::zobrist::ZobristKeys;

/// One of the two players. Red sits at the bottom, moves up the board and
/// moves first; White sits at the top and moves down.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Side {
    Red = 0,
    White = 1,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Red => Side::White,
            Side::White => Side::Red,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The rank on which this side's men are crowned
    #[inline]
    pub const fn promotion_mask(self) -> Bitboard {
        match self {
            Side::Red => Bitboard::TOP_RANK,
            Side::White => Bitboard::BOTTOM_RANK,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

/// Error building a position from untrusted occupancy sets
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("occupancy sets overlap on square {0}")]
    Overlap(u8),
}

/// A checkers position
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Uncrowned pieces per side
    men: [Bitboard; 2],
    /// Crowned pieces per side
    kings: [Bitboard; 2],
    /// The player who has the next turn
    side_to_move: Side,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Position {
    /// Red's twelve starting men (the bottom three ranks)
    const RED_START: Bitboard = Bitboard(0x041C_71C3);
    /// White's twelve starting men (the top three ranks)
    const WHITE_START: Bitboard = Bitboard(0xE382_0C38);

    /// Create a position from raw occupancy sets.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the four sets are not pairwise disjoint.
    /// Use [`Position::try_new`] for untrusted input.
    pub fn new(
        red_men: Bitboard,
        red_kings: Bitboard,
        white_men: Bitboard,
        white_kings: Bitboard,
        side_to_move: Side,
    ) -> Self {
        let pos = Position {
            men: [red_men, white_men],
            kings: [red_kings, white_kings],
            side_to_move,
        };
        debug_assert!(pos.check_disjoint().is_ok());
        pos
    }

    /// Create a position from untrusted occupancy sets, validating that the
    /// four sets are pairwise disjoint.
    pub fn try_new(
        red_men: Bitboard,
        red_kings: Bitboard,
        white_men: Bitboard,
        white_kings: Bitboard,
        side_to_move: Side,
    ) -> Result<Self, PositionError> {
        let pos = Position {
            men: [red_men, white_men],
            kings: [red_kings, white_kings],
            side_to_move,
        };
        pos.check_disjoint()?;
        Ok(pos)
    }

    fn check_disjoint(&self) -> Result<(), PositionError> {
        let sets = [self.men[0], self.kings[0], self.men[1], self.kings[1]];
        let mut seen = Bitboard::EMPTY;
        for set in sets {
            let overlap = seen & set;
            if overlap.is_not_empty() {
                return Err(PositionError::Overlap(overlap.lsb()));
            }
            seen |= set;
        }
        Ok(())
    }

    /// The standard starting position, Red to move
    pub const fn starting_position() -> Self {
        Position {
            men: [Self::RED_START, Self::WHITE_START],
            kings: [Bitboard::EMPTY, Bitboard::EMPTY],
            side_to_move: Side::Red,
        }
    }

    /// Uncrowned pieces of a side
    #[inline]
    pub const fn men(&self, side: Side) -> Bitboard {
        self.men[side.index()]
    }

    /// Kings of a side
    #[inline]
    pub const fn kings(&self, side: Side) -> Bitboard {
        self.kings[side.index()]
    }

    /// All pieces of a side
    #[inline]
    pub fn occupied(&self, side: Side) -> Bitboard {
        self.men(side) | self.kings(side)
    }

    /// All pieces of both sides
    #[inline]
    pub fn occupied_all(&self) -> Bitboard {
        self.occupied(Side::Red) | self.occupied(Side::White)
    }

    /// The player who has the next turn
    #[inline]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// The equivalent position with the board rotated 180° and the colors
    /// exchanged. An involution; move generation for the mirrored position
    /// yields exactly the mirrored move set.
    pub fn mirrored(&self) -> Position {
        Position {
            men: [self.men[1].rotate_half(), self.men[0].rotate_half()],
            kings: [self.kings[1].rotate_half(), self.kings[0].rotate_half()],
            side_to_move: self.side_to_move.opposite(),
        }
    }

    /// Apply a move, returning the successor position.
    ///
    /// Relocates the piece, removes a jumped piece, crowns a man that
    /// reaches the last rank, and passes the turn — unless the move's
    /// continues-capture flag is set, in which case the same side stays on
    /// the clock and must continue jumping from the landing square.
    ///
    /// # Panics
    ///
    /// Applying a structurally illegal move (source not occupied by the side
    /// to move, destination occupied, jumped square not held by the
    /// opponent) is a caller defect and panics. Full rule legality is the
    /// move generator's contract; only generated moves may be applied.
    pub fn apply(&self, mv: Move) -> Position {
        let side = self.side_to_move;
        let enemy = side.opposite();
        let src = mv.src();
        let dst = mv.dest();

        assert!(
            self.occupied(side).contains(src),
            "apply {mv}: no piece of the moving side on square {src}"
        );
        assert!(
            !self.occupied_all().contains(dst),
            "apply {mv}: destination square {dst} is occupied"
        );

        let mut men = self.men;
        let mut kings = self.kings;

        let was_king = kings[side.index()].contains(src);
        if was_king {
            kings[side.index()].clear(src);
        } else {
            men[side.index()].clear(src);
        }

        if let Some(captured) = mv.captured_square() {
            assert!(
                self.occupied(enemy).contains(captured),
                "apply {mv}: no opposing piece on jumped square {captured}"
            );
            men[enemy.index()].clear(captured);
            kings[enemy.index()].clear(captured);
        }

        let crowned = !was_king && side.promotion_mask().contains(dst);
        if was_king || crowned {
            kings[side.index()].set(dst);
        } else {
            men[side.index()].set(dst);
        }
        debug_assert!(!(crowned && mv.continues_capture()), "crowning ends a capture chain");

        let side_to_move = if mv.continues_capture() { side } else { enemy };

        Position {
            men,
            kings,
            side_to_move,
        }
    }

    /// Deterministic 64-bit fingerprint of the full occupancy state plus the
    /// side to move. Recomputed from scratch; incremental updates are a
    /// possible optimization, not a requirement.
    pub fn fingerprint(&self) -> u64 {
        let keys = ZobristKeys::instance();
        let mut hash = 0u64;
        for side in [Side::Red, Side::White] {
            for sq in self.men(side).iter() {
                hash ^= keys.piece(side, false, sq);
            }
            for sq in self.kings(side).iter() {
                hash ^= keys.piece(side, true, sq);
            }
        }
        if self.side_to_move == Side::White {
            hash ^= keys.side_to_move();
        }
        hash
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (0..8).rev() {
            write!(f, "  ")?;
            if rank % 2 == 1 {
                write!(f, "  ")?;
            }
            for slot in 0..4 {
                let sq = square_at(rank, slot);
                let c = if self.men(Side::Red).contains(sq) {
                    'r'
                } else if self.kings(Side::Red).contains(sq) {
                    'R'
                } else if self.men(Side::White).contains(sq) {
                    'w'
                } else if self.kings(Side::White).contains(sq) {
                    'W'
                } else {
                    '.'
                };
                write!(f, "{}   ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  {:?} to move", self.side_to_move)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moves::Direction;

    #[test]
    fn test_starting_position() {
        let pos = Position::starting_position();
        assert_eq!(pos.men(Side::Red).count(), 12);
        assert_eq!(pos.men(Side::White).count(), 12);
        assert!(pos.kings(Side::Red).is_empty());
        assert!(pos.kings(Side::White).is_empty());
        assert_eq!(pos.side_to_move(), Side::Red);
        assert!(pos.check_disjoint().is_ok());
        // The two armies are each other's 180° image
        assert_eq!(pos.men(Side::Red).rotate_half(), pos.men(Side::White));
    }

    #[test]
    fn test_try_new_rejects_overlap() {
        let overlap = Bitboard::from_square(14);
        let err = Position::try_new(overlap, Bitboard::EMPTY, overlap, Bitboard::EMPTY, Side::Red);
        assert_eq!(err, Err(PositionError::Overlap(14)));
    }

    #[test]
    fn test_mirrored_is_involution() {
        let pos = Position::starting_position();
        assert_eq!(pos.mirrored().mirrored(), pos);
        // The opening position is symmetric up to the side to move
        let mirror = pos.mirrored();
        assert_eq!(mirror.men(Side::Red), pos.men(Side::Red));
        assert_eq!(mirror.side_to_move(), Side::White);
    }

    #[test]
    fn test_apply_slide() {
        let pos = Position::starting_position();
        // Red slides 20 -> 27 (forward left)
        let mv = Move::new(20, Direction::ForwardLeft, false, false);
        let next = pos.apply(mv);
        assert!(!next.men(Side::Red).contains(20));
        assert!(next.men(Side::Red).contains(27));
        assert_eq!(next.side_to_move(), Side::White);
        assert_eq!(next.occupied_all().count(), 24);
    }

    #[test]
    fn test_apply_jump_removes_captured_piece() {
        // Red man on 14, White man on 15, landing square 22 empty
        let pos = Position::new(
            Bitboard::from_square(14),
            Bitboard::EMPTY,
            Bitboard::from_square(15),
            Bitboard::EMPTY,
            Side::Red,
        );
        let mv = Move::new(14, Direction::ForwardRight, true, false);
        assert_eq!(mv.dest(), 16);
        assert_eq!(mv.captured_square(), Some(15));
        let next = pos.apply(mv);
        assert!(next.occupied(Side::White).is_empty());
        assert!(next.men(Side::Red).contains(16));
        assert_eq!(next.side_to_move(), Side::White);
    }

    #[test]
    fn test_apply_promotes_on_last_rank() {
        // Red man on 24 slides forward left to 31 (top rank)
        let pos = Position::new(
            Bitboard::from_square(24),
            Bitboard::EMPTY,
            Bitboard::EMPTY,
            Bitboard::EMPTY,
            Side::Red,
        );
        let mv = Move::new(24, Direction::ForwardLeft, false, false);
        let next = pos.apply(mv);
        assert!(next.men(Side::Red).is_empty());
        assert!(next.kings(Side::Red).contains(31));
    }

    #[test]
    fn test_apply_king_stays_king() {
        let pos = Position::new(
            Bitboard::EMPTY,
            Bitboard::from_square(22),
            Bitboard::EMPTY,
            Bitboard::EMPTY,
            Side::Red,
        );
        let mv = Move::new(22, Direction::BackwardLeft, false, false);
        let next = pos.apply(mv);
        assert!(next.kings(Side::Red).contains(21));
        assert!(next.men(Side::Red).is_empty());
    }

    #[test]
    #[should_panic(expected = "no piece of the moving side")]
    fn test_apply_illegal_source_panics() {
        let pos = Position::starting_position();
        let mv = Move::new(22, Direction::ForwardLeft, false, false);
        let _ = pos.apply(mv);
    }

    #[test]
    #[should_panic(expected = "destination square")]
    fn test_apply_occupied_destination_panics() {
        let pos = Position::starting_position();
        // 1 -> 8 runs into Red's own third rank
        let mv = Move::new(1, Direction::ForwardLeft, false, false);
        let _ = pos.apply(mv);
    }

    #[test]
    fn test_fingerprint_depends_on_side_and_kind() {
        let pos = Position::starting_position();
        let flipped = Position::new(
            pos.men(Side::Red),
            Bitboard::EMPTY,
            pos.men(Side::White),
            Bitboard::EMPTY,
            Side::White,
        );
        assert_ne!(pos.fingerprint(), flipped.fingerprint());

        let kinged = Position::new(
            pos.men(Side::Red) & !Bitboard::from_square(0),
            Bitboard::from_square(0),
            pos.men(Side::White),
            Bitboard::EMPTY,
            Side::Red,
        );
        assert_ne!(pos.fingerprint(), kinged.fingerprint());
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let pos = Position::starting_position();
        assert_eq!(pos.fingerprint(), pos.fingerprint());
    }
}
