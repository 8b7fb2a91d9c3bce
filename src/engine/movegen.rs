//! Bitmask move generation
//!
//! All move generation is whole-board bit arithmetic: for each diagonal
//! direction the set of pieces that can step (or jump) that way is one
//! rotate-and-mask expression over the occupancy words. No per-square loops
//! until the mover sets are serialized into moves.
//!
//! Only one generation path exists, written for the side moving up the
//! board. When the down-moving side is on the clock the occupancy words are
//! rotated 180° first and every emitted move is mapped back (rotated source,
//! opposite direction).
//!
//! Forced capture: if any jump is available, only jumps are generated. A
//! generated jump is a single hop; its continues-capture flag records
//! whether the landing square has a further jump, in which case applying it
//! keeps the same side on the clock and [`jumps_from`] must supply the next
//! hop.

use crate::core::bitboard::rotate_square;
use crate::core::{Bitboard, Direction, Move, MoveList, Position, Side};

/// Pieces on these squares can slide one step in the direction without
/// leaving the board. Indexed by [`Direction`].
const SLIDE_MASKS: [Bitboard; 4] = [
    Bitboard(0b01111001111110111111001111011011), // forward left
    Bitboard(0b01111101111111011111010111011101), // forward right
    Bitboard(0b11111011111110111110101110111010), // backward left
    Bitboard(0b11111101111110011110110110111100), // backward right
];

/// Pieces on these squares can jump two steps in the direction without
/// leaving the board. Indexed by [`Direction`].
const JUMP_MASKS: [Bitboard; 4] = [
    Bitboard(0b00110000111100111111001111000011), // forward left
    Bitboard(0b00111100111111001111000011001100), // forward right
    Bitboard(0b11110011111100111100001100110000), // backward left
    Bitboard(0b11111100111100001100110000111100), // backward right
];

/// Occupancy words in the canonical frame (side to move always moves up)
struct Frame {
    /// All pieces of the side to move
    own: Bitboard,
    /// Kings of the side to move
    kings: Bitboard,
    /// All opposing pieces
    enemy: Bitboard,
    /// Unoccupied squares
    empty: Bitboard,
    /// True when the words were rotated 180° and emitted moves must be
    /// mapped back
    mirrored: bool,
}

impl Frame {
    fn new(pos: &Position) -> Self {
        let us = pos.side_to_move();
        let them = us.opposite();
        let (own, kings, enemy, mirrored) = match us {
            Side::Red => (pos.occupied(us), pos.kings(us), pos.occupied(them), false),
            Side::White => (
                pos.occupied(us).rotate_half(),
                pos.kings(us).rotate_half(),
                pos.occupied(them).rotate_half(),
                true,
            ),
        };
        Frame {
            own,
            kings,
            enemy,
            empty: !(own | enemy),
            mirrored,
        }
    }

    /// Map a canonical-frame square back to the board
    #[inline]
    fn board_square(&self, sq: u8) -> u8 {
        if self.mirrored {
            rotate_square(sq)
        } else {
            sq
        }
    }

    #[inline]
    fn emit(&self, out: &mut MoveList, src: u8, dir: Direction, jump: bool, continues: bool) {
        if self.mirrored {
            out.push(Move::new(rotate_square(src), dir.opposite(), jump, continues));
        } else {
            out.push(Move::new(src, dir, jump, continues));
        }
    }

    /// Pieces that can slide one step in `dir`. Backward steps are for
    /// kings only.
    #[inline]
    fn slide_movers(&self, dir: Direction) -> Bitboard {
        let pieces = if dir.is_forward() { self.own } else { self.kings };
        self.empty.rotr(dir.slide_offset() as u32) & pieces & SLIDE_MASKS[dir as usize]
    }

    /// Pieces with an enemy one step away in `dir` and an empty landing
    /// square behind it
    #[inline]
    fn jump_movers(&self, dir: Direction) -> Bitboard {
        let pieces = if dir.is_forward() { self.own } else { self.kings };
        self.empty.rotr(dir.jump_offset() as u32)
            & self.enemy.rotr(dir.slide_offset() as u32)
            & pieces
            & JUMP_MASKS[dir as usize]
    }

    /// Whether a jump from `src` in `dir` leaves its piece with another
    /// capture. Computed from the post-hop occupancy words; crowning ends
    /// the chain.
    fn jump_continues(&self, src: u8, dir: Direction) -> bool {
        let land = src.wrapping_add(dir.jump_offset()) & 31;
        let captured = src.wrapping_add(dir.slide_offset()) & 31;
        let king = self.kings.contains(src);
        if !king && Bitboard::TOP_RANK.contains(land) {
            return false;
        }
        let own = (self.own & !Bitboard::from_square(src)) | Bitboard::from_square(land);
        let enemy = self.enemy & !Bitboard::from_square(captured);
        let empty = !(own | enemy);
        for next in Direction::ALL {
            if !king && !next.is_forward() {
                continue;
            }
            if JUMP_MASKS[next as usize].contains(land)
                && enemy.contains(land.wrapping_add(next.slide_offset()) & 31)
                && empty.contains(land.wrapping_add(next.jump_offset()) & 31)
            {
                return true;
            }
        }
        false
    }

    fn push_slides(&self, out: &mut MoveList) {
        for dir in Direction::ALL {
            let mut movers = self.slide_movers(dir);
            while movers.is_not_empty() {
                let src = movers.pop_lsb();
                self.emit(out, src, dir, false, false);
            }
        }
    }

    fn push_jumps(&self, out: &mut MoveList) {
        for dir in Direction::ALL {
            let mut movers = self.jump_movers(dir);
            while movers.is_not_empty() {
                let src = movers.pop_lsb();
                self.emit(out, src, dir, true, self.jump_continues(src, dir));
            }
        }
    }
}

/// Generate all legal moves for the side to move. If any capture is
/// available only captures are returned.
pub fn legal_moves(pos: &Position) -> MoveList {
    let frame = Frame::new(pos);
    let mut out = MoveList::new();
    frame.push_jumps(&mut out);
    if out.is_empty() {
        frame.push_slides(&mut out);
    }
    out
}

/// Generate the jumps available to the single piece on `sq`. This is the
/// continuation set of a capture chain: after applying a move whose
/// continues-capture flag is set, the only legal moves are the ones this
/// returns for the landing square.
pub fn jumps_from(pos: &Position, sq: u8) -> MoveList {
    let frame = Frame::new(pos);
    let src = frame.board_square(sq); // board <-> canonical is an involution
    let from = Bitboard::from_square(src);
    let mut out = MoveList::new();
    for dir in Direction::ALL {
        if (frame.jump_movers(dir) & from).is_not_empty() {
            frame.emit(&mut out, src, dir, true, frame.jump_continues(src, dir));
        }
    }
    out
}

/// Whether the side to move has any capture available
pub fn has_jumps(pos: &Position) -> bool {
    let frame = Frame::new(pos);
    Direction::ALL
        .iter()
        .any(|&dir| frame.jump_movers(dir).is_not_empty())
}

/// Whether `mv` is legal in `pos` (chain continuations excluded; those are
/// validated against [`jumps_from`] by the caller driving the chain)
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    !mv.is_null() && legal_moves(pos).contains(mv)
}

/// Count the leaf nodes of the move-generation tree to the given depth. A
/// complete turn costs one level of depth; the hops of a multi-capture do
/// not consume depth individually.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for &mv in legal_moves(pos).iter() {
        let next = pos.apply(mv);
        if mv.continues_capture() {
            nodes += perft_chain(&next, mv.dest(), depth);
        } else {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}

fn perft_chain(pos: &Position, sq: u8, depth: u32) -> u64 {
    let moves = jumps_from(pos, sq);
    debug_assert!(!moves.is_empty(), "continues-capture flag promised a jump");
    let mut nodes = 0;
    for &mv in moves.iter() {
        let next = pos.apply(mv);
        if mv.continues_capture() {
            nodes += perft_chain(&next, mv.dest(), depth);
        } else {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}
