//! Core checkers types and representations
//!
//! This module contains the fundamental building blocks of the engine:
//! - Bitboard representation
//! - Board state and position
//! - Move encoding
//! - Zobrist hashing

pub mod bitboard;
pub mod board;
pub mod moves;
pub mod zobrist;

pub use bitboard::{rotate_square, Bitboard, BitboardIter};
pub use board::{Position, PositionError, Side};
pub use moves::{Direction, Move, MoveList, MAX_MOVES};
pub use zobrist::ZobristKeys;
