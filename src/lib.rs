pub mod core;
pub mod engine;

pub use crate::core::{Bitboard, Direction, Move, MoveList, Position, PositionError, Side};
pub use crate::engine::movegen;
pub use crate::engine::{evaluate, SearchLimits, SearchResult, Searcher, TranspositionTable};
