//! Engine components
//!
//! This module contains the search side of the crate:
//! - Bitmask move generation
//! - Material evaluation
//! - Alpha-beta search with iterative deepening
//! - Transposition table

pub mod eval;
pub mod movegen;
pub mod search;
pub mod tt;

pub use eval::{evaluate, KING_WEIGHT};
pub use search::{SearchLimits, SearchResult, SearchStats, Searcher, INFINITY, MATE_SCORE};
pub use tt::{Bound, TTEntry, TranspositionTable};
