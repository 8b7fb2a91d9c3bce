//! Search limits, stats, results, and constants.

use crate::core::Move;

/// Budget for one search call. Unset fields mean unlimited; `infinite`
/// leaves only the stop flag as a way to end the search.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub depth: Option<u8>,
    pub nodes: Option<u64>,
    pub movetime: Option<u64>,
    pub infinite: bool,
}

impl SearchLimits {
    /// Limit by depth only
    pub fn depth(depth: u8) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..Default::default()
        }
    }

    /// Limit by node count only
    pub fn nodes(nodes: u64) -> Self {
        SearchLimits {
            nodes: Some(nodes),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,
}

/// Outcome of a search: the deepest fully completed iteration
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Best move, or `None` when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score from the searched side's point of view
    pub score: i16,
    /// Depth of the last completed iteration
    pub depth: u8,
    /// Nodes visited over all iterations
    pub nodes: u64,
}

pub const INFINITY: i16 = 30000;
pub const MATE_SCORE: i16 = 29000;
pub const MAX_DEPTH: u8 = 64;

/// Scores beyond this are mate scores and carry a distance-to-mate in them
pub const MATE_BOUND: i16 = MATE_SCORE - 2 * MAX_DEPTH as i16;

/// Initial half-width of the aspiration window
pub const ASPIRATION_WINDOW: i16 = 2;
/// Once the widening margin exceeds this, re-search with a full window
pub const ASPIRATION_MAX: i16 = 32;
