//! Searcher: iterative deepening driver, aspiration windows, and limits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::core::{Move, Position};
use crate::engine::movegen;
use crate::engine::tt::TranspositionTable;

use super::types::{
    SearchLimits, SearchResult, SearchStats, ASPIRATION_MAX, ASPIRATION_WINDOW, INFINITY,
    MATE_BOUND, MATE_SCORE, MAX_DEPTH,
};

/// A search session. Owns the transposition table, so reusing one searcher
/// across successive turns of a game carries learned entries forward.
pub struct Searcher {
    pub(super) tt: TranspositionTable,
    pub(super) tt_enabled: bool,
    pub(super) stats: SearchStats,
    pub(super) stop: Arc<AtomicBool>,
    pub(super) start_time: Instant,
    pub(super) time_limit: Option<Duration>,
    pub(super) node_limit: Option<u64>,
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            tt: TranspositionTable::default(),
            tt_enabled: true,
            stats: SearchStats::default(),
            stop: Arc::new(AtomicBool::new(false)),
            start_time: Instant::now(),
            time_limit: None,
            node_limit: None,
        }
    }

    /// Shared flag that aborts the search when set from another thread
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn set_hash_size(&mut self, size_mb: usize) {
        self.tt = TranspositionTable::new(size_mb);
    }

    /// Turn the transposition table off (every probe misses, nothing is
    /// stored). The search must return the same move and score either way;
    /// only the node count changes.
    pub fn set_tt_enabled(&mut self, enabled: bool) {
        self.tt_enabled = enabled;
    }

    pub fn clear(&mut self) {
        self.tt.clear();
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub(super) fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(limit) = self.node_limit {
            if self.stats.nodes >= limit {
                return true;
            }
        }
        if let Some(limit) = self.time_limit {
            if self.start_time.elapsed() >= limit {
                return true;
            }
        }
        false
    }

    /// Search `pos` within `limits` and return the result of the deepest
    /// fully completed iteration. An iteration cut short by a limit never
    /// replaces the previous one.
    pub fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        self.stop.store(false, Ordering::Relaxed);
        self.start_time = Instant::now();
        self.stats = SearchStats::default();
        self.tt.new_search();
        self.time_limit = if limits.infinite {
            None
        } else {
            limits.movetime.map(Duration::from_millis)
        };
        self.node_limit = limits.nodes;

        if movegen::legal_moves(pos).is_empty() {
            return SearchResult {
                best_move: None,
                score: -MATE_SCORE,
                depth: 0,
                nodes: 0,
            };
        }

        let max_depth = limits.depth.unwrap_or(MAX_DEPTH).min(MAX_DEPTH);
        let mut result = SearchResult {
            best_move: None,
            score: -INFINITY,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth {
            if self.should_stop() {
                break;
            }

            let hint = result.best_move.unwrap_or(Move::NULL);
            let Some((score, best_move)) = self.search_widening(pos, depth, result.score, hint)
            else {
                break;
            };

            result = SearchResult {
                best_move,
                score,
                depth,
                nodes: self.stats.nodes,
            };
            debug!(
                "depth {} score {} nodes {} tt_hits {}",
                depth, score, self.stats.nodes, self.stats.tt_hits
            );

            // A proven win or loss cannot improve with more depth
            if score.abs() > MATE_BOUND {
                break;
            }
        }

        result.nodes = self.stats.nodes;
        result
    }

    /// One iteration at `depth` inside an aspiration window around the
    /// previous iteration's score. A result on or outside a window edge is
    /// never accepted; the failing edge is pushed out by a doubling margin
    /// and the depth re-searched, falling back to the full window once the
    /// margin passes [`ASPIRATION_MAX`]. Returns `None` when a limit fired
    /// before the iteration finished.
    fn search_widening(
        &mut self,
        pos: &Position,
        depth: u8,
        prev_score: i16,
        hint: Move,
    ) -> Option<(i16, Option<Move>)> {
        let (mut alpha, mut beta) = if depth >= 4 && prev_score.abs() < MATE_BOUND {
            (prev_score - ASPIRATION_WINDOW, prev_score + ASPIRATION_WINDOW)
        } else {
            (-INFINITY, INFINITY)
        };
        let mut delta = ASPIRATION_WINDOW;

        loop {
            let (score, best_move) = self.search_root(pos, depth, alpha, beta, hint);
            if self.should_stop() {
                return None;
            }

            if score <= alpha {
                delta = delta.saturating_mul(2);
                alpha = if delta > ASPIRATION_MAX {
                    -INFINITY
                } else {
                    score - delta
                };
            } else if score >= beta {
                delta = delta.saturating_mul(2);
                beta = if delta > ASPIRATION_MAX {
                    INFINITY
                } else {
                    score + delta
                };
            } else {
                return Some((score, best_move));
            }
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}
