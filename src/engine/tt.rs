//! Transposition table
//!
//! A fixed-capacity hash table keyed by position fingerprint. Every probe
//! verifies the full 64-bit key, so an index collision degrades into a miss
//! rather than corrupting the search.
//!
//! Scores in the mate region are stored as distance from the storing node,
//! not distance from the root; [`score_to_tt`] and [`score_from_tt`] do the
//! translation so an entry written at one ply stays valid at another.

use crate::core::Move;
use crate::engine::search::MATE_BOUND;

/// Bound kind of a stored score
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Bound {
    /// Exact score
    Exact = 0,
    /// Lower bound (beta cutoff)
    Lower = 1,
    /// Upper bound (failed low)
    Upper = 2,
}

/// A single entry in the transposition table
#[derive(Clone, Copy)]
pub struct TTEntry {
    /// Position fingerprint (for verification)
    pub key: u64,
    /// Best move found
    pub best_move: Move,
    /// Search depth
    pub depth: u8,
    /// Score (mate region normalized to distance from this node)
    pub score: i16,
    /// Bound kind
    pub bound: Bound,
    /// Age (for replacement)
    pub age: u8,
}

impl TTEntry {
    pub const EMPTY: TTEntry = TTEntry {
        key: 0,
        best_move: Move::NULL,
        depth: 0,
        score: 0,
        bound: Bound::Exact,
        age: 0,
    };
}

/// Translate a search score into table form at the given ply
#[inline]
pub fn score_to_tt(score: i16, ply: u8) -> i16 {
    if score > MATE_BOUND {
        score + ply as i16
    } else if score < -MATE_BOUND {
        score - ply as i16
    } else {
        score
    }
}

/// Translate a table score back into search form at the given ply
#[inline]
pub fn score_from_tt(score: i16, ply: u8) -> i16 {
    if score > MATE_BOUND {
        score - ply as i16
    } else if score < -MATE_BOUND {
        score + ply as i16
    } else {
        score
    }
}

/// Transposition table
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    size: usize,
    age: u8,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in MB
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TTEntry>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;
        // Round down to power of 2 for efficient indexing
        let size = num_entries.next_power_of_two() / 2;

        TranspositionTable {
            entries: vec![TTEntry::EMPTY; size.max(1)],
            size: size.max(1),
            age: 0,
        }
    }

    /// Get the index for a fingerprint
    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & (self.size - 1)
    }

    /// Probe the table for an entry
    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        let entry = self.entries[self.index(key)];
        if entry.key == key {
            Some(entry)
        } else {
            None
        }
    }

    /// Store an entry in the table.
    ///
    /// An occupied slot survives only when it was written during the
    /// current search generation and holds a deeper result than the
    /// incoming one.
    pub fn store(&mut self, key: u64, best_move: Move, depth: u8, score: i16, bound: Bound) {
        let idx = self.index(key);
        let entry = &mut self.entries[idx];

        let keep = entry.key != 0 && entry.age == self.age && entry.depth > depth;
        if !keep {
            *entry = TTEntry {
                key,
                best_move,
                depth,
                score,
                bound,
                age: self.age,
            };
        }
    }

    /// Clear the table
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
        self.age = 0;
    }

    /// Increment the age counter (call at the start of each search)
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    /// Get the fill rate in permille of a fixed sample
    pub fn hashfull(&self) -> usize {
        let sample_size = 1000.min(self.size);
        let used = self.entries[..sample_size]
            .iter()
            .filter(|e| e.key != 0)
            .count();
        (used * 1000) / sample_size
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;
    use crate::engine::search::MATE_SCORE;

    fn some_move() -> Move {
        Move::new(14, Direction::ForwardRight, false, false)
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let key = 0xDEAD_BEEF_CAFE_F00D;
        tt.store(key, some_move(), 5, 42, Bound::Exact);

        let entry = tt.probe(key).unwrap();
        assert_eq!(entry.key, key);
        assert_eq!(entry.best_move, some_move());
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 42);
        assert_eq!(entry.bound, Bound::Exact);
    }

    #[test]
    fn test_probe_verifies_full_key() {
        let mut tt = TranspositionTable::new(1);
        let key = 0x1234_5678_9ABC_DEF0;
        tt.store(key, some_move(), 3, 7, Bound::Lower);
        // Same table slot, different key
        let colliding = key ^ (1u64 << 63);
        assert!(tt.probe(colliding).is_none());
    }

    #[test]
    fn test_shallower_result_does_not_evict_deeper() {
        let mut tt = TranspositionTable::new(1);
        let key = 0xABCD;
        tt.store(key, some_move(), 9, 100, Bound::Exact);
        tt.store(key, Move::NULL, 2, -5, Bound::Upper);
        let entry = tt.probe(key).unwrap();
        assert_eq!(entry.depth, 9);
        assert_eq!(entry.score, 100);
    }

    #[test]
    fn test_stale_entries_are_replaced() {
        let mut tt = TranspositionTable::new(1);
        let key = 0xABCD;
        tt.store(key, some_move(), 9, 100, Bound::Exact);
        tt.new_search();
        tt.store(key, Move::NULL, 1, -5, Bound::Upper);
        let entry = tt.probe(key).unwrap();
        assert_eq!(entry.depth, 1);
        assert_eq!(entry.score, -5);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(1);
        tt.store(0xABCD, some_move(), 1, 1, Bound::Exact);
        tt.clear();
        assert!(tt.probe(0xABCD).is_none());
        assert_eq!(tt.hashfull(), 0);
    }

    #[test]
    fn test_mate_score_normalization() {
        // A mate found 3 plies below a node stored at ply 2 must read back
        // the same distance from any other ply
        let score = MATE_SCORE - 5;
        let stored = score_to_tt(score, 2);
        assert_eq!(stored, MATE_SCORE - 3);
        assert_eq!(score_from_tt(stored, 2), score);
        assert_eq!(score_from_tt(stored, 4), MATE_SCORE - 7);

        let loss = -(MATE_SCORE - 5);
        let stored = score_to_tt(loss, 2);
        assert_eq!(score_from_tt(stored, 2), loss);

        // Ordinary scores pass through untouched
        assert_eq!(score_to_tt(17, 30), 17);
        assert_eq!(score_from_tt(-17, 30), -17);
    }
}
