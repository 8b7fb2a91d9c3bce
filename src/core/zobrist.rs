//! Zobrist hashing for position fingerprints
//!
//! Random bitstrings XOR'd together give every (occupancy, side-to-move)
//! combination a deterministic 64-bit fingerprint for the transposition
//! table. Keys come from a fixed-seed PRNG so fingerprints are reproducible
//! across runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::Side;

/// Number of distinct piece classes: men and kings for each side
pub const PIECE_CLASSES: usize = 4;

/// Zobrist random keys
pub struct ZobristKeys {
    /// Keys for each piece class on each square [class][square]
    pieces: [[u64; 32]; PIECE_CLASSES],
    /// Key XOR'd in when the down-moving side is on the clock
    side: u64,
}

impl ZobristKeys {
    /// Get the global Zobrist keys instance
    pub fn instance() -> &'static ZobristKeys {
        static KEYS: std::sync::OnceLock<ZobristKeys> = std::sync::OnceLock::new();
        KEYS.get_or_init(ZobristKeys::new)
    }

    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x9E37_79B9_7F4A_7C15);

        let mut pieces = [[0u64; 32]; PIECE_CLASSES];
        for class_keys in pieces.iter_mut() {
            for sq_key in class_keys.iter_mut() {
                *sq_key = rng.next_u64();
            }
        }

        ZobristKeys {
            pieces,
            side: rng.next_u64(),
        }
    }

    /// Key for a man or king of `side` on `sq`
    #[inline]
    pub fn piece(&self, side: Side, king: bool, sq: u8) -> u64 {
        let class = side.index() * 2 + king as usize;
        self.pieces[class][sq as usize]
    }

    /// Side-to-move key
    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.side
    }
}
