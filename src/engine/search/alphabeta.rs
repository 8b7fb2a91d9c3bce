//! Negamax alpha-beta with chained captures.

use crate::core::{Move, Position};
use crate::engine::movegen;
use crate::engine::eval::evaluate;
use crate::engine::tt::{score_from_tt, score_to_tt, Bound};

use super::ordering::MovePicker;
use super::searcher::Searcher;
use super::types::{INFINITY, MATE_SCORE};

impl Searcher {
    pub(super) fn negamax(
        &mut self,
        pos: &Position,
        depth: u8,
        mut alpha: i16,
        beta: i16,
        ply: u8,
    ) -> i16 {
        if self.should_stop() {
            return 0;
        }
        self.stats.nodes += 1;

        if depth == 0 {
            return evaluate(pos);
        }

        let alpha_orig = alpha;
        let key = pos.fingerprint();
        let mut tt_move = Move::NULL;

        if self.tt_enabled {
            if let Some(entry) = self.tt.probe(key) {
                self.stats.tt_hits += 1;
                tt_move = entry.best_move;
                // Only an entry of the same remaining depth may settle the
                // node; a deeper one holds a different fixed-depth value.
                // Deeper entries still seed ordering through tt_move.
                if entry.depth == depth {
                    let score = score_from_tt(entry.score, ply);
                    match entry.bound {
                        Bound::Exact => return score,
                        Bound::Lower if score >= beta => {
                            self.stats.tt_cutoffs += 1;
                            return score;
                        }
                        Bound::Upper if score <= alpha => {
                            self.stats.tt_cutoffs += 1;
                            return score;
                        }
                        _ => {}
                    }
                }
            }
        }

        let moves = movegen::legal_moves(pos);
        if moves.is_empty() {
            // The player to move has no move and loses; prefer the longer
            // defense (a loss further from the root scores higher)
            return -(MATE_SCORE - ply as i16);
        }

        let mut picker = MovePicker::new(moves, tt_move);
        let mut best_score = -INFINITY;
        let mut best_move = Move::NULL;

        while let Some(mv) = picker.next() {
            let next = pos.apply(mv);
            let score = if mv.continues_capture() {
                // Same side keeps moving, so no negation and no window flip
                self.chain(&next, mv.dest(), depth, alpha, beta, ply)
            } else {
                -self.negamax(&next, depth - 1, -beta, -alpha, ply + 1)
            };

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        if self.tt_enabled && !self.should_stop() {
            let bound = if best_score >= beta {
                Bound::Lower
            } else if best_score <= alpha_orig {
                Bound::Upper
            } else {
                Bound::Exact
            };
            self.tt.store(key, best_move, depth, score_to_tt(best_score, ply), bound);
        }

        best_score
    }

    /// Continue a capture chain from `sq`. The position has the same side
    /// to move as its parent and a move set restricted to the jumps of the
    /// landed piece, so the node is searched with the parent's window and
    /// never consults the table (its fingerprint would collide with the
    /// unrestricted node for the same occupancy).
    pub(super) fn chain(
        &mut self,
        pos: &Position,
        sq: u8,
        depth: u8,
        mut alpha: i16,
        beta: i16,
        ply: u8,
    ) -> i16 {
        if self.should_stop() {
            return 0;
        }
        self.stats.nodes += 1;

        let moves = movegen::jumps_from(pos, sq);
        debug_assert!(!moves.is_empty(), "continues-capture flag promised a jump");

        let mut best_score = -INFINITY;
        for &mv in moves.iter() {
            let next = pos.apply(mv);
            let score = if mv.continues_capture() {
                self.chain(&next, mv.dest(), depth, alpha, beta, ply)
            } else {
                -self.negamax(&next, depth - 1, -beta, -alpha, ply + 1)
            };

            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        best_score
    }

    /// Search the root position explicitly so the chosen move comes from
    /// this iteration, not from a table probe. Root ordering is seeded with
    /// `hint` (the previous iteration's best move) rather than a table
    /// entry, so the move picked among equal scores does not depend on
    /// whether the table is enabled.
    pub(super) fn search_root(
        &mut self,
        pos: &Position,
        depth: u8,
        mut alpha: i16,
        beta: i16,
        hint: Move,
    ) -> (i16, Option<Move>) {
        self.stats.nodes += 1;

        let moves = movegen::legal_moves(pos);
        if moves.is_empty() {
            return (-MATE_SCORE, None);
        }

        let key = pos.fingerprint();
        let alpha_orig = alpha;
        let mut picker = MovePicker::new(moves, hint);
        let mut best_score = -INFINITY;
        let mut best_move = None;

        while let Some(mv) = picker.next() {
            let next = pos.apply(mv);
            let score = if mv.continues_capture() {
                self.chain(&next, mv.dest(), depth, alpha, beta, 0)
            } else {
                -self.negamax(&next, depth - 1, -beta, -alpha, 1)
            };
            if self.should_stop() {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        if self.tt_enabled && !self.should_stop() {
            if let Some(mv) = best_move {
                let bound = if best_score >= beta {
                    Bound::Lower
                } else if best_score <= alpha_orig {
                    Bound::Upper
                } else {
                    Bound::Exact
                };
                self.tt.store(key, mv, depth, score_to_tt(best_score, 0), bound);
            }
        }

        (best_score, best_move)
    }
}
