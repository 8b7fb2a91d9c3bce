//! Lazy move ordering.
//!
//! Scores are assigned once when the picker is built; each call to `next`
//! selection-sorts the best remaining move to the front. A cutoff after k
//! of n moves costs O(k·n) comparisons and the tail is never sorted.

use crate::core::{Move, MoveList, MAX_MOVES};

const TT_MOVE_SCORE: i32 = 1_000_000;
const CHAIN_JUMP_SCORE: i32 = 20_000;
const JUMP_SCORE: i32 = 10_000;

pub struct MovePicker {
    moves: MoveList,
    scores: [i32; MAX_MOVES],
    index: usize,
}

impl MovePicker {
    /// Build a picker over `moves`. The table's best move, if present in
    /// the list, is yielded first; then chain-starting jumps, then plain
    /// jumps, then slides.
    pub fn new(moves: MoveList, tt_move: Move) -> Self {
        let mut scores = [0i32; MAX_MOVES];
        for (i, &mv) in moves.iter().enumerate() {
            scores[i] = if !tt_move.is_null() && mv == tt_move {
                TT_MOVE_SCORE
            } else if mv.continues_capture() {
                CHAIN_JUMP_SCORE
            } else if mv.is_jump() {
                JUMP_SCORE
            } else {
                0
            };
        }
        MovePicker {
            moves,
            scores,
            index: 0,
        }
    }

    /// Number of moves in the underlying list
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Select and return the best remaining move
    pub fn next(&mut self) -> Option<Move> {
        if self.index >= self.moves.len() {
            return None;
        }
        let mut best = self.index;
        for i in self.index + 1..self.moves.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(self.index, best);
        self.scores.swap(self.index, best);
        let mv = self.moves[self.index];
        self.index += 1;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    #[test]
    fn test_picker_yields_tt_move_first() {
        let slide = Move::new(20, Direction::ForwardLeft, false, false);
        let jump = Move::new(14, Direction::ForwardRight, true, false);
        let tt_move = Move::new(8, Direction::ForwardLeft, false, false);

        let mut list = MoveList::new();
        list.push(slide);
        list.push(jump);
        list.push(tt_move);

        let mut picker = MovePicker::new(list, tt_move);
        assert_eq!(picker.next(), Some(tt_move));
        assert_eq!(picker.next(), Some(jump));
        assert_eq!(picker.next(), Some(slide));
        assert_eq!(picker.next(), None);
    }

    #[test]
    fn test_picker_prefers_chain_jumps() {
        let jump = Move::new(14, Direction::ForwardRight, true, false);
        let chain = Move::new(8, Direction::ForwardLeft, true, true);

        let mut list = MoveList::new();
        list.push(jump);
        list.push(chain);

        let mut picker = MovePicker::new(list, Move::NULL);
        assert_eq!(picker.next(), Some(chain));
        assert_eq!(picker.next(), Some(jump));
    }

    #[test]
    fn test_picker_is_exhaustive() {
        let mut list = MoveList::new();
        for sq in [8u8, 14, 20, 26] {
            list.push(Move::new(sq, Direction::ForwardRight, false, false));
        }
        let mut picker = MovePicker::new(list, Move::NULL);
        let mut count = 0;
        while picker.next().is_some() {
            count += 1;
        }
        assert_eq!(count, 4);
    }
}
