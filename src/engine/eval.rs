//! Material evaluation
//!
//! A position is scored by counting pieces: one point per man, two per king,
//! from the point of view of the side to move. The search depends only on
//! this signature; a richer evaluator slots in without touching it.

use crate::core::{Position, Side};

/// A king counts for this many men
pub const KING_WEIGHT: i16 = 2;

/// Static evaluation of `pos` from the side to move's point of view
#[inline]
pub fn evaluate(pos: &Position) -> i16 {
    let us = pos.side_to_move();
    material(pos, us) - material(pos, us.opposite())
}

#[inline]
fn material(pos: &Position, side: Side) -> i16 {
    pos.men(side).count() as i16 + KING_WEIGHT * pos.kings(side).count() as i16
}
