//! Shadow projection.
//!
//! Every tree casts a shadow as tall as itself onto the next `size` cells in
//! the direction the sun shines. Two layers are tracked: today's sun
//! direction and tomorrow's, so the agent can estimate next turn's income.

use super::cell::{CellIndex, Direction};
use super::grid::Board;

/// Per-cell shadow heights for the current and the following day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowMap {
    sun: Direction,
    shadow: Vec<u8>,
    next_shadow: Vec<u8>,
}

impl ShadowMap {
    /// Creates an unshadowed map for the given day.
    pub fn new(cell_count: usize, day: u32) -> Self {
        ShadowMap {
            sun: Direction::of_sun(day),
            shadow: vec![0; cell_count],
            next_shadow: vec![0; cell_count],
        }
    }

    /// Today's sun direction.
    pub fn sun(&self) -> Direction {
        self.sun
    }

    /// Projects the shadow of a tree of `size` standing on `origin` onto both
    /// layers. Recorded heights only ever increase.
    pub fn cast(&mut self, board: &Board, origin: CellIndex, size: u8) {
        for target in board.ray(origin, self.sun, size) {
            self.shadow[target] = self.shadow[target].max(size);
        }
        for target in board.ray(origin, self.sun.next(), size) {
            self.next_shadow[target] = self.next_shadow[target].max(size);
        }
    }

    /// Shadow height on `cell` under today's sun.
    #[inline]
    pub fn shadow(&self, cell: CellIndex) -> u8 {
        self.shadow[cell]
    }

    /// Shadow height on `cell` under tomorrow's sun.
    #[inline]
    pub fn next_shadow(&self, cell: CellIndex) -> u8 {
        self.next_shadow[cell]
    }
}
