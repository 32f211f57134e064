//! Trees on the board.

use super::cell::CellIndex;

/// Largest tree size; a tree this big can only be completed.
pub const MAX_TREE_SIZE: u8 = 3;

/// Number of distinct tree sizes (0 = seed .. 3 = fully grown).
pub const SIZE_COUNT: usize = MAX_TREE_SIZE as usize + 1;

/// A tree as reported by the judge for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeObservation {
    pub cell: CellIndex,
    pub size: u8,
    pub is_mine: bool,
    /// Dormant trees have already acted this day.
    pub is_dormant: bool,
}

/// A tree in the current turn's ledger, together with the sizes recorded at
/// its cell on previous days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub cell: CellIndex,
    pub size: u8,
    pub is_mine: bool,
    pub is_dormant: bool,
    pub history: Vec<u8>,
}

impl Tree {
    /// Wraps an observation with its size history.
    pub fn new(obs: TreeObservation, history: Vec<u8>) -> Self {
        Tree {
            cell: obs.cell,
            size: obs.size,
            is_mine: obs.is_mine,
            is_dormant: obs.is_dormant,
            history,
        }
    }

    /// Returns true if this tree belongs to the acting player and may act.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.is_mine && !self.is_dormant
    }

    /// Number of recorded days this cell's tree has spent at its current size.
    pub fn days_at_size(&self) -> usize {
        self.history.iter().filter(|&&s| s == self.size).count()
    }
}
