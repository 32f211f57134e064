//! Actions a player can take on its turn.

use super::cell::CellIndex;

/// One turn's action. The data model maps one-to-one onto the judge's
/// output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Sleep until the next day: `WAIT`
    Wait,

    /// Grow the tree on a cell by one size: `GROW 12`
    Grow { cell: CellIndex },

    /// Plant a seed from a tree onto a target cell: `SEED 12 27`
    Seed { source: CellIndex, target: CellIndex },

    /// Harvest a fully grown tree for points: `COMPLETE 12`
    Complete { cell: CellIndex },
}

impl Action {
    /// The cell whose tree performs the action, if any.
    pub fn actor(&self) -> Option<CellIndex> {
        match *self {
            Action::Wait => None,
            Action::Grow { cell } | Action::Complete { cell } => Some(cell),
            Action::Seed { source, .. } => Some(source),
        }
    }
}
