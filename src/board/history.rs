//! Size history per cell.
//!
//! The judge does not report how long a tree has been at its size, so the
//! agent remembers it: each cell holding a tree maps to the sizes seen there,
//! one entry per day. The map is rebuilt every turn from the previous one;
//! a tree is matched to its past by cell index only.

use std::collections::BTreeMap;

use super::cell::CellIndex;
use super::tree::TreeObservation;

/// Cell index -> sizes recorded at that cell, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryMap {
    sizes: BTreeMap<CellIndex, Vec<u8>>,
}

impl HistoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from explicit entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CellIndex, Vec<u8>)>,
    {
        HistoryMap {
            sizes: entries.into_iter().collect(),
        }
    }

    /// Sizes recorded at `cell`, if a tree stood there last turn.
    pub fn get(&self, cell: CellIndex) -> Option<&[u8]> {
        self.sizes.get(&cell).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Produces the history for the current ledger.
    ///
    /// New cells start at `[size]`. Known cells keep their sizes and, when
    /// `new_day` is set, record the current size. Cells without a tree now
    /// are forgotten.
    pub fn advance(&self, trees: &[TreeObservation], new_day: bool) -> HistoryMap {
        let sizes = trees
            .iter()
            .map(|tree| {
                let history = match self.sizes.get(&tree.cell) {
                    None => vec![tree.size],
                    Some(past) if new_day => {
                        let mut history = past.clone();
                        history.push(tree.size);
                        history
                    }
                    Some(past) => past.clone(),
                };
                (tree.cell, history)
            })
            .collect();
        HistoryMap { sizes }
    }
}
