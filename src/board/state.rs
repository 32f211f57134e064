//! Per-turn game state.
//!
//! A `GameObservation` is what the judge reports for one turn. A `GameState`
//! is the same data resolved against the board: trees carry their history,
//! cells know their occupant, and the shadow layers are cast. Both are
//! rebuilt from scratch every turn.

use thiserror::Error;

use super::cell::CellIndex;
use super::grid::Board;
use super::history::HistoryMap;
use super::shadow::ShadowMap;
use super::tree::{Tree, TreeObservation, MAX_TREE_SIZE, SIZE_COUNT};

/// Errors raised when an observation does not fit the board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("tree on cell {cell} is off the board ({count} cells)")]
    UnknownCell { cell: CellIndex, count: usize },

    #[error("tree on cell {cell} has invalid size {size}")]
    InvalidSize { cell: CellIndex, size: u8 },

    #[error("tree on unusable cell {0}")]
    UnusableCell(CellIndex),

    #[error("two trees reported on cell {0}")]
    DuplicateTree(CellIndex),
}

/// Everything the judge reports for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameObservation {
    pub day: u32,
    pub nutrients: u32,
    pub my_sun: u32,
    pub my_score: u32,
    pub opp_sun: u32,
    pub opp_score: u32,
    pub opp_is_waiting: bool,
    pub trees: Vec<TreeObservation>,
    /// Legal moves as listed by the judge, verbatim. Informational only.
    pub possible_moves: Vec<String>,
}

/// A player's resources and tree counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spirit {
    pub sun: u32,
    pub score: u32,
    /// Asleep until the next day.
    pub is_waiting: bool,
    /// Owned trees by size.
    pub tree_count: [u32; SIZE_COUNT],
}

impl Spirit {
    /// Builds a spirit, counting the sizes of the trees it owns.
    pub fn new<I>(sun: u32, score: u32, is_waiting: bool, sizes: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut tree_count = [0; SIZE_COUNT];
        for size in sizes {
            tree_count[size as usize] += 1;
        }
        Spirit {
            sun,
            score,
            is_waiting,
            tree_count,
        }
    }

    /// Total number of trees owned.
    pub fn total_trees(&self) -> u32 {
        self.tree_count.iter().sum()
    }
}

/// The resolved snapshot of one turn.
#[derive(Debug, Clone)]
pub struct GameState<'a> {
    pub day: u32,
    pub nutrients: u32,
    pub board: &'a Board,
    /// Every tree on the board, in the order the judge reported them.
    pub trees: Vec<Tree>,
    pub me: Spirit,
    pub opp: Spirit,
    occupancy: Vec<Option<usize>>,
    shadows: ShadowMap,
}

impl<'a> GameState<'a> {
    /// Resolves an observation against the board.
    ///
    /// `history` must already be advanced to this turn; trees missing from it
    /// start with their current size.
    pub fn new(
        board: &'a Board,
        obs: &GameObservation,
        history: &HistoryMap,
    ) -> Result<GameState<'a>, StateError> {
        let count = board.len();
        let mut occupancy = vec![None; count];
        let mut shadows = ShadowMap::new(count, obs.day);
        let mut trees = Vec::with_capacity(obs.trees.len());

        for (i, t) in obs.trees.iter().enumerate() {
            let cell = board
                .get(t.cell)
                .ok_or(StateError::UnknownCell { cell: t.cell, count })?;
            if t.size > MAX_TREE_SIZE {
                return Err(StateError::InvalidSize {
                    cell: t.cell,
                    size: t.size,
                });
            }
            if !cell.is_usable() {
                return Err(StateError::UnusableCell(t.cell));
            }
            if occupancy[t.cell].replace(i).is_some() {
                return Err(StateError::DuplicateTree(t.cell));
            }

            shadows.cast(board, t.cell, t.size);
            let past = history.get(t.cell).map_or_else(|| vec![t.size], <[u8]>::to_vec);
            trees.push(Tree::new(*t, past));
        }

        let me = Spirit::new(
            obs.my_sun,
            obs.my_score,
            false,
            trees.iter().filter(|t| t.is_mine).map(|t| t.size),
        );
        let opp = Spirit::new(
            obs.opp_sun,
            obs.opp_score,
            obs.opp_is_waiting,
            trees.iter().filter(|t| !t.is_mine).map(|t| t.size),
        );

        Ok(GameState {
            day: obs.day,
            nutrients: obs.nutrients,
            board,
            trees,
            me,
            opp,
            occupancy,
            shadows,
        })
    }

    /// The tree standing on `cell`, if any.
    pub fn occupant(&self, cell: CellIndex) -> Option<&Tree> {
        self.occupancy
            .get(cell)
            .copied()
            .flatten()
            .map(|i| &self.trees[i])
    }

    #[inline]
    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        matches!(self.occupancy.get(cell), Some(Some(_)))
    }

    pub fn shadows(&self) -> &ShadowMap {
        &self.shadows
    }

    /// The acting player's trees that can still act this day.
    pub fn available_trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter().filter(|t| t.is_available())
    }

    /// The spirit owning trees with the given flag.
    pub fn spirit(&self, is_mine: bool) -> &Spirit {
        if is_mine {
            &self.me
        } else {
            &self.opp
        }
    }
}
