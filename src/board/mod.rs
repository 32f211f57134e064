//! Board representation and game-state types.
//!
//! Contains the hex topology, shadow projection, trees with their size
//! history, player resources and the overall per-turn game state.

pub mod action;
pub mod cell;
pub mod grid;
pub mod history;
pub mod shadow;
pub mod state;
pub mod tree;

pub use action::Action;
pub use cell::{Cell, CellIndex, Direction, DIRECTION_COUNT, MAX_RICHNESS};
pub use grid::{Board, BoardError, STANDARD_CELL_COUNT};
pub use history::HistoryMap;
pub use shadow::ShadowMap;
pub use state::{GameObservation, GameState, Spirit, StateError};
pub use tree::{Tree, TreeObservation, MAX_TREE_SIZE, SIZE_COUNT};
