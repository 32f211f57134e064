//! Candidate classification.
//!
//! Splits the acting player's available trees into the three candidate sets
//! the rules pick from, each sorted best first:
//!
//! - `completable`: fully grown and ripe (or it is the final day), by ROI
//! - `growable`: affordable to grow, by ROI
//! - `seeding`: has a free seed target, by the richness of its best target
//!
//! A completable tree is never considered for growing or seeding.

use std::cmp::Ordering;

use crate::board::state::GameState;
use crate::board::tree::MAX_TREE_SIZE;
use crate::config::AgentConfig;
use crate::eval::TreeEconomics;

/// The candidate sets for one turn, each sorted best first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    pub completable: Vec<TreeEconomics>,
    pub growable: Vec<TreeEconomics>,
    pub seeding: Vec<TreeEconomics>,
}

impl Candidates {
    pub fn is_empty(&self) -> bool {
        self.completable.is_empty() && self.growable.is_empty() && self.seeding.is_empty()
    }
}

/// Classifies every available tree of the acting player.
pub fn classify(state: &GameState, config: &AgentConfig) -> Candidates {
    let final_day = config.is_final_day(state.day);
    let sun = state.me.sun;
    let mut candidates = Candidates::default();

    for tree in state.available_trees() {
        let econ = TreeEconomics::appraise(state, tree);

        if econ.size == MAX_TREE_SIZE && (econ.is_ripe() || final_day) {
            candidates.completable.push(econ);
            continue;
        }

        if econ.can_seed() {
            candidates.seeding.push(econ.clone());
        }
        if econ.grow_price.is_some_and(|price| sun >= price) {
            candidates.growable.push(econ);
        }
    }

    candidates.completable.sort_by(by_roi_desc);
    candidates.growable.sort_by(by_roi_desc);
    candidates.seeding.sort_by(|a, b| {
        best_target_richness(state, b).cmp(&best_target_richness(state, a))
    });

    candidates
}

/// Descending ROI; stable sorts keep ledger order on ties.
fn by_roi_desc(a: &TreeEconomics, b: &TreeEconomics) -> Ordering {
    b.roi.partial_cmp(&a.roi).unwrap_or(Ordering::Equal)
}

fn best_target_richness(state: &GameState, econ: &TreeEconomics) -> u8 {
    econ.best_target().map_or(0, |cell| state.board.cell(cell).richness)
}
