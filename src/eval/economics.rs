//! Per-tree economics.
//!
//! Derives, for one tree in one turn, everything the selector ranks on:
//! what the next action on it costs, how much value each spent sun point buys,
//! how long the tree has stagnated, where it could drop a seed, and what it
//! will earn tomorrow given the projected shadows.
//!
//! Design: all quantities are recomputed from the `GameState` every turn.
//! Nothing is cached on the tree, so seed targets always reflect the current
//! occupancy.

use crate::board::cell::{CellIndex, MAX_RICHNESS};
use crate::board::state::GameState;
use crate::board::tree::{Tree, MAX_TREE_SIZE, SIZE_COUNT};

/// Sun spent to complete a fully grown tree.
pub const COMPLETE_COST: u32 = 4;

/// Extra stagnant days allowed per missing richness point.
const DAYS_PER_RICHNESS: usize = 4;

/// Returns the sun needed to grow a tree of `size` by one step, given the
/// owner's tree counts by size.
///
/// The base cost doubles with each size (1, 3, 7) and rises by one for every
/// tree the owner already has at the target size. Fully grown trees cannot
/// grow and have no price.
pub fn grow_price(size: u8, counts: &[u32; SIZE_COUNT]) -> Option<u32> {
    if size >= MAX_TREE_SIZE {
        return None;
    }
    let base = (1u32 << (size + 1)) - 1;
    Some(base + counts[size as usize + 1])
}

/// Sun spent by the next action on a tree of `size`: growing, or completing
/// once fully grown.
pub fn action_price(size: u8, counts: &[u32; SIZE_COUNT]) -> u32 {
    grow_price(size, counts).unwrap_or(COMPLETE_COST)
}

/// Value per sun spent: `(richness + 1)^2 / price`. Higher is better.
#[inline]
pub fn roi(richness: u8, price: u32) -> f64 {
    let r = f64::from(richness) + 1.0;
    r * r / f64::from(price.max(1))
}

/// Days a tree may sit at one size before it is considered ready. Richer
/// soil tolerates fewer.
#[inline]
pub fn max_days(richness: u8) -> usize {
    usize::from(MAX_RICHNESS.saturating_sub(richness)) * DAYS_PER_RICHNESS + 1
}

/// Points earned by completing a tree: base nutrients plus a richness bonus.
/// Only fully grown trees score.
pub fn harvest_score(size: u8, richness: u8, nutrients: u32) -> u32 {
    if size == MAX_TREE_SIZE {
        nutrients.saturating_add(2 * u32::from(richness.saturating_sub(1)))
    } else {
        0
    }
}

/// Sun a tree of `size` will collect tomorrow. A tree shadowed by something
/// at least as tall produces nothing.
#[inline]
pub fn next_sun(size: u8, next_shadow: u8) -> u32 {
    if next_shadow < size {
        u32::from(size)
    } else {
        0
    }
}

/// Cells a tree can seed: free, usable cells within reach of its size,
/// richest first. Ties keep breadth-first order.
pub fn seed_targets(state: &GameState, tree: &Tree) -> Vec<CellIndex> {
    if tree.size == 0 {
        return Vec::new();
    }
    let board = state.board;
    let mut targets: Vec<CellIndex> = board
        .area(tree.cell, tree.size)
        .into_iter()
        .filter(|&c| board.cell(c).is_usable() && !state.is_occupied(c))
        .collect();
    targets.sort_by(|&a, &b| board.cell(b).richness.cmp(&board.cell(a).richness));
    targets
}

/// Total sun one player's trees will produce tomorrow.
pub fn projected_income(state: &GameState, is_mine: bool) -> u32 {
    let shadows = state.shadows();
    state
        .trees
        .iter()
        .filter(|t| t.is_mine == is_mine)
        .map(|t| next_sun(t.size, shadows.next_shadow(t.cell)))
        .sum()
}

/// Derived economics of one tree for the current turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEconomics {
    pub cell: CellIndex,
    pub size: u8,
    pub richness: u8,
    /// `None` for fully grown trees.
    pub grow_price: Option<u32>,
    pub roi: f64,
    pub days: usize,
    pub max_days: usize,
    pub harvest_score: u32,
    pub next_sun: u32,
    /// Richest first.
    pub seed_targets: Vec<CellIndex>,
}

impl TreeEconomics {
    /// Appraises a tree against the current state, pricing with its owner's
    /// tree counts.
    pub fn appraise(state: &GameState, tree: &Tree) -> Self {
        let richness = state.board.cell(tree.cell).richness;
        let counts = &state.spirit(tree.is_mine).tree_count;
        let grow_price = grow_price(tree.size, counts);

        TreeEconomics {
            cell: tree.cell,
            size: tree.size,
            richness,
            grow_price,
            roi: roi(richness, action_price(tree.size, counts)),
            days: tree.days_at_size(),
            max_days: max_days(richness),
            harvest_score: harvest_score(tree.size, richness, state.nutrients),
            next_sun: next_sun(tree.size, state.shadows().next_shadow(tree.cell)),
            seed_targets: seed_targets(state, tree),
        }
    }

    /// A fully grown tree that has stagnated long enough to harvest.
    pub fn is_ripe(&self) -> bool {
        self.size == MAX_TREE_SIZE && self.days >= self.max_days
    }

    pub fn can_seed(&self) -> bool {
        self.size > 0 && !self.seed_targets.is_empty()
    }

    /// The preferred seed target.
    pub fn best_target(&self) -> Option<CellIndex> {
        self.seed_targets.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::grid::Board;
    use crate::board::history::HistoryMap;
    use crate::board::state::GameObservation;
    use crate::board::tree::TreeObservation;

    fn tree(cell: CellIndex, size: u8, is_mine: bool) -> TreeObservation {
        TreeObservation {
            cell,
            size,
            is_mine,
            is_dormant: false,
        }
    }

    fn state_with<'a>(board: &'a Board, trees: Vec<TreeObservation>) -> GameState<'a> {
        let obs = GameObservation {
            day: 0,
            nutrients: 20,
            my_sun: 10,
            trees,
            ..GameObservation::default()
        };
        GameState::new(board, &obs, &HistoryMap::new()).unwrap()
    }

    #[test]
    fn grow_price_base_costs() {
        let none = [0; SIZE_COUNT];
        assert_eq!(grow_price(0, &none), Some(1));
        assert_eq!(grow_price(1, &none), Some(3));
        assert_eq!(grow_price(2, &none), Some(7));
        assert_eq!(grow_price(3, &none), None);
    }

    #[test]
    fn grow_price_counts_target_size() {
        let counts = [5, 1, 2, 4];
        assert_eq!(grow_price(0, &counts), Some(2));
        assert_eq!(grow_price(1, &counts), Some(5));
        assert_eq!(grow_price(2, &counts), Some(11));
    }

    #[test]
    fn grow_price_is_monotonic_in_counts() {
        for size in 0..MAX_TREE_SIZE {
            let mut last = 0;
            for n in 0..10 {
                let mut counts = [0; SIZE_COUNT];
                counts[size as usize + 1] = n;
                let price = grow_price(size, &counts).unwrap();
                assert!(price >= last);
                last = price;
            }
        }
    }

    #[test]
    fn action_price_falls_back_to_complete_cost() {
        assert_eq!(action_price(3, &[0, 0, 0, 9]), COMPLETE_COST);
        assert_eq!(action_price(1, &[0, 0, 2, 0]), 5);
    }

    #[test]
    fn roi_prefers_rich_cheap_trees() {
        assert_eq!(roi(2, 3), 3.0);
        assert!(roi(3, 3) > roi(2, 3));
        assert!(roi(2, 3) > roi(2, 7));
        assert!(roi(1, 0).is_finite());
    }

    #[test]
    fn max_days_by_richness() {
        assert_eq!(max_days(3), 1);
        assert_eq!(max_days(2), 5);
        assert_eq!(max_days(1), 9);
    }

    #[test]
    fn harvest_score_only_for_grown_trees() {
        assert_eq!(harvest_score(3, 1, 20), 20);
        assert_eq!(harvest_score(3, 3, 18), 22);
        assert_eq!(harvest_score(2, 3, 20), 0);
        assert_eq!(harvest_score(3, 3, u32::MAX), u32::MAX);
    }

    #[test]
    fn next_sun_needs_taller_than_shadow() {
        assert_eq!(next_sun(2, 0), 2);
        assert_eq!(next_sun(2, 1), 2);
        assert_eq!(next_sun(2, 2), 0);
        assert_eq!(next_sun(1, 3), 0);
        assert_eq!(next_sun(0, 0), 0);
    }

    #[test]
    fn seed_targets_skip_occupied_and_barren_cells() {
        let mut cells = Board::standard().cells().to_vec();
        cells[3].richness = 0;
        let board = Board::from_cells(cells).unwrap();
        let state = state_with(&board, vec![tree(0, 1, true), tree(1, 0, false)]);
        let targets = seed_targets(&state, &state.trees[0]);
        assert_eq!(targets, vec![2, 4, 5, 6]);
    }

    #[test]
    fn seed_targets_richest_first() {
        let board = Board::standard();
        let state = state_with(&board, vec![tree(7, 2, true)]);
        let targets = seed_targets(&state, &state.trees[0]);
        assert!(!targets.is_empty());
        let richness: Vec<u8> = targets.iter().map(|&c| board.cell(c).richness).collect();
        assert!(richness.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(board.cell(targets[0]).richness, 3);
        assert!(!targets.contains(&7));
    }

    #[test]
    fn seeds_cannot_seed() {
        let board = Board::standard();
        let state = state_with(&board, vec![tree(0, 0, true)]);
        let econ = TreeEconomics::appraise(&state, &state.trees[0]);
        assert!(econ.seed_targets.is_empty());
        assert!(!econ.can_seed());
        assert_eq!(econ.best_target(), None);
    }

    #[test]
    fn appraise_uses_owner_counts() {
        let board = Board::standard();
        let state = state_with(
            &board,
            vec![tree(8, 1, true), tree(9, 2, true), tree(10, 2, false), tree(11, 2, false)],
        );
        let mine = TreeEconomics::appraise(&state, &state.trees[0]);
        assert_eq!(mine.grow_price, Some(4));
        assert_eq!(mine.richness, 2);
        assert_eq!(mine.roi, 9.0 / 4.0);
        assert_eq!(mine.max_days, 5);
        assert_eq!(mine.days, 1);
        assert!(mine.can_seed());
    }

    #[test]
    fn appraise_grown_tree() {
        let board = Board::standard();
        let state = state_with(&board, vec![tree(5, 3, true)]);
        let econ = TreeEconomics::appraise(&state, &state.trees[0]);
        assert_eq!(econ.grow_price, None);
        assert_eq!(econ.roi, 16.0 / COMPLETE_COST as f64);
        assert_eq!(econ.harvest_score, 24);
        assert_eq!(econ.next_sun, 3);
        // Richness 3 allows a single day at full size.
        assert!(econ.is_ripe());

        let state = state_with(&board, vec![tree(20, 3, true)]);
        let poor = TreeEconomics::appraise(&state, &state.trees[0]);
        assert_eq!(poor.max_days, 9);
        assert!(!poor.is_ripe());
    }

    #[test]
    fn projected_income_accounts_for_shadow() {
        let board = Board::standard();
        // Day 0: tomorrow's sun points in direction 1, so the tree on 0
        // shades cell 2 but not cell 1.
        let state = state_with(&board, vec![tree(0, 3, true), tree(2, 2, true), tree(1, 1, false)]);
        assert_eq!(projected_income(&state, true), 3);
        assert_eq!(projected_income(&state, false), 1);
    }
}
