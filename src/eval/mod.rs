//! Tree evaluation.
//!
//! Prices and ranks individual trees from the acting player's perspective:
//! grow cost, return on sun spent, stagnation, seed reach and tomorrow's
//! shadow-adjusted income.

pub mod economics;

pub use economics::{
    action_price, grow_price, harvest_score, max_days, next_sun, projected_income, roi,
    seed_targets, TreeEconomics, COMPLETE_COST,
};
