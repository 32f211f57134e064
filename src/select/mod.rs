//! Action selection.
//!
//! Classifies the acting player's trees into candidate sets, then applies
//! the ordered decision rules to pick exactly one action per turn.

pub mod classify;
pub mod rules;

pub use classify::{classify, Candidates};
pub use rules::{decide, Decision, Rule, RuleContext, RULES};

use crate::board::state::GameState;
use crate::config::AgentConfig;

/// Candidates and the decision taken from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub candidates: Candidates,
    pub decision: Decision,
}

/// Runs classification and the rule table for one turn.
pub fn select(state: &GameState, config: &AgentConfig) -> Selection {
    let candidates = classify(state, config);
    let decision = decide(&RuleContext {
        state,
        candidates: &candidates,
        config,
    });
    Selection {
        candidates,
        decision,
    }
}
