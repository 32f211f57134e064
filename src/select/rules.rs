//! Decision rules.
//!
//! The turn's action comes from a fixed, ordered table of named rules. Each
//! rule looks at the classified candidates and either proposes an action or
//! passes; the first proposal wins. The last rule always waits, so every
//! turn produces exactly one action.

use crate::board::action::Action;
use crate::board::state::GameState;
use crate::config::AgentConfig;

use super::classify::Candidates;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'s, 'a> {
    pub state: &'s GameState<'a>,
    pub candidates: &'s Candidates,
    pub config: &'s AgentConfig,
}

/// A named decision rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&RuleContext) -> Option<Action>,
}

/// The rules in priority order.
pub const RULES: [Rule; 4] = [
    Rule {
        name: "complete",
        apply: complete_ripe,
    },
    Rule {
        name: "grow",
        apply: grow_best,
    },
    Rule {
        name: "seed",
        apply: seed_best,
    },
    Rule {
        name: "wait",
        apply: wait,
    },
];

/// The chosen action and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub rule: &'static str,
}

/// Completes the best ripe tree when there is sun to pay for it.
pub fn complete_ripe(ctx: &RuleContext) -> Option<Action> {
    if ctx.state.me.sun < ctx.config.complete_min_sun {
        return None;
    }
    ctx.candidates
        .completable
        .first()
        .map(|e| Action::Complete { cell: e.cell })
}

/// Grows the best affordable tree, except on the final day.
pub fn grow_best(ctx: &RuleContext) -> Option<Action> {
    if ctx.config.is_final_day(ctx.state.day) {
        return None;
    }
    ctx.candidates
        .growable
        .first()
        .map(|e| Action::Grow { cell: e.cell })
}

/// Seeds from the tree with the richest reachable cell. A seed costs one sun
/// per seed the player already has on the board.
pub fn seed_best(ctx: &RuleContext) -> Option<Action> {
    if ctx.state.me.sun < ctx.state.me.tree_count[0] {
        return None;
    }
    let source = ctx.candidates.seeding.first()?;
    let target = source.best_target()?;
    Some(Action::Seed {
        source: source.cell,
        target,
    })
}

pub fn wait(_ctx: &RuleContext) -> Option<Action> {
    Some(Action::Wait)
}

/// Runs the rules in order and returns the first proposal.
pub fn decide(ctx: &RuleContext) -> Decision {
    let decision = RULES
        .iter()
        .find_map(|rule| {
            (rule.apply)(ctx).map(|action| Decision {
                action,
                rule: rule.name,
            })
        })
        .unwrap_or(Decision {
            action: Action::Wait,
            rule: "wait",
        });

    if let Some(cell) = decision.action.actor() {
        debug_assert!(
            ctx.state.occupant(cell).is_some_and(|t| t.is_available()),
            "rule '{}' picked cell {} without an available tree",
            decision.rule,
            cell
        );
    }
    decision
}
