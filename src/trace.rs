//! Per-turn decision trace.
//!
//! One JSON object per turn (JSONL), recording what the agent saw and why it
//! acted. Written only when a trace file is requested.

use std::io::Write;

use serde::Serialize;

use crate::board::cell::CellIndex;
use crate::board::state::GameState;
use crate::eval::projected_income;
use crate::protocol::format_action;
use crate::select::Selection;

/// A single recorded turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnTrace {
    pub day: u32,
    pub nutrients: u32,
    pub sun: u32,
    pub score: u32,
    /// Our trees on the board, all sizes.
    pub trees: u32,
    /// Sun our trees will produce tomorrow under projected shadows.
    pub projected_income: u32,
    pub opp_projected_income: u32,
    pub completable: Vec<CellIndex>,
    pub growable: Vec<CellIndex>,
    /// (source, best target) pairs.
    pub seeding: Vec<(CellIndex, CellIndex)>,
    pub rule: &'static str,
    pub action: String,
}

impl TurnTrace {
    pub fn new(state: &GameState, selection: &Selection) -> Self {
        let candidates = &selection.candidates;
        TurnTrace {
            day: state.day,
            nutrients: state.nutrients,
            sun: state.me.sun,
            score: state.me.score,
            trees: state.me.total_trees(),
            projected_income: projected_income(state, true),
            opp_projected_income: projected_income(state, false),
            completable: candidates.completable.iter().map(|e| e.cell).collect(),
            growable: candidates.growable.iter().map(|e| e.cell).collect(),
            seeding: candidates
                .seeding
                .iter()
                .filter_map(|e| e.best_target().map(|t| (e.cell, t)))
                .collect(),
            rule: selection.decision.rule,
            action: format_action(&selection.decision.action),
        }
    }
}

/// Appends one trace record as a JSON line.
pub fn write_trace<W: Write + ?Sized>(
    trace: &TurnTrace,
    out: &mut W,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer(&mut *out, trace)?;
    out.write_all(b"\n").map_err(serde_json::Error::io)?;
    out.flush().map_err(serde_json::Error::io)
}
