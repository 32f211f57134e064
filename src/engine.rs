//! Agent session management.
//!
//! Holds what survives between turns: the board, the configuration, the size
//! history and the last day seen. Everything else is rebuilt from the judge's
//! observation each turn.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::action::Action;
use crate::board::cell::CellIndex;
use crate::board::grid::{Board, BoardError};
use crate::board::history::HistoryMap;
use crate::board::state::{GameObservation, GameState, StateError};
use crate::config::{AgentConfig, ConfigError};
use crate::eval::TreeEconomics;
use crate::protocol::{format_action, parse_action, InputError, InputReader};
use crate::select::{select, Decision};
use crate::trace::{write_trace, TurnTrace};

/// Any error that ends a session.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("invalid turn: {0}")]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write trace: {0}")]
    Trace(#[from] serde_json::Error),
}

/// The result of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub decision: Decision,
    pub trace: TurnTrace,
}

/// The agent's state between turns.
pub struct Engine {
    board: Board,
    config: AgentConfig,
    history: HistoryMap,
    last_day: Option<u32>,
}

impl Engine {
    /// Creates an engine for a fresh game on `board`.
    pub fn new(board: Board, config: AgentConfig) -> Self {
        Self::resume(board, config, HistoryMap::new(), None)
    }

    /// Creates an engine that continues from a known history, as if the
    /// turn on `last_day` had already been played.
    pub fn resume(
        board: Board,
        config: AgentConfig,
        history: HistoryMap,
        last_day: Option<u32>,
    ) -> Self {
        Engine {
            board,
            config,
            history,
            last_day,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryMap {
        &self.history
    }

    /// Decides the action for one observed turn.
    ///
    /// The size history only moves forward when the day changes; several
    /// turns on the same day reuse it. History is committed only once the
    /// observation has been accepted.
    pub fn play_turn(&mut self, obs: &GameObservation) -> Result<TurnOutcome, StateError> {
        let new_day = self.last_day != Some(obs.day);
        let history = self.history.advance(&obs.trees, new_day);

        let state = GameState::new(&self.board, obs, &history)?;
        let selection = select(&state, &self.config);
        let trace = TurnTrace::new(&state, &selection);

        debug!(
            day = state.day,
            sun = state.me.sun,
            completable = ?cells(&selection.candidates.completable),
            growable = ?cells(&selection.candidates.growable),
            seeding = ?trace.seeding,
            "candidates"
        );
        if selection.candidates.is_empty() {
            debug!(day = state.day, "no tree can act");
        }
        info!(
            day = state.day,
            rule = selection.decision.rule,
            action = %trace.action,
            "decision"
        );
        check_listed(&obs.possible_moves, &selection.decision.action);

        self.history = history;
        self.last_day = Some(obs.day);
        Ok(TurnOutcome {
            decision: selection.decision,
            trace,
        })
    }

    /// Plays one turn and writes the action line.
    pub fn handle_turn<W: Write>(
        &mut self,
        obs: &GameObservation,
        out: &mut W,
    ) -> Result<TurnOutcome, AgentError> {
        let outcome = self.play_turn(obs)?;
        writeln!(out, "{}", format_action(&outcome.decision.action))?;
        out.flush()?;
        Ok(outcome)
    }
}

/// Warns when the judge listed moves and none of the recognisable ones is
/// the chosen action. Unrecognised lines are only logged.
fn check_listed(moves: &[String], chosen: &Action) -> bool {
    if moves.is_empty() {
        return true;
    }
    let mut listed = false;
    for line in moves {
        match parse_action(line) {
            Ok(action) => listed |= action == *chosen,
            Err(e) => debug!(line = %line, error = %e, "unrecognised possible move"),
        }
    }
    if !listed {
        warn!(action = %format_action(chosen), "chosen action is not among the listed moves");
    }
    listed
}

fn cells(set: &[TreeEconomics]) -> Vec<CellIndex> {
    set.iter().map(|e| e.cell).collect()
}

/// Runs a whole session: reads the board, then answers turns until the input
/// ends. Returns the number of turns played.
pub fn run_session<R, W>(
    input: R,
    out: &mut W,
    config: AgentConfig,
    mut trace: Option<&mut dyn Write>,
) -> Result<usize, AgentError>
where
    R: BufRead,
    W: Write,
{
    let mut reader = InputReader::new(input);
    let board = Board::from_cells(reader.read_board()?)?;
    info!(cells = board.len(), "board loaded");

    let mut engine = Engine::new(board, config);
    let mut turns = 0;

    while let Some(obs) = reader.read_turn()? {
        let outcome = engine.handle_turn(&obs, out)?;
        if let Some(sink) = trace.as_deref_mut() {
            write_trace(&outcome.trace, sink)?;
        }
        turns += 1;
    }

    info!(turns, lines = reader.line(), "input closed");
    Ok(turns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tree::TreeObservation;
    use std::io::Cursor;

    fn tree(cell: CellIndex, size: u8) -> TreeObservation {
        TreeObservation {
            cell,
            size,
            is_mine: true,
            is_dormant: false,
        }
    }

    fn obs(day: u32, sun: u32, trees: Vec<TreeObservation>) -> GameObservation {
        GameObservation {
            day,
            nutrients: 20,
            my_sun: sun,
            trees,
            ..GameObservation::default()
        }
    }

    fn board_text(board: &Board) -> String {
        let mut text = format!("{}\n", board.len());
        for cell in board.cells() {
            text.push_str(&format!("{} {}", cell.index, cell.richness));
            for n in cell.neighbors {
                match n {
                    Some(n) => text.push_str(&format!(" {}", n)),
                    None => text.push_str(" -1"),
                }
            }
            text.push('\n');
        }
        text
    }

    fn turn_text(day: u32, sun: u32, trees: &[(CellIndex, u8, bool, bool)]) -> String {
        let mut text = format!("{}\n20\n{} 0\n0 0 0\n{}\n", day, sun, trees.len());
        for (cell, size, mine, dormant) in trees {
            text.push_str(&format!(
                "{} {} {} {}\n",
                cell, size, *mine as u8, *dormant as u8
            ));
        }
        text.push_str("1\nWAIT\n");
        text
    }

    #[test]
    fn completes_ripe_tree() {
        let mut cells = Board::standard().cells().to_vec();
        cells[5].richness = 2;
        let board = Board::from_cells(cells).unwrap();
        let history = HistoryMap::from_entries([(5, vec![3; 5])]);
        let mut engine = Engine::resume(board, AgentConfig::default(), history, Some(0));

        let outcome = engine.play_turn(&obs(0, 10, vec![tree(5, 3)])).unwrap();
        assert_eq!(outcome.decision.action, Action::Complete { cell: 5 });
        assert_eq!(outcome.decision.rule, "complete");
    }

    #[test]
    fn grows_affordable_tree() {
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        assert_eq!(engine.board().len(), 37);
        assert_eq!(engine.config().final_day, 23);
        let outcome = engine.play_turn(&obs(10, 5, vec![tree(3, 1)])).unwrap();
        assert_eq!(outcome.decision.action, Action::Grow { cell: 3 });
    }

    #[test]
    fn never_grows_on_final_day() {
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        for sun in [0, 3, 10, 50] {
            let outcome = engine
                .play_turn(&obs(23, sun, vec![tree(3, 1), tree(8, 2), tree(20, 0)]))
                .unwrap();
            assert!(!matches!(outcome.decision.action, Action::Grow { .. }));
        }
    }

    #[test]
    fn seeds_without_sun() {
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        let outcome = engine.play_turn(&obs(4, 0, vec![tree(3, 1)])).unwrap();
        assert_eq!(outcome.decision.action, Action::Seed { source: 3, target: 2 });
        assert_eq!(outcome.decision.rule, "seed");
    }

    #[test]
    fn waits_with_only_dormant_trees() {
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        let mut trees = vec![tree(3, 1), tree(8, 3)];
        for t in &mut trees {
            t.is_dormant = true;
        }
        let outcome = engine.play_turn(&obs(6, 30, trees)).unwrap();
        assert_eq!(outcome.decision.action, Action::Wait);
        assert_eq!(outcome.decision.rule, "wait");
    }

    #[test]
    fn history_advances_once_per_day() {
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        let trees = vec![tree(20, 3)];
        engine.play_turn(&obs(1, 0, trees.clone())).unwrap();
        engine.play_turn(&obs(1, 0, trees.clone())).unwrap();
        assert_eq!(engine.history().get(20), Some(&[3u8][..]));

        engine.play_turn(&obs(2, 0, trees.clone())).unwrap();
        engine.play_turn(&obs(3, 0, trees)).unwrap();
        assert_eq!(engine.history().get(20), Some(&[3u8, 3, 3][..]));
    }

    #[test]
    fn stagnant_tree_ripens_over_days() {
        // Richness 1 needs nine recorded days at full size.
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        let trees = vec![tree(20, 3)];
        for day in 0..8 {
            let outcome = engine.play_turn(&obs(day, 10, trees.clone())).unwrap();
            assert_ne!(outcome.decision.action, Action::Complete { cell: 20 });
        }
        let outcome = engine.play_turn(&obs(8, 10, trees)).unwrap();
        assert_eq!(outcome.decision.action, Action::Complete { cell: 20 });
    }

    #[test]
    fn rejected_turn_keeps_history() {
        let mut engine = Engine::new(Board::standard(), AgentConfig::default());
        engine.play_turn(&obs(1, 0, vec![tree(20, 3)])).unwrap();
        let err = engine.play_turn(&obs(2, 0, vec![tree(50, 1)])).unwrap_err();
        assert_eq!(err, StateError::UnknownCell { cell: 50, count: 37 });
        assert_eq!(engine.history().get(20), Some(&[3u8][..]));
    }

    #[test]
    fn session_answers_every_turn() {
        let board = Board::standard();
        let input = format!(
            "{}{}{}",
            board_text(&board),
            turn_text(10, 5, &[(3, 1, true, false)]),
            turn_text(11, 0, &[(3, 2, true, false), (30, 1, false, false)]),
        );
        let mut out = Vec::new();
        let mut trace = Vec::new();
        let turns = run_session(
            Cursor::new(input),
            &mut out,
            AgentConfig::default(),
            Some(&mut trace),
        )
        .unwrap();

        assert_eq!(turns, 2);
        let lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "GROW 3");
        assert!(lines[1].starts_with("SEED 3 "));

        let records: Vec<serde_json::Value> = std::str::from_utf8(&trace)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["rule"], "grow");
        assert_eq!(records[1]["day"], 11);
    }

    #[test]
    fn session_with_no_turns_is_clean() {
        let input = board_text(&Board::standard());
        let mut out = Vec::new();
        let turns =
            run_session(Cursor::new(input), &mut out, AgentConfig::default(), None).unwrap();
        assert_eq!(turns, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn session_stops_on_malformed_turn() {
        let board = Board::standard();
        let input = format!(
            "{}{}12\nlots\n",
            board_text(&board),
            turn_text(10, 5, &[(3, 1, true, false)]),
        );
        let mut out = Vec::new();
        let err = run_session(Cursor::new(input), &mut out, AgentConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, AgentError::Input(InputError::Malformed { .. })));
        assert_eq!(std::str::from_utf8(&out).unwrap(), "GROW 3\n");
    }

    #[test]
    fn session_tolerates_odd_move_lines_and_trailing_blank() {
        let board = Board::standard();
        let turn = turn_text(10, 5, &[(3, 1, true, false)])
            .replace("1\nWAIT\n", "2\nWAIT\nGROW 3 (cost 3)\n");
        let input = format!("{}{}\n", board_text(&board), turn);
        let mut out = Vec::new();
        let turns =
            run_session(Cursor::new(input), &mut out, AgentConfig::default(), None).unwrap();
        assert_eq!(turns, 1);
        assert_eq!(std::str::from_utf8(&out).unwrap(), "GROW 3\n");
    }

    #[test]
    fn listed_moves_are_matched_best_effort() {
        let moves = |lines: &[&str]| lines.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        let grow = Action::Grow { cell: 3 };
        assert!(check_listed(&[], &grow));
        assert!(check_listed(&moves(&["WAIT", "GROW 3"]), &grow));
        assert!(!check_listed(&moves(&["WAIT", "GROW 3 (cost 3)"]), &grow));
        assert!(!check_listed(&moves(&["CHOP 0"]), &Action::Wait));
    }

    #[test]
    fn session_rejects_broken_board() {
        let input = "2\n0 3 1 -1 -1 -1 -1 -1\n0 3 -1 -1 -1 -1 -1 -1\n";
        let mut out = Vec::new();
        let err = run_session(Cursor::new(input), &mut out, AgentConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, AgentError::Board(BoardError::DuplicateCell(0))));
    }
}
