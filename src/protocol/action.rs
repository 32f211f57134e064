//! Action text encoding and decoding.
//!
//! Actions are single lines: `WAIT`, `GROW <cell>`, `COMPLETE <cell>` or
//! `SEED <source> <target>`. The judge lets `WAIT` carry a free-form message,
//! which is accepted and dropped when parsing.

use thiserror::Error;

use crate::board::action::Action;
use crate::board::cell::CellIndex;

/// Errors that can occur when parsing an action line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("invalid cell index '{0}'")]
    InvalidCell(String),

    #[error("unexpected trailing token '{0}'")]
    TrailingToken(String),
}

/// Parses one action line.
pub fn parse_action(s: &str) -> Result<Action, ActionError> {
    let mut tokens = s.split_whitespace();
    let keyword = tokens.next().ok_or(ActionError::EmptyInput)?;

    let action = match keyword {
        "WAIT" => return Ok(Action::Wait),
        "GROW" => Action::Grow {
            cell: parse_cell(tokens.next(), "cell index")?,
        },
        "COMPLETE" => Action::Complete {
            cell: parse_cell(tokens.next(), "cell index")?,
        },
        "SEED" => Action::Seed {
            source: parse_cell(tokens.next(), "source cell index")?,
            target: parse_cell(tokens.next(), "target cell index")?,
        },
        other => return Err(ActionError::UnknownAction(other.to_string())),
    };

    match tokens.next() {
        Some(extra) => Err(ActionError::TrailingToken(extra.to_string())),
        None => Ok(action),
    }
}

/// Formats an action as the judge expects it.
pub fn format_action(action: &Action) -> String {
    match *action {
        Action::Wait => "WAIT".to_string(),
        Action::Grow { cell } => format!("GROW {}", cell),
        Action::Complete { cell } => format!("COMPLETE {}", cell),
        Action::Seed { source, target } => format!("SEED {} {}", source, target),
    }
}

fn parse_cell(token: Option<&str>, expected: &'static str) -> Result<CellIndex, ActionError> {
    let token = token.ok_or(ActionError::UnexpectedEnd(expected))?;
    token
        .parse::<CellIndex>()
        .map_err(|_| ActionError::InvalidCell(token.to_string()))
}
