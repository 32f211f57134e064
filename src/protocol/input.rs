//! Judge input parsing.
//!
//! The judge writes one board description at startup and then one block per
//! turn. Every line is a fixed number of whitespace-separated integers,
//! except the trailing possible-move lines, which are kept as opaque text.
//! Blank lines between turns are skipped.
//!
//! Startup:
//!
//! ```text
//! <cell count>
//! <index> <richness> <n0> <n1> <n2> <n3> <n4> <n5>     (one per cell)
//! ```
//!
//! Turn:
//!
//! ```text
//! <day>
//! <nutrients>
//! <sun> <score>
//! <opp sun> <opp score> <opp is waiting>
//! <tree count>
//! <cell> <size> <is mine> <is dormant>                 (one per tree)
//! <move count>
//! <move>                                               (one per move)
//! ```
//!
//! Anything else that does not match is an error; there is no recovery.
//! Counts are never used to pre-allocate, so a bogus count runs into the end
//! of input instead.

use std::io::BufRead;

use thiserror::Error;

use crate::board::cell::{Cell, DIRECTION_COUNT};
use crate::board::state::GameObservation;
use crate::board::tree::TreeObservation;

/// Errors raised while reading judge input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),

    #[error("line {line}: expected {expected}, got '{found}'")]
    Malformed {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: value {value} out of range for {expected}")]
    OutOfRange {
        line: usize,
        expected: &'static str,
        value: i64,
    },
}

/// Reads the judge's line protocol from any buffered source.
pub struct InputReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(inner: R) -> Self {
        InputReader {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Reads the startup board description.
    pub fn read_board(&mut self) -> Result<Vec<Cell>, InputError> {
        let [count] = self.read_numbers::<1>("cell count")?;
        let count = self.to_usize(count, "cell count")?;
        let mut cells = Vec::new();

        for _ in 0..count {
            let fields = self.read_numbers::<8>("cell description")?;
            let index = self.to_usize(fields[0], "cell index")?;
            let richness = self.to_u8(fields[1], "richness")?;
            let mut neighbors = [0i32; DIRECTION_COUNT];
            for (slot, &raw) in neighbors.iter_mut().zip(fields[2..].iter()) {
                *slot = i32::try_from(raw)
                    .map_err(|_| self.out_of_range("neighbour index", raw))?;
            }
            cells.push(Cell::from_raw(index, richness, neighbors));
        }

        Ok(cells)
    }

    /// Reads one turn. Returns `Ok(None)` when the input ends cleanly before
    /// the turn starts, blank lines included.
    pub fn read_turn(&mut self) -> Result<Option<GameObservation>, InputError> {
        let day = loop {
            match self.next_line()? {
                Some(text) if text.trim().is_empty() => continue,
                Some(text) => break text.trim().to_string(),
                None => return Ok(None),
            }
        };
        let day = self.parse_single(&day, "day")?;
        let day = self.to_u32(day, "day")?;

        let [nutrients] = self.read_numbers::<1>("nutrients")?;
        let nutrients = self.to_u32(nutrients, "nutrients")?;

        let [sun, score] = self.read_numbers::<2>("sun and score")?;
        let my_sun = self.to_u32(sun, "sun")?;
        let my_score = self.to_u32(score, "score")?;

        let [opp_sun, opp_score, opp_waiting] =
            self.read_numbers::<3>("opponent sun, score and waiting flag")?;
        let opp_sun = self.to_u32(opp_sun, "opponent sun")?;
        let opp_score = self.to_u32(opp_score, "opponent score")?;

        let mut obs = GameObservation {
            day,
            nutrients,
            my_sun,
            my_score,
            opp_sun,
            opp_score,
            opp_is_waiting: opp_waiting != 0,
            ..GameObservation::default()
        };

        let [tree_count] = self.read_numbers::<1>("tree count")?;
        let tree_count = self.to_usize(tree_count, "tree count")?;
        for _ in 0..tree_count {
            let [cell, size, is_mine, is_dormant] = self.read_numbers::<4>("tree description")?;
            obs.trees.push(TreeObservation {
                cell: self.to_usize(cell, "tree cell")?,
                size: self.to_u8(size, "tree size")?,
                is_mine: is_mine != 0,
                is_dormant: is_dormant != 0,
            });
        }

        let [move_count] = self.read_numbers::<1>("possible move count")?;
        let move_count = self.to_usize(move_count, "possible move count")?;
        for _ in 0..move_count {
            let text = self.expect_line("possible move")?;
            obs.possible_moves.push(text.trim().to_string());
        }

        Ok(Some(obs))
    }

    /// Reads the next line into the buffer, without its line terminator.
    fn next_line(&mut self) -> Result<Option<&str>, InputError> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(self.buf.trim_end_matches(['\n', '\r'])))
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, InputError> {
        match self.next_line()? {
            Some(text) => Ok(text.to_string()),
            None => Err(InputError::UnexpectedEof(expected)),
        }
    }

    /// Reads a line of exactly `N` integers.
    fn read_numbers<const N: usize>(
        &mut self,
        expected: &'static str,
    ) -> Result<[i64; N], InputError> {
        let text = self.expect_line(expected)?;
        let mut out = [0i64; N];
        let mut tokens = text.split_whitespace();
        for slot in out.iter_mut() {
            *slot = tokens
                .next()
                .and_then(|t| t.parse::<i64>().ok())
                .ok_or_else(|| self.malformed(expected, &text))?;
        }
        if tokens.next().is_some() {
            return Err(self.malformed(expected, &text));
        }
        Ok(out)
    }

    fn parse_single(&self, text: &str, expected: &'static str) -> Result<i64, InputError> {
        text.parse::<i64>().map_err(|_| self.malformed(expected, text))
    }

    fn to_u32(&self, value: i64, expected: &'static str) -> Result<u32, InputError> {
        u32::try_from(value).map_err(|_| self.out_of_range(expected, value))
    }

    fn to_u8(&self, value: i64, expected: &'static str) -> Result<u8, InputError> {
        u8::try_from(value).map_err(|_| self.out_of_range(expected, value))
    }

    fn to_usize(&self, value: i64, expected: &'static str) -> Result<usize, InputError> {
        usize::try_from(value).map_err(|_| self.out_of_range(expected, value))
    }

    fn malformed(&self, expected: &'static str, found: &str) -> InputError {
        InputError::Malformed {
            line: self.line,
            expected,
            found: found.to_string(),
        }
    }

    fn out_of_range(&self, expected: &'static str, value: i64) -> InputError {
        InputError::OutOfRange {
            line: self.line,
            expected,
            value,
        }
    }
}
