//! Board topology.
//!
//! The board is a fixed table of cells indexed from 0 (the centre) spiralling
//! outward. It is built once from the startup description and never changes.
//!
//! Traversals (`ray`, `area`) work purely on indices and use an explicit
//! worklist, so their visiting order is deterministic: breadth first, and
//! within one distance in neighbour-direction order.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use super::cell::{Cell, CellIndex, Direction, DIRECTION_COUNT, MAX_RICHNESS};

/// Number of rings around the centre on the standard map.
const STANDARD_RING_COUNT: i32 = 3;

/// Number of cells on the standard map.
pub const STANDARD_CELL_COUNT: usize = 37;

/// Cube-coordinate offsets for each direction, in judge order.
const CUBE_DIRECTIONS: [(i32, i32, i32); DIRECTION_COUNT] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// Errors raised while assembling a board from its cell description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no cells")]
    Empty,

    #[error("cell index {index} is out of range for {count} cells")]
    IndexOutOfRange { index: CellIndex, count: usize },

    #[error("cell {0} is described twice")]
    DuplicateCell(CellIndex),

    #[error("cell {cell} has neighbour {neighbor} outside the board")]
    NeighborOutOfRange { cell: CellIndex, neighbor: CellIndex },

    #[error("cell {cell} has invalid richness {richness}")]
    InvalidRichness { cell: CellIndex, richness: u8 },
}

/// The immutable hex board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from cells given in any order.
    ///
    /// Indices must cover `0..cells.len()` exactly once and every neighbour
    /// link must point inside the board.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Board, BoardError> {
        if cells.is_empty() {
            return Err(BoardError::Empty);
        }
        let count = cells.len();
        let mut slots: Vec<Option<Cell>> = vec![None; count];

        for cell in cells {
            if cell.index >= count {
                return Err(BoardError::IndexOutOfRange {
                    index: cell.index,
                    count,
                });
            }
            if cell.richness > MAX_RICHNESS {
                return Err(BoardError::InvalidRichness {
                    cell: cell.index,
                    richness: cell.richness,
                });
            }
            if let Some(&neighbor) = cell.neighbors.iter().flatten().find(|&&n| n >= count) {
                return Err(BoardError::NeighborOutOfRange {
                    cell: cell.index,
                    neighbor,
                });
            }
            let idx = cell.index;
            if slots[idx].replace(cell).is_some() {
                return Err(BoardError::DuplicateCell(idx));
            }
        }

        // Every slot is filled: `count` distinct in-range indices were placed.
        let cells = slots.into_iter().flatten().collect();
        Ok(Board { cells })
    }

    /// Builds the standard 37-cell map with the judge's spiral numbering.
    ///
    /// Richness is 3 on the centre and first ring, 2 on the second ring and
    /// 1 on the outer ring.
    pub fn standard() -> Board {
        let step = |(x, y, z): (i32, i32, i32), dir: usize| {
            let (dx, dy, dz) = CUBE_DIRECTIONS[dir];
            (x + dx, y + dy, z + dz)
        };

        let mut coords = vec![(0, 0, 0)];
        let mut coord = step((0, 0, 0), 0);
        for distance in 1..=STANDARD_RING_COUNT {
            for orientation in 0..DIRECTION_COUNT {
                for _ in 0..distance {
                    coords.push(coord);
                    coord = step(coord, (orientation + 2) % DIRECTION_COUNT);
                }
            }
            coord = step(coord, 0);
        }

        let lookup: HashMap<(i32, i32, i32), CellIndex> =
            coords.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        let cells = coords
            .iter()
            .enumerate()
            .map(|(index, &c)| {
                let ring = c.0.abs().max(c.1.abs()).max(c.2.abs());
                let richness = match ring {
                    0 | 1 => 3,
                    2 => 2,
                    _ => 1,
                };
                let mut neighbors = [None; DIRECTION_COUNT];
                for (dir, slot) in neighbors.iter_mut().enumerate() {
                    *slot = lookup.get(&step(c, dir)).copied();
                }
                Cell {
                    index,
                    richness,
                    neighbors,
                }
            })
            .collect();

        Board { cells }
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `index`. Panics if the index is off the board.
    #[inline]
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index]
    }

    #[inline]
    pub fn get(&self, index: CellIndex) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Walks up to `length` steps from `origin` in `dir`, stopping early at
    /// the board edge. The origin itself is not included.
    pub fn ray(&self, origin: CellIndex, dir: Direction, length: u8) -> Vec<CellIndex> {
        let mut path = Vec::with_capacity(length as usize);
        let mut current = origin;
        for _ in 0..length {
            match self.cells[current].neighbor(dir) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => break,
            }
        }
        path
    }

    /// Returns every cell within `radius` steps of `origin`, excluding the
    /// origin itself.
    pub fn area(&self, origin: CellIndex, radius: u8) -> Vec<CellIndex> {
        let mut visited = vec![false; self.cells.len()];
        self.area_excluding(origin, radius, &mut visited)
    }

    /// Like [`Board::area`] but also skips (and does not expand through)
    /// cells already marked in `visited`. Every returned cell and the origin
    /// are marked on return.
    pub fn area_excluding(
        &self,
        origin: CellIndex,
        radius: u8,
        visited: &mut [bool],
    ) -> Vec<CellIndex> {
        let mut output = Vec::new();
        if radius == 0 {
            return output;
        }
        visited[origin] = true;

        let mut queue = VecDeque::new();
        queue.push_back((origin, 0u8));

        while let Some((current, dist)) = queue.pop_front() {
            if dist == radius {
                continue;
            }
            for neighbor in self.cells[current].neighbors.iter().flatten() {
                if visited[*neighbor] {
                    continue;
                }
                visited[*neighbor] = true;
                output.push(*neighbor);
                queue.push_back((*neighbor, dist + 1));
            }
        }

        output
    }
}
