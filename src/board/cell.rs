//! Hex cells and directions.
//!
//! A cell is identified by its index into the board's cell table. Neighbour
//! links are stored as optional indices into the same table, one per hex
//! direction, so cells never hold references to each other.

/// Number of hex directions around a cell.
pub const DIRECTION_COUNT: usize = 6;

/// Highest soil richness a usable cell can have.
pub const MAX_RICHNESS: u8 = 3;

/// Index of a cell in the board's cell table.
pub type CellIndex = usize;

/// One of the six hex directions, numbered as the judge numbers them
/// (0 = east, increasing counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    /// All directions in ascending order.
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction(0),
        Direction(1),
        Direction(2),
        Direction(3),
        Direction(4),
        Direction(5),
    ];

    /// Builds a direction from any integer, wrapping modulo 6.
    pub const fn new(raw: u32) -> Self {
        Direction((raw % DIRECTION_COUNT as u32) as u8)
    }

    /// The direction the sun shines in on the given day.
    pub const fn of_sun(day: u32) -> Self {
        Direction::new(day)
    }

    /// The next direction counter-clockwise (tomorrow's sun).
    pub const fn next(self) -> Self {
        Direction::new(self.0 as u32 + 1)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single board cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: CellIndex,
    /// 0 when the cell is unusable, 1-3 otherwise.
    pub richness: u8,
    pub neighbors: [Option<CellIndex>; DIRECTION_COUNT],
}

impl Cell {
    /// Creates a cell from the raw neighbour list, where -1 marks the board edge.
    pub fn from_raw(index: CellIndex, richness: u8, raw_neighbors: [i32; DIRECTION_COUNT]) -> Self {
        let mut neighbors = [None; DIRECTION_COUNT];
        for (slot, &raw) in neighbors.iter_mut().zip(raw_neighbors.iter()) {
            *slot = usize::try_from(raw).ok();
        }
        Cell {
            index,
            richness,
            neighbors,
        }
    }

    /// Returns true if a tree may stand on this cell.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.richness > 0
    }

    /// Returns the neighbour in the given direction, if it is on the board.
    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<CellIndex> {
        self.neighbors[dir.index()]
    }
}
