//! Grid coordinates, headings, and edge policies.

use std::fmt;

/// Position of a cell in a grid, addressed by row and column.
///
/// Coordinates are signed so that neighbor arithmetic near the edges can step
/// outside of the grid; the grid rejects such coordinates on access.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// Row, counting down from the top.
    pub row: isize,
    /// Column, counting right from the left edge.
    pub col: isize,
}
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
impl From<(isize, isize)> for Coord {
    fn from((row, col): (isize, isize)) -> Self {
        Self { row, col }
    }
}
impl Coord {
    /// Constructs a coordinate from a row and a column.
    #[inline]
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Returns the coordinate displaced by `drow` rows and `dcol` columns, or
    /// `None` if that is not representable.
    #[inline]
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Self> {
        Some(Self::new(self.row.checked_add(drow)?, self.col.checked_add(dcol)?))
    }
}

/// Row/column offsets of the Moore neighborhood, in row-major order.
pub static MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// What happens to neighbor lookups that step past the edge of a grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Edges {
    /// Opposite edges are joined, so every lookup lands on a cell.
    Wrap,
    /// Lookups past an edge find nothing.
    Bounded,
}
impl Default for Edges {
    fn default() -> Self {
        Self::Wrap
    }
}

/// Cardinal heading on the grid. North is toward row 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Up (-row).
    North,
    /// Right (+col).
    East,
    /// Down (+row).
    South,
    /// Left (-col).
    West,
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "N"),
            Self::East => write!(f, "E"),
            Self::South => write!(f, "S"),
            Self::West => write!(f, "W"),
        }
    }
}
impl Direction {
    /// Every direction, clockwise from north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction 90 degrees clockwise.
    pub fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }
    /// Returns the direction 90 degrees counterclockwise.
    pub fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }
    /// Returns the direction 180 degrees around.
    pub fn opposite(self) -> Self {
        self.turn_right().turn_right()
    }
    /// Returns the `(row, col)` offset of one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }
    /// Returns the position of this direction in `Direction::ALL`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}
