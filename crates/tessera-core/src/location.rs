//! Grid coordinates and compass directions.
//!
//! A [`Location`] is a plain row/column pair. Negative coordinates mark the
//! *invalid* sentinel, which is how unattached components describe "nowhere"
//! without resorting to `Option` at every call site.
//!
//! # Example
//!
//! ```
//! use tessera_core::location::{Direction, Location};
//!
//! let origin = Location::new(2, 3);
//! assert_eq!(origin.step(Direction::East), Location::new(2, 4));
//!
//! // Every invalid location compares equal to every other.
//! assert_eq!(Location::new(-1, 7), Location::invalid());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Location
// =============================================================================

/// A row/column coordinate on the grid.
///
/// Equality treats all invalid locations as the same value, so comparing a
/// head location against a trailing location never reports a slide between
/// two different flavours of "nowhere".
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    /// Row index, growing southwards.
    pub row: i32,
    /// Column index, growing eastwards.
    pub column: i32,
}

impl Location {
    /// Creates a location at the given row and column.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Creates the invalid sentinel location.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            row: -1,
            column: -1,
        }
    }

    /// Returns true when both coordinates are non-negative.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.row >= 0 && self.column >= 0
    }

    /// Overwrites both coordinates in place.
    pub fn set(&mut self, row: i32, column: i32) {
        self.row = row;
        self.column = column;
    }

    /// Returns the neighbouring location one step in `direction`.
    ///
    /// Stepping from an invalid location stays invalid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        if !self.is_valid() {
            return Self::invalid();
        }
        let (dr, dc) = direction.offset();
        Self::new(self.row + dr, self.column + dc)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_valid(), other.is_valid()) {
            (true, true) => self.row == other.row && self.column == other.column,
            (false, false) => true,
            _ => false,
        }
    }
}

impl Eq for Location {}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Location({}, {})", self.row, self.column)
        } else {
            write!(f, "Location(invalid)")
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.row, self.column)
        } else {
            write!(f, "(invalid)")
        }
    }
}

// =============================================================================
// Direction
// =============================================================================

/// One of the four compass directions an actor can face or move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    North,
    /// Towards the last column.
    East,
    /// Towards the last row.
    South,
    /// Towards column 0.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the `(row, column)` delta of a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Maps `0..4` onto [`Direction::ALL`], wrapping larger values.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Returns the direction leading from `from` to an adjacent `to`.
    ///
    /// Returns `None` when either location is invalid or the two are not
    /// orthogonal neighbours.
    #[must_use]
    pub fn between(from: Location, to: Location) -> Option<Self> {
        if !from.is_valid() || !to.is_valid() {
            return None;
        }
        let delta = (to.row - from.row, to.column - from.column);
        Self::ALL.into_iter().find(|dir| dir.offset() == delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "North"),
            Self::East => write!(f, "East"),
            Self::South => write!(f, "South"),
            Self::West => write!(f, "West"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
