//! Grid coordinates.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A cell coordinate: `x` is the column, `y` is the row.
///
/// Ordering is row-major (`y` first), which is the scan order used by every
/// layout stage that needs a deterministic sequence of cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when `other` shares an edge with `self`.
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl ValueObject for Position {}
